//! Core traits for the contacts fetcher
//!
//! - [`ContactSource`]: List raw contacts from a remote API

pub mod contact_source;

pub use contact_source::{ContactSource, ContactSourceFactory};
