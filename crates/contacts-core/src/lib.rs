// # contacts-core
//
// Core library for fetching the contacts of a groupware account and keeping
// a de-duplicated, insertion-ordered copy in memory.
//
// ## Architecture Overview
//
// - **ContactSource**: Trait for listing raw contacts from a remote API
// - **ContactFetcher**: Holds the credential and the accepted contacts; merges
//   each listing, skipping ids it already holds
// - **ContactRecord**: One accepted contact (typed id/name plus raw payload)
// - **SourceRegistry**: Plugin-based registry for contact sources
//
// ## Logging
//
// This library only emits `tracing` events. Installing a subscriber is the
// host application's job.

pub mod traits;
pub mod fetcher;
pub mod registry;
pub mod config;
pub mod contact;
pub mod credential;
pub mod error;

// Re-export core types for convenience
pub use traits::{ContactSource, ContactSourceFactory};
pub use fetcher::ContactFetcher;
pub use registry::SourceRegistry;
pub use config::{ContactsConfig, CredentialConfig, SourceConfig, DEFAULT_O365_ENDPOINT};
pub use contact::ContactRecord;
pub use credential::Credential;
pub use error::{Error, Result};
