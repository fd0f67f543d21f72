//! Test doubles shared by the fetcher contract tests

#![allow(dead_code)]

use contacts_core::error::{Error, Result};
use contacts_core::{ContactSource, Credential};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A ContactSource that replays queued responses, one per call
pub struct ScriptedSource {
    responses: Arc<Mutex<VecDeque<Result<Vec<Value>>>>>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a successful listing
    pub fn push_listing(&self, listing: Vec<Value>) {
        self.responses.lock().unwrap().push_back(Ok(listing));
    }

    /// Queue a failure
    pub fn push_error(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get the number of times list_contacts() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a handle that shares the queue and counter with `other`
    pub fn sharing_with(other: &Self) -> Self {
        Self {
            responses: Arc::clone(&other.responses),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl ContactSource for ScriptedSource {
    async fn list_contacts(&self, _credential: &Credential) -> Result<Vec<Value>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no scripted response left")))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Minimal contact object
pub fn contact(id: &str, name: &str) -> Value {
    json!({ "Id": id, "DisplayName": name })
}

/// Ids held by the fetcher, in order
pub fn ids(fetcher: &contacts_core::ContactFetcher) -> Vec<String> {
    fetcher
        .contacts()
        .iter()
        .map(|c| c.id().to_string())
        .collect()
}
