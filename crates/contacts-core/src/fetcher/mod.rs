//! Contact fetcher
//!
//! The ContactFetcher is responsible for:
//! - Holding the credential for one account
//! - Asking its ContactSource for the current listing
//! - Appending contacts it has not seen before, in server order
//!
//! ## Flow
//!
//! ```text
//! ┌────────────────┐   list_contacts(&credential)   ┌───────────────┐
//! │ ContactFetcher │ ─────────────────────────────▶ │ ContactSource │
//! └────────────────┘ ◀───────────────────────────── └───────────────┘
//!         │                  Vec<Value>
//!         ▼
//!  for each element: schema check → seen? skip : append
//! ```
//!
//! ## Dedup
//!
//! Contacts are the same when their `Id` fields match, whatever else differs.
//! Membership is checked against an id → position index, so a fetch is
//! linear in the size of the response.
//!
//! ## Failure Behavior
//!
//! Errors are returned as-is. A schema error part-way through a listing
//! leaves the contacts appended before it in place.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::contact::{ContactRecord, DISPLAY_NAME_FIELD, ID_FIELD, required_str};
use crate::credential::Credential;
use crate::error::Result;
use crate::traits::ContactSource;

/// Fetches and de-duplicates the contacts of one account
///
/// ## Lifecycle
///
/// 1. Create with [`ContactFetcher::new()`]; no network activity happens here
/// 2. Call [`ContactFetcher::fetch()`] as often as needed
/// 3. The collection only ever grows; drop the fetcher to discard it
///
/// ## Threading
///
/// `fetch()` takes `&mut self`, so one instance is confined to one task at a
/// time. Wrap it in a mutex to share it.
pub struct ContactFetcher {
    /// Credential shared with every record this fetcher creates
    credential: Arc<Credential>,

    /// Transport for the listing request
    source: Box<dyn ContactSource>,

    /// Accepted contacts, insertion ordered
    contacts: Vec<ContactRecord>,

    /// Contact id -> position in `contacts`
    index: HashMap<String, usize>,
}

impl ContactFetcher {
    /// Create a fetcher for the given account
    ///
    /// The credential is stored verbatim and is not validated.
    pub fn new(
        identity: impl Into<String>,
        secret: impl Into<String>,
        source: Box<dyn ContactSource>,
    ) -> Self {
        Self::with_credential(Credential::new(identity, secret), source)
    }

    /// Create a fetcher from an existing credential
    pub fn with_credential(credential: Credential, source: Box<dyn ContactSource>) -> Self {
        debug!(
            "Setting up contact fetcher for {} via {}",
            credential.identity(),
            source.source_name()
        );

        Self {
            credential: Arc::new(credential),
            source,
            contacts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Download the contact listing and append contacts not seen before
    ///
    /// Every call issues a new request. Each element of the listing is
    /// checked for `Id` and `DisplayName`; elements whose id is already held
    /// are skipped, the rest are appended in the order the server sent them.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The listing was processed to the end
    /// - `Err(Error)`: Transport, authentication, HTTP, parse or schema
    ///   failure. Contacts appended before a schema failure are kept.
    pub async fn fetch(&mut self) -> Result<bool> {
        debug!("Fetching contacts from {}", self.source.source_name());

        let listing = self.source.list_contacts(&self.credential).await?;
        info!(
            "Response from {}: {} contact(s)",
            self.source.source_name(),
            listing.len()
        );

        let before = self.contacts.len();

        for contact in listing {
            let id = required_str(&contact, ID_FIELD)?;
            let display_name = required_str(&contact, DISPLAY_NAME_FIELD)?;
            debug!("Got a contact named: {}", display_name);

            if self.index.contains_key(id) {
                info!("Duplicate contact: {}", id);
                continue;
            }

            let record = ContactRecord::from_json(contact, Arc::clone(&self.credential))?;
            self.index.insert(record.id().to_string(), self.contacts.len());
            self.contacts.push(record);
            debug!("Appended contact");
        }

        debug!(
            "All contacts retrieved: {} new, {} held",
            self.contacts.len() - before,
            self.contacts.len()
        );
        Ok(true)
    }

    /// Accepted contacts in insertion order
    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether a contact with this id is held
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a held contact by id
    pub fn get(&self, id: &str) -> Option<&ContactRecord> {
        self.index.get(id).map(|&pos| &self.contacts[pos])
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }
}

impl std::fmt::Debug for ContactFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactFetcher")
            .field("credential", &self.credential)
            .field("source", &self.source.source_name())
            .field("contacts", &self.contacts.len())
            .finish()
    }
}
