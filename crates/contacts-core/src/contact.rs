//! Contact records
//!
//! A [`ContactRecord`] is one remote contact as returned by the listing
//! endpoint. The raw JSON object is kept so fields the fetcher does not know
//! about pass through untouched; the identifier and display name are parsed
//! up front so every record is guaranteed to carry them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::credential::Credential;
use crate::error::{Error, Result};

/// Field holding the stable contact identifier
pub const ID_FIELD: &str = "Id";

/// Field holding the human-readable name
pub const DISPLAY_NAME_FIELD: &str = "DisplayName";

/// One contact accepted by the fetcher
#[derive(Debug, Clone)]
pub struct ContactRecord {
    id: String,
    display_name: String,
    json: Value,
    credential: Arc<Credential>,
    first_seen: DateTime<Utc>,
}

impl ContactRecord {
    /// Build a record from the raw per-contact object
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if `Id` or `DisplayName` is missing or is
    /// not a string.
    pub fn from_json(json: Value, credential: Arc<Credential>) -> Result<Self> {
        let id = required_str(&json, ID_FIELD)?.to_string();
        let display_name = required_str(&json, DISPLAY_NAME_FIELD)?.to_string();

        Ok(Self {
            id,
            display_name,
            json,
            credential,
            first_seen: Utc::now(),
        })
    }

    /// Stable remote identifier; two records with the same id are the same contact
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn given_name(&self) -> Option<&str> {
        self.json["GivenName"].as_str()
    }

    pub fn surname(&self) -> Option<&str> {
        self.json["Surname"].as_str()
    }

    /// Addresses from `EmailAddresses[].Address`, in source order
    ///
    /// Entries without an address (Outlook returns `null` slots) are skipped.
    pub fn email_addresses(&self) -> Vec<&str> {
        self.json["EmailAddresses"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry["Address"].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The raw object this record was built from
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// The credential the record was fetched with
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// When the fetcher first accepted this record
    pub fn first_seen(&self) -> DateTime<Utc> {
        self.first_seen
    }
}

/// Read a required string field from a contact object
pub(crate) fn required_str<'a>(json: &'a Value, field: &str) -> Result<&'a str> {
    match json.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::schema(format!(
            "contact field `{}` is not a string: {}",
            field, other
        ))),
        None => Err(Error::schema(format!("contact is missing `{}`", field))),
    }
}
