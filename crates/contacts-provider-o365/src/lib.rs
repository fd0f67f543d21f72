// # Office 365 Contact Source
//
// This crate lists the contacts of an Office 365 mailbox through the Outlook
// REST API v1.0 and plugs into `contacts-core` as a `ContactSource`.
//
// ## Behavior
//
// - One GET per `list_contacts()` call, basic auth with the caller's credential
// - HTTP status is checked before the body is parsed
// - Only the first page is read; `@odata.nextLink` is logged and ignored
// - No retry, no backoff, no caching
//
// ## Security Requirements
//
// - The secret NEVER appears in logs or error messages
//
// ## API Reference
//
// - List contacts: GET `https://outlook.office365.com/api/v1.0/me/contacts`
// - Response: `{ "value": [ { "Id": ..., "DisplayName": ..., ... } ] }`

use async_trait::async_trait;
use contacts_core::config::{DEFAULT_O365_ENDPOINT, SourceConfig};
use contacts_core::{ContactFetcher, ContactSource, ContactSourceFactory, Credential};
use contacts_core::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of the contacts listing
#[derive(Debug, Deserialize)]
struct ContactListing {
    value: Vec<Value>,

    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,
}

/// Office 365 contact source
///
/// Stateless and single-shot: the credential comes in with every call and
/// nothing is kept between calls.
#[derive(Debug, Clone)]
pub struct O365ContactSource {
    /// Contacts listing URL
    endpoint: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl O365ContactSource {
    /// Create a source for the default Office 365 endpoint
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_O365_ENDPOINT, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source for a specific listing URL
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactSource for O365ContactSource {
    /// List contacts visible to `credential`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/v1.0/me/contacts
    /// Authorization: Basic <identity:secret>
    /// Accept: application/json
    /// ```
    async fn list_contacts(&self, credential: &Credential) -> Result<Vec<Value>> {
        tracing::debug!("Fetching contacts for {}", credential.identity());

        let response = self
            .client
            .get(&self.endpoint)
            .basic_auth(credential.identity(), Some(credential.secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        tracing::info!("Response from O365: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return match status.as_u16() {
                401 | 403 => Err(Error::auth(format!(
                    "Credential rejected for {}. Status: {}",
                    credential.identity(),
                    status
                ))),
                404 => Err(Error::http(format!(
                    "Contacts endpoint not found: {}",
                    self.endpoint
                ))),
                429 => Err(Error::http(format!("Rate limit exceeded. Status: {}", status))),
                500..=599 => Err(Error::http(format!(
                    "O365 server error: {} - {}",
                    status, error_text
                ))),
                _ => Err(Error::http(format!(
                    "Contact listing failed: {} - {}",
                    status, error_text
                ))),
            };
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        let json: Value = serde_json::from_str(&body)?;

        let listing: ContactListing = serde_json::from_value(json)
            .map_err(|e| Error::schema(format!("Invalid response format: {}", e)))?;

        if let Some(ref next_link) = listing.next_link {
            tracing::warn!(
                "Listing has more pages; only the first is read (next: {})",
                next_link
            );
        }

        tracing::debug!("Listing contains {} contact(s)", listing.value.len());
        Ok(listing.value)
    }

    fn source_name(&self) -> &'static str {
        "o365"
    }
}

/// Build a fetcher for an Office 365 account on the default endpoint
pub fn fetcher(identity: impl Into<String>, secret: impl Into<String>) -> Result<ContactFetcher> {
    let source = O365ContactSource::new()?;
    Ok(ContactFetcher::new(identity, secret, Box::new(source)))
}

/// Factory for creating Office 365 sources
pub struct O365Factory;

impl ContactSourceFactory for O365Factory {
    fn create(&self, config: &SourceConfig) -> Result<Box<dyn ContactSource>> {
        match config {
            SourceConfig::O365 {
                endpoint,
                timeout_secs,
            } => {
                let endpoint = endpoint.as_deref().unwrap_or(DEFAULT_O365_ENDPOINT);
                let source =
                    O365ContactSource::with_endpoint(endpoint, Duration::from_secs(*timeout_secs))?;
                Ok(Box::new(source))
            }
            _ => Err(Error::config("Invalid config for O365 source")),
        }
    }
}

/// Register the Office 365 source with a registry
///
/// # Example
///
/// ```rust
/// use contacts_core::SourceRegistry;
///
/// let registry = SourceRegistry::new();
/// contacts_provider_o365::register(&registry);
/// assert!(registry.has_source("o365"));
/// ```
pub fn register(registry: &contacts_core::SourceRegistry) {
    registry.register_source("o365", Box::new(O365Factory));
}
