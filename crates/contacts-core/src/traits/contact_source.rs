// # Contact Source Trait
//
// Defines the interface for listing contacts from a remote groupware API.
//
// ## Implementations
//
// - Office 365: `contacts-provider-o365` crate
//
// ## Usage
//
// ```rust,ignore
// use contacts_core::{ContactSource, Credential};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* ContactSource implementation */;
//     let credential = Credential::new("me@example.com", "secret");
//
//     let raw = source.list_contacts(&credential).await?;
//     println!("{} contacts", raw.len());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde_json::Value;

use crate::credential::Credential;

/// Trait for contact source implementations
///
/// A source performs exactly one listing request per call and hands back the
/// raw contact objects (the `value` array of the response) in server order.
///
/// Sources are isolated and stateless:
/// - no retry or backoff
/// - no caching between calls
/// - no de-duplication (owned by `ContactFetcher`)
///
/// # Errors
///
/// Implementations map failures onto [`crate::Error`]:
/// - connection problems → `Transport`
/// - rejected credential → `Authentication`, before the body is parsed
/// - other failure statuses → `Http`
/// - body is not JSON → `Parse`
/// - `value` missing or not an array → `Schema`
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// List every contact visible to `credential`
    async fn list_contacts(&self, credential: &Credential) -> Result<Vec<Value>, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}

/// Helper trait for constructing contact sources from configuration
pub trait ContactSourceFactory: Send + Sync {
    /// Create a ContactSource instance from configuration
    fn create(
        &self,
        config: &crate::config::SourceConfig,
    ) -> Result<Box<dyn ContactSource>, crate::Error>;
}
