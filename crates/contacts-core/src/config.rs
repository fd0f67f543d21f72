//! Configuration types for the contacts fetcher
//!
//! The library never reads the environment itself. Host applications build
//! these structures (from env, files, flags) and hand them in.

use serde::{Deserialize, Serialize};

use crate::credential::Credential;

/// Default Office 365 contacts listing endpoint (Outlook REST API v1.0)
pub const DEFAULT_O365_ENDPOINT: &str = "https://outlook.office365.com/api/v1.0/me/contacts";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// Credential pair for every outbound request
    pub credential: CredentialConfig,

    /// Contact source configuration
    #[serde(default)]
    pub source: SourceConfig,
}

impl ContactsConfig {
    /// Create a configuration for the default source
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credential: CredentialConfig {
                identity: identity.into(),
                secret: secret.into(),
            },
            source: SourceConfig::default(),
        }
    }

    /// Replace the source configuration
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    /// Validate the configuration
    ///
    /// The credential is passed through verbatim and is not inspected here.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.source.validate()
    }
}

/// Credential pair as it appears in configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Account identity (usually an email address)
    pub identity: String,
    /// Account secret
    pub secret: String,
}

impl CredentialConfig {
    /// Convert into the immutable runtime credential
    pub fn to_credential(&self) -> Credential {
        Credential::new(self.identity.clone(), self.secret.clone())
    }
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("identity", &self.identity)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Contact source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Office 365 REST source
    O365 {
        /// Listing endpoint; `None` uses [`DEFAULT_O365_ENDPOINT`]
        #[serde(default)]
        endpoint: Option<String>,
        /// HTTP timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Custom source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl SourceConfig {
    /// Validate the source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SourceConfig::O365 {
                endpoint,
                timeout_secs,
            } => {
                if let Some(url) = endpoint {
                    if url.is_empty() {
                        return Err(crate::Error::config("O365 endpoint cannot be empty"));
                    }
                    if !url.starts_with("https://") && !url.starts_with("http://") {
                        return Err(crate::Error::config(format!(
                            "O365 endpoint must use HTTP or HTTPS scheme. Got: {}",
                            url
                        )));
                    }
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("O365 timeout must be > 0"));
                }
                Ok(())
            }
            SourceConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom source factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom source config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the source type name used for registry lookups
    pub fn type_name(&self) -> &str {
        match self {
            SourceConfig::O365 { .. } => "o365",
            SourceConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::O365 {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
