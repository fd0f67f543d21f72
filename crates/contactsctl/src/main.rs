// # contactsctl - fetch and list groupware contacts
//
// Thin integration layer: all fetch and dedup logic lives in contacts-core.
//
// This binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Installing the tracing subscriber
// 3. Registering contact sources
// 4. Running one fetch and printing the result
//
// ## Configuration
//
// - `CONTACTS_IDENTITY`: Account identity (required)
// - `CONTACTS_SECRET`: Account secret (required)
// - `CONTACTS_SOURCE_TYPE`: Source type (o365)
// - `CONTACTS_ENDPOINT`: Override the listing URL (optional)
// - `CONTACTS_TIMEOUT_SECS`: HTTP timeout in seconds (default 30)
// - `CONTACTS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export CONTACTS_IDENTITY=me@example.com
// export CONTACTS_SECRET=your_password
//
// contactsctl
// ```

use anyhow::{Context, Result};
use contacts_core::{ContactRecord, ContactsConfig, SourceConfig, SourceRegistry};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtlExitCode {
    /// Contacts fetched and printed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Fetch failed
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    identity: String,
    secret: String,
    source_type: String,
    endpoint: Option<String>,
    timeout_secs: u64,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            identity: env::var("CONTACTS_IDENTITY").context("CONTACTS_IDENTITY is required")?,
            secret: env::var("CONTACTS_SECRET").context("CONTACTS_SECRET is required")?,
            source_type: env::var("CONTACTS_SOURCE_TYPE").unwrap_or_else(|_| "o365".to_string()),
            endpoint: env::var("CONTACTS_ENDPOINT").ok().filter(|s| !s.is_empty()),
            timeout_secs: match env::var("CONTACTS_TIMEOUT_SECS") {
                Ok(s) => s
                    .parse()
                    .with_context(|| format!("CONTACTS_TIMEOUT_SECS is not a number: {}", s))?,
                Err(_) => 30,
            },
            log_level: env::var("CONTACTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration and convert it for the library
    fn to_contacts_config(&self) -> Result<ContactsConfig> {
        let source = match self.source_type.as_str() {
            "o365" => SourceConfig::O365 {
                endpoint: self.endpoint.clone(),
                timeout_secs: self.timeout_secs,
            },
            other => anyhow::bail!(
                "CONTACTS_SOURCE_TYPE '{}' is not supported. Supported sources: o365",
                other
            ),
        };

        let config =
            ContactsConfig::new(self.identity.clone(), self.secret.clone()).with_source(source);
        config.validate()?;
        Ok(config)
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "CONTACTS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let (contacts_config, log_level) = match config.to_contacts_config().and_then(|c| {
        let level = config.log_level()?;
        Ok((c, level))
    }) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Configuration validation error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // Log to stderr; stdout carries the contact listing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(fetch_and_print(contacts_config)).into()
}

/// Run one fetch and map its outcome onto an exit code
async fn fetch_and_print(config: ContactsConfig) -> CtlExitCode {
    match run(config).await {
        Ok(()) => CtlExitCode::Success,
        Err(e) => {
            error!("Fetch failed: {:#}", e);
            CtlExitCode::RuntimeError
        }
    }
}

/// Build a fetcher from configuration, fetch once, print the contacts
async fn run(config: ContactsConfig) -> Result<()> {
    let registry = SourceRegistry::new();

    #[cfg(feature = "o365")]
    {
        info!("Registering O365 contact source");
        contacts_provider_o365::register(&registry);
    }

    let mut fetcher = registry.create_fetcher(&config)?;
    info!(
        "Fetching contacts for {} via {}",
        fetcher.credential().identity(),
        fetcher.source_name()
    );

    fetcher.fetch().await?;
    info!("Fetched {} contact(s)", fetcher.len());

    for contact in fetcher.contacts() {
        println!("{}", format_contact(contact));
    }

    Ok(())
}

/// One output row: `id<TAB>display name<TAB>emails`, emails comma separated
///
/// Tabs and line breaks inside fields are replaced by spaces so every
/// contact stays on one three-column line.
fn format_contact(contact: &ContactRecord) -> String {
    let emails = contact
        .email_addresses()
        .iter()
        .map(|address| sanitize_field(address))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}\t{}\t{}",
        sanitize_field(contact.id()),
        sanitize_field(contact.display_name()),
        emails
    )
}

fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
