use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Days a stored credential stays valid when no override is configured
pub const DEFAULT_CREDENTIAL_TTL_DAYS: i64 = 7;
/// Idle period after the last keystroke before a search is issued
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Console configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_origin: Url,
    pub credential_file: PathBuf,
    pub credential_ttl_days: i64,
    pub search_debounce: Duration,
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let api_origin = env::var("ADMIN_API_ORIGIN").context("ADMIN_API_ORIGIN must be set")?;

        let credential_file = match env::var("ADMIN_CREDENTIAL_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_credential_file()?,
        };

        Ok(Self {
            api_origin: Url::parse(&api_origin)
                .context("ADMIN_API_ORIGIN must be a valid URL")?,
            credential_file,
            credential_ttl_days: env::var("ADMIN_CREDENTIAL_TTL_DAYS")
                .unwrap_or_else(|_| DEFAULT_CREDENTIAL_TTL_DAYS.to_string())
                .parse()
                .context("ADMIN_CREDENTIAL_TTL_DAYS must be a whole number of days")?,
            search_debounce: Duration::from_millis(
                env::var("ADMIN_SEARCH_DEBOUNCE_MS")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE.as_millis().to_string())
                    .parse()
                    .context("ADMIN_SEARCH_DEBOUNCE_MS must be a number")?,
            ),
            page_size: env::var("ADMIN_PAGE_SIZE")
                .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
                .parse()
                .context("ADMIN_PAGE_SIZE must be a number")?,
        })
    }

    /// Configuration for a given origin with every other value defaulted
    pub fn for_origin(api_origin: Url, credential_file: PathBuf) -> Self {
        Self {
            api_origin,
            credential_file,
            credential_ttl_days: DEFAULT_CREDENTIAL_TTL_DAYS,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_credential_file() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("Could not determine data directory")?;
    Ok(data_dir.join("admin-console").join("credential.json"))
}
