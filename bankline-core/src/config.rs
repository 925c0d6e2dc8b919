//! Configuration management
//!
//! Settings live in a `settings.json` in the bankline directory:
//! ```json
//! {
//!   "apiKey": "...",
//!   "baseUrl": "https://my.sepay.vn/userapi",
//!   "timeoutSecs": 30
//! }
//! ```
//! Environment variables take precedence over the file so CI and
//! one-off runs never need to write credentials to disk.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::sepay::{SEPAY_API_KEY_ENV, SEPAY_BASE_URL_ENV};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// Bankline configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    /// SePay API credential; `None` means not configured anywhere
    pub api_key: Option<String>,
    /// Base URL override; `None` falls back to the adapter default
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load config from the bankline directory
    ///
    /// Precedence: environment variables, then settings.json, then
    /// built-in defaults.
    pub fn load(bankline_dir: &Path) -> Result<Self> {
        let settings_path = bankline_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_key = std::env::var(SEPAY_API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(raw.api_key);
        let base_url = std::env::var(SEPAY_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(raw.base_url);

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// Save config to the bankline directory
    pub fn save(&self, bankline_dir: &Path) -> Result<()> {
        let settings_path = bankline_dir.join("settings.json");

        let settings = SettingsFile {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: Some(self.timeout.as_secs()),
        };

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}
