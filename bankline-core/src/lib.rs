//! Bankline Core - banking-transaction query logic
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Transaction, SupportedBank, queries)
//! - **ports**: Trait definitions for external dependencies (TransactionProvider)
//! - **services**: Business logic orchestration (BankingService, mapping)
//! - **adapters**: Concrete implementations (SePay HTTP client)
//!
//! Everything is stateless and read-only: each operation performs its own
//! upstream round trip and nothing is cached or persisted.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::sepay::{self, SePayClient};
use config::Config;
use services::BankingService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, ResponseEnvelope, Result};
pub use domain::{CountQuery, HistoryQuery, SupportedBank, Transaction};

/// Currency every SePay account is denominated in
pub const CURRENCY: &str = "VND";

/// Main context for Bankline operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration and the banking service wired to the SePay provider.
/// Construction fails with a configuration error when no credential is
/// available; that condition is fatal and never retried.
pub struct BanklineContext {
    pub config: Config,
    pub banking_service: BankingService,
}

impl BanklineContext {
    /// Create a new Bankline context from a settings directory
    pub fn new(bankline_dir: &Path) -> Result<Self> {
        let config = Config::load(bankline_dir)
            .map_err(|e| Error::config(format!("Failed to load settings: {}", e)))?;

        Self::from_config(config)
    }

    /// Create a context from an already-resolved configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(sepay::get_base_url);

        let api_key = config
            .api_key
            .clone()
            .or_else(|| {
                std::env::var(sepay::SEPAY_API_KEY_ENV)
                    .ok()
                    .filter(|v| !v.is_empty())
            })
            .ok_or_else(|| {
                Error::config(format!(
                    "SePay API key is required. Set the `{}` environment variable or add `apiKey` to settings.json.",
                    sepay::SEPAY_API_KEY_ENV
                ))
            })?;

        let client = SePayClient::with_base_url(&api_key, &base_url, config.timeout)?;

        let banking_service = BankingService::new(Arc::new(client));

        Ok(Self {
            config,
            banking_service,
        })
    }
}
