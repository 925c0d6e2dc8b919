//! CLI command implementations

pub mod balance;
pub mod count;
pub mod health;
pub mod history;
pub mod transaction;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use bankline_core::{BanklineContext, Error, ResponseEnvelope};

/// Get the bankline directory from environment or default
pub fn get_bankline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANKLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".bankline")
    }
}

/// Get or create bankline context
pub fn get_context() -> Result<BanklineContext> {
    let bankline_dir = get_bankline_dir();

    std::fs::create_dir_all(&bankline_dir)
        .with_context(|| format!("Failed to create bankline directory: {:?}", bankline_dir))?;

    BanklineContext::new(&bankline_dir).context("Failed to initialize bankline context")
}

/// Parse a CLI date argument
///
/// Accepts a bare date (`2025-01-15`, taken as midnight) or a full
/// timestamp (`2025-01-15 10:30:00`) matching the provider's format.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    anyhow::bail!(
        "Invalid date '{}': expected YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\"",
        raw
    )
}

/// Print a JSON envelope to stdout
pub fn print_envelope<T: Serialize>(envelope: &ResponseEnvelope<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

/// Report a core error in JSON mode: envelope to stdout, non-zero exit via Err
pub fn fail_json<T: Serialize>(error: Error) -> Result<()> {
    print_envelope(&ResponseEnvelope::<T>::fail(&error))?;
    Err(error.into())
}
