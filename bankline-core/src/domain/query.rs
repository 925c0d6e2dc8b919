//! Query parameter objects for the banking contract
//!
//! Validation happens here, before any network call, so the provider
//! adapter never sees a malformed request.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Upper bound the provider enforces on a single history page
pub const MAX_HISTORY_LIMIT: u32 = 1000;

/// Maximum account number length accepted by the contract
pub const MAX_ACCOUNT_NUMBER_LEN: usize = 50;

/// Optional filters for a transaction history query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    pub limit: Option<u32>,
    pub reference_id: Option<String>,
    pub amount_in: Option<Decimal>,
    pub amount_out: Option<Decimal>,
}

impl HistoryQuery {
    pub fn validate(&self, account_number: &str) -> Result<()> {
        validate_account_number(account_number)?;

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_HISTORY_LIMIT {
                return Err(Error::validation(format!(
                    "limit must be between 1 and {}, got {}",
                    MAX_HISTORY_LIMIT, limit
                )));
            }
        }

        if let Some(amount) = self.amount_in {
            if amount < Decimal::ZERO {
                return Err(Error::validation("amount_in filter must be non-negative"));
            }
        }
        if let Some(amount) = self.amount_out {
            if amount < Decimal::ZERO {
                return Err(Error::validation("amount_out filter must be non-negative"));
            }
        }

        validate_date_range(self.date_from, self.date_to)
    }
}

/// Optional filters for a transaction count query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountQuery {
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    /// Count transactions starting from this provider ID
    pub id_from: Option<String>,
}

impl CountQuery {
    pub fn validate(&self, account_number: &str) -> Result<()> {
        validate_account_number(account_number)?;
        validate_date_range(self.date_from, self.date_to)
    }
}

fn validate_account_number(account_number: &str) -> Result<()> {
    if account_number.is_empty() {
        return Err(Error::validation("account_number must not be empty"));
    }
    if account_number.len() > MAX_ACCOUNT_NUMBER_LEN {
        return Err(Error::validation(format!(
            "account_number must be at most {} characters",
            MAX_ACCOUNT_NUMBER_LEN
        )));
    }
    Ok(())
}

fn validate_date_range(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Result<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(Error::validation("date_to must not precede date_from"));
        }
    }
    Ok(())
}
