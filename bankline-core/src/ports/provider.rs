//! Transaction provider port
//!
//! Defines the interface for fetching raw transaction data from the
//! upstream banking provider. Implementations own the wire format; the
//! records they return are already normalized to one canonical field set
//! so the mapping layer never sees provider naming quirks.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::{CountQuery, HistoryQuery};

/// A provider transaction record, shaped like the upstream JSON
///
/// Numeric fields stay optional (the provider omits or nulls them) and the
/// date stays a raw string; coercion and parsing are the mapper's job.
/// The provider labels the bank `bank_brand_name` on the list route and
/// `bank_name` on the by-id route; adapters must fold both into
/// `bank_name` when parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: String,
    pub transaction_date: String,
    pub account_number: String,
    pub bank_name: String,
    pub sub_account: Option<String>,
    pub amount_in: Option<Decimal>,
    pub amount_out: Option<Decimal>,
    pub accumulated: Option<Decimal>,
    pub code: Option<String>,
    pub transaction_content: Option<String>,
    pub reference_number: Option<String>,
}

/// Transaction provider trait
///
/// The BankingService uses this trait to query transaction data without
/// knowing the upstream wire format. One implementation exists per
/// provider integration (SePay today).
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Provider name (e.g., "sepay")
    fn name(&self) -> &str;

    /// Fetch one page of transactions for an account
    async fn get_transactions(
        &self,
        account_number: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<TransferRecord>>;

    /// Count transactions for an account
    async fn get_transactions_count(
        &self,
        account_number: &str,
        query: &CountQuery,
    ) -> Result<u64>;

    /// Fetch a single transaction by provider ID
    ///
    /// Returns `Ok(None)` when the provider reports no matching record.
    async fn get_transaction_by_id(&self, transaction_id: &str) -> Result<Option<TransferRecord>>;
}
