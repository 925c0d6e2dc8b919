//! Transaction domain model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::bank::SupportedBank;

/// A single bank transaction, normalized from the provider's wire format
///
/// Constructed once per provider record at mapping time and never mutated.
/// Identity is the provider-assigned `id`. Nothing is cached; entities live
/// only for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque provider transaction ID
    pub id: String,
    pub transaction_date: NaiveDateTime,
    pub account_number: String,
    pub bank_name: SupportedBank,
    pub sub_account: Option<String>,
    /// Incoming amount, zero when the record had no inflow
    pub amount_in: Decimal,
    /// Outgoing amount, zero when the record had no outflow
    pub amount_out: Decimal,
    /// Provider-reported running balance after this transaction.
    /// Zero means "not reported"; a genuinely zero balance is
    /// indistinguishable on the wire.
    pub accumulated: Decimal,
    pub code: Option<String>,
    pub transaction_content: Option<String>,
    pub reference_number: Option<String>,
}
