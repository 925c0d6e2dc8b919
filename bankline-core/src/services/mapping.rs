//! Domain mapping - provider transfer records to domain transactions
//!
//! Pure conversion functions, no I/O. A record that cannot be mapped is
//! an error for the whole batch it arrived in; we never silently skip or
//! default our way past bad financial data.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{SupportedBank, Transaction};
use crate::ports::TransferRecord;

/// Datetime formats SePay has been observed to emit
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Convert one provider transfer record into a domain transaction
///
/// Missing amounts become zero ("no movement"); an unregistered bank
/// label or an unparseable date fails the record.
pub fn map_transaction(record: &TransferRecord) -> Result<Transaction> {
    let bank_name = SupportedBank::from_provider_label(&record.bank_name)?;
    let transaction_date = parse_transaction_date(&record.transaction_date)?;

    Ok(Transaction {
        id: record.id.clone(),
        transaction_date,
        account_number: record.account_number.clone(),
        bank_name,
        sub_account: record.sub_account.clone(),
        amount_in: record.amount_in.unwrap_or(Decimal::ZERO),
        amount_out: record.amount_out.unwrap_or(Decimal::ZERO),
        accumulated: record.accumulated.unwrap_or(Decimal::ZERO),
        code: record.code.clone(),
        transaction_content: record.transaction_content.clone(),
        reference_number: record.reference_number.clone(),
    })
}

fn parse_transaction_date(raw: &str) -> Result<NaiveDateTime> {
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    Err(Error::mapping(format!(
        "Unparseable transaction date: {:?}",
        raw
    )))
}
