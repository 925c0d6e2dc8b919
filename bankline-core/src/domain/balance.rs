//! Balance derivation from transaction history
//!
//! SePay has no dedicated balance endpoint in the routes we consume, so
//! the balance is inferred from the account's transaction history.

use rust_decimal::Decimal;

use crate::domain::transaction::Transaction;

/// Derive an account balance from a transaction history
///
/// Assumes the provider's ordering contract: the list is chronological
/// with the most recent transaction last. This is not verified here.
///
/// Policy, in order:
/// 1. Empty history: balance is zero.
/// 2. The most recent transaction carries a non-zero `accumulated`
///    running balance: that value wins outright.
/// 3. Otherwise: sum of all inflows minus sum of all outflows across
///    the returned list. If the history was truncated upstream, this
///    fallback is only as accurate as the data returned.
pub fn derive_balance(transactions: &[Transaction]) -> Decimal {
    let Some(latest) = transactions.last() else {
        return Decimal::ZERO;
    };

    if latest.accumulated != Decimal::ZERO {
        return latest.accumulated;
    }

    let total_in: Decimal = transactions.iter().map(|t| t.amount_in).sum();
    let total_out: Decimal = transactions.iter().map(|t| t.amount_out).sum();
    total_in - total_out
}
