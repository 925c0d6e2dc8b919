//! Balance command - derive the current balance for an account

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use bankline_core::{ResponseEnvelope, CURRENCY};

use super::{fail_json, get_context, print_envelope};
use crate::output;

#[derive(Serialize)]
struct BalanceData {
    account_number: String,
    balance: Decimal,
    currency: &'static str,
}

pub async fn run(account: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let balance = match ctx.banking_service.get_balance(account).await {
        Ok(balance) => balance,
        Err(e) if json => return fail_json::<BalanceData>(e),
        Err(e) => return Err(e.into()),
    };

    if json {
        let data = BalanceData {
            account_number: account.to_string(),
            balance,
            currency: CURRENCY,
        };
        return print_envelope(&ResponseEnvelope::ok(data));
    }

    output::success(&format!(
        "Balance for account {}: {} {}",
        account,
        output::format_amount(balance),
        CURRENCY
    ));
    Ok(())
}
