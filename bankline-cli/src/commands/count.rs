//! Count command - count transactions for an account

use anyhow::Result;
use serde::Serialize;

use bankline_core::{CountQuery, ResponseEnvelope};

use super::{fail_json, get_context, parse_datetime, print_envelope};
use crate::output;

#[derive(Serialize)]
struct CountData {
    account_number: String,
    count: u64,
}

pub async fn run(
    account: &str,
    date_from: Option<&str>,
    date_to: Option<&str>,
    id_from: Option<String>,
    json: bool,
) -> Result<()> {
    let query = CountQuery {
        date_from: date_from.map(parse_datetime).transpose()?,
        date_to: date_to.map(parse_datetime).transpose()?,
        id_from,
    };

    let ctx = get_context()?;
    let count = match ctx
        .banking_service
        .get_transactions_count(account, &query)
        .await
    {
        Ok(count) => count,
        Err(e) if json => return fail_json::<CountData>(e),
        Err(e) => return Err(e.into()),
    };

    if json {
        let data = CountData {
            account_number: account.to_string(),
            count,
        };
        return print_envelope(&ResponseEnvelope::ok(data));
    }

    output::success(&format!(
        "{} transaction(s) for account {}",
        count, account
    ));
    Ok(())
}
