//! History command - list transactions for an account

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use bankline_core::{HistoryQuery, ResponseEnvelope, Transaction};

use super::{fail_json, get_context, parse_datetime, print_envelope};
use crate::output;

#[derive(Serialize)]
struct HistoryData {
    account_number: String,
    transactions: Vec<Transaction>,
    total_count: usize,
}

#[allow(clippy::too_many_arguments)]
pub async fn run(
    account: &str,
    date_from: Option<&str>,
    date_to: Option<&str>,
    limit: Option<u32>,
    reference_id: Option<String>,
    amount_in: Option<Decimal>,
    amount_out: Option<Decimal>,
    json: bool,
) -> Result<()> {
    let query = HistoryQuery {
        date_from: date_from.map(parse_datetime).transpose()?,
        date_to: date_to.map(parse_datetime).transpose()?,
        limit,
        reference_id,
        amount_in,
        amount_out,
    };

    let ctx = get_context()?;
    let transactions = match ctx
        .banking_service
        .get_transaction_history(account, &query)
        .await
    {
        Ok(txs) => txs,
        Err(e) if json => return fail_json::<HistoryData>(e),
        Err(e) => return Err(e.into()),
    };

    if json {
        let data = HistoryData {
            account_number: account.to_string(),
            total_count: transactions.len(),
            transactions,
        };
        return print_envelope(&ResponseEnvelope::ok(data));
    }

    if transactions.is_empty() {
        output::info(&format!("No transactions found for account {}", account));
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Date", "Bank", "In", "Out", "Balance", "Content"]);
    for tx in &transactions {
        table.add_row(vec![
            tx.id.clone(),
            tx.transaction_date.format("%Y-%m-%d %H:%M").to_string(),
            tx.bank_name.to_string(),
            output::format_amount(tx.amount_in),
            output::format_amount(tx.amount_out),
            output::format_amount(tx.accumulated),
            tx.transaction_content.clone().unwrap_or_default(),
        ]);
    }

    println!("{}", table);
    println!();
    output::info(&format!(
        "{} transaction(s) for account {}",
        transactions.len(),
        account
    ));

    Ok(())
}
