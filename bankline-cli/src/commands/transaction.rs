//! Transaction command - look up a single transaction by ID

use anyhow::Result;

use bankline_core::{ResponseEnvelope, Transaction};

use super::{fail_json, get_context, print_envelope};
use crate::output;

pub async fn run(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let found = match ctx.banking_service.get_transaction(id).await {
        Ok(found) => found,
        Err(e) if json => return fail_json::<Transaction>(e),
        Err(e) => return Err(e.into()),
    };

    let Some(tx) = found else {
        // Absence is a clean outcome, not a failure
        if json {
            let mut envelope = ResponseEnvelope::<Transaction>::fail_with_message(format!(
                "Transaction {} not found",
                id
            ));
            envelope.error_code = Some("NOT_FOUND".to_string());
            return print_envelope(&envelope);
        }
        output::warning(&format!("Transaction {} not found", id));
        return Ok(());
    };

    if json {
        return print_envelope(&ResponseEnvelope::ok(tx));
    }

    let mut table = output::create_table();
    table.add_row(vec!["ID", &tx.id]);
    table.add_row(vec![
        "Date",
        &tx.transaction_date.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec!["Account", &tx.account_number]);
    table.add_row(vec!["Bank", &tx.bank_name.to_string()]);
    if let Some(sub) = &tx.sub_account {
        table.add_row(vec!["Sub-account", sub]);
    }
    table.add_row(vec!["Amount in", &output::format_amount(tx.amount_in)]);
    table.add_row(vec!["Amount out", &output::format_amount(tx.amount_out)]);
    table.add_row(vec!["Balance", &output::format_amount(tx.accumulated)]);
    if let Some(code) = &tx.code {
        table.add_row(vec!["Code", code]);
    }
    if let Some(content) = &tx.transaction_content {
        table.add_row(vec!["Content", content]);
    }
    if let Some(reference) = &tx.reference_number {
        table.add_row(vec!["Reference", reference]);
    }

    println!("{}", table);
    Ok(())
}
