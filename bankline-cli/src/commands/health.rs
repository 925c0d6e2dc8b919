//! Health command - report provider configuration state

use anyhow::Result;
use serde::Serialize;

use bankline_core::ResponseEnvelope;

use super::{get_bankline_dir, print_envelope};
use crate::output;

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

pub async fn run(json: bool) -> Result<()> {
    let bankline_dir = get_bankline_dir();
    std::fs::create_dir_all(&bankline_dir)?;

    let report = match bankline_core::BanklineContext::new(&bankline_dir) {
        Ok(_) => HealthReport {
            status: "healthy",
            provider: "sepay",
            detail: None,
        },
        Err(e) => HealthReport {
            status: "degraded",
            provider: "sepay",
            detail: Some(e.to_string()),
        },
    };

    if json {
        return print_envelope(&ResponseEnvelope::ok(report));
    }

    if report.status == "healthy" {
        output::success("Provider sepay: healthy");
    } else {
        output::warning("Provider sepay: degraded");
        if let Some(detail) = &report.detail {
            output::info(detail);
        }
    }
    Ok(())
}
