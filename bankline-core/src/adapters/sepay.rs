//! SePay API client
//!
//! Handles communication with the SePay user API for transaction queries.
//! SePay is the single upstream banking-data provider; this module is the
//! only place that knows its wire format.
//!
//! API base: https://my.sepay.vn/userapi

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{CountQuery, HistoryQuery};
use crate::ports::{TransactionProvider, TransferRecord};

/// Default production API URL
const SEPAY_PRODUCTION_URL: &str = "https://my.sepay.vn/userapi";

/// Environment variable holding the API credential
pub const SEPAY_API_KEY_ENV: &str = "SEPAY_API_KEY";

/// Environment variable to override the SePay API base URL.
/// Set this to point at a staging/mock server for testing.
pub const SEPAY_BASE_URL_ENV: &str = "SEPAY_BASE_URL";

/// Default bound on a single upstream request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Get the SePay base URL, checking the environment variable first
pub fn get_base_url() -> String {
    std::env::var(SEPAY_BASE_URL_ENV).unwrap_or_else(|_| SEPAY_PRODUCTION_URL.to_string())
}

// =============================================================================
// API Response Models (matching the SePay wire format)
// =============================================================================

/// SePay transaction record from the API
///
/// The list route labels the bank `bank_brand_name`, the by-id route
/// labels it `bank_name`; the serde alias folds both spellings into one
/// field so the rest of the system never sees the inconsistency.
#[derive(Debug, Clone, Deserialize)]
struct SePayTransaction {
    /// Transaction ID (API returns number or string, we accept both)
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    transaction_date: String,
    account_number: String,
    #[serde(alias = "bank_brand_name")]
    bank_name: String,
    #[serde(default)]
    sub_account: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    amount_in: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    amount_out: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    accumulated: Option<Decimal>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    transaction_content: Option<String>,
    #[serde(default)]
    reference_number: Option<String>,
}

/// Wrapper for the transactions list response
#[derive(Debug, Deserialize)]
struct TransactionsListResponse {
    #[serde(default)]
    transactions: Vec<SePayTransaction>,
}

/// Wrapper for the transactions count response
#[derive(Debug, Deserialize)]
struct TransactionsCountResponse {
    #[serde(default)]
    count_transactions: u64,
}

/// Wrapper for the single transaction response
///
/// A missing or null `transaction` key means "no such record" and is not
/// an error.
#[derive(Debug, Deserialize)]
struct SingleTransactionResponse {
    #[serde(default)]
    transaction: Option<SePayTransaction>,
}

/// Deserialize an ID that can be number or string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize an amount that can be number, string, or null
fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => n
            .to_string()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        Some(JsonValue::String(s)) => s
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

impl From<SePayTransaction> for TransferRecord {
    fn from(tx: SePayTransaction) -> Self {
        TransferRecord {
            id: tx.id,
            transaction_date: tx.transaction_date,
            account_number: tx.account_number,
            bank_name: tx.bank_name,
            sub_account: tx.sub_account,
            amount_in: tx.amount_in,
            amount_out: tx.amount_out,
            accumulated: tx.accumulated,
            code: tx.code,
            transaction_content: tx.transaction_content,
            reference_number: tx.reference_number,
        }
    }
}

// =============================================================================
// SePay HTTP Client
// =============================================================================

/// SePay API client
///
/// Stateless apart from the immutable credential; one instance can serve
/// any number of concurrent requests.
#[derive(Debug)]
pub struct SePayClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SePayClient {
    /// Create a new SePay client.
    ///
    /// The credential is taken from the argument, falling back to the
    /// `SEPAY_API_KEY` environment variable. A missing credential is a
    /// fatal configuration error, never retried. Uses the
    /// `SEPAY_BASE_URL` environment variable if set, otherwise the
    /// production API.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        let resolved = match api_key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => std::env::var(SEPAY_API_KEY_ENV).unwrap_or_default(),
        };

        if resolved.is_empty() {
            return Err(Error::config(format!(
                "SePay API key is required. Set the `{}` environment variable or pass it explicitly.",
                SEPAY_API_KEY_ENV
            )));
        }

        Self::with_base_url(&resolved, &get_base_url(), DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout.
    ///
    /// Prefer `new()` with the `SEPAY_BASE_URL` env var for testing.
    pub fn with_base_url(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::config("SePay API key cannot be empty"));
        }

        let parsed = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid SePay base URL: {}", e)))?;

        // Plain HTTP is only accepted for loopback test servers
        let host = parsed.host_str().unwrap_or("");
        let is_loopback = host == "localhost" || host == "127.0.0.1" || host == "::1";
        if parsed.scheme() != "https" && !is_loopback {
            return Err(Error::config("SePay base URL must use HTTPS"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_parsed<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!(url, "sepay request");

        let response = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(map_request_error)?;

        check_response_status(&response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| Error::upstream(format!("Failed to parse SePay response: {}", e)))
    }
}

/// Map request errors to diagnosable upstream errors
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::upstream("SePay request timed out")
    } else if error.is_connect() {
        Error::upstream(format!("Unable to connect to SePay servers: {}", error))
    } else {
        Error::upstream(format!("SePay request failed: {}", error))
    }
}

/// Check response status and return appropriate errors
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status().as_u16() {
        200 => Ok(()),
        401 | 403 => Err(Error::upstream(
            "SePay authentication failed. Your API key may be invalid or revoked.",
        )),
        429 => Err(Error::upstream(
            "SePay rate limit exceeded. Please wait a moment and try again.",
        )),
        status => Err(Error::upstream(format!("SePay API error: HTTP {}", status))),
    }
}

#[async_trait]
impl TransactionProvider for SePayClient {
    fn name(&self) -> &str {
        "sepay"
    }

    async fn get_transactions(
        &self,
        account_number: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<TransferRecord>> {
        let url = format!("{}/transactions/list", self.base_url);

        let mut params = vec![("account_number", account_number.to_string())];
        if let Some(from) = query.date_from {
            params.push(("transaction_date_min", format_date_param(from)));
        }
        if let Some(to) = query.date_to {
            params.push(("transaction_date_max", format_date_param(to)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(reference_id) = &query.reference_id {
            params.push(("reference_id", reference_id.clone()));
        }
        if let Some(amount_in) = query.amount_in {
            params.push(("amount_in", amount_in.to_string()));
        }
        if let Some(amount_out) = query.amount_out {
            params.push(("amount_out", amount_out.to_string()));
        }

        let data: TransactionsListResponse = self.get_parsed(&url, &params).await?;
        Ok(data.transactions.into_iter().map(Into::into).collect())
    }

    async fn get_transactions_count(
        &self,
        account_number: &str,
        query: &CountQuery,
    ) -> Result<u64> {
        let url = format!("{}/transactions/count", self.base_url);

        let mut params = vec![("account_number", account_number.to_string())];
        if let Some(from) = query.date_from {
            params.push(("transaction_date_min", format_date_param(from)));
        }
        if let Some(to) = query.date_to {
            params.push(("transaction_date_max", format_date_param(to)));
        }
        if let Some(id_from) = &query.id_from {
            params.push(("since_id", id_from.clone()));
        }

        let data: TransactionsCountResponse = self.get_parsed(&url, &params).await?;
        Ok(data.count_transactions)
    }

    async fn get_transaction_by_id(&self, transaction_id: &str) -> Result<Option<TransferRecord>> {
        let url = format!("{}/transactions/{}", self.base_url, transaction_id);

        let data: SingleTransactionResponse = self.get_parsed(&url, &[]).await?;
        Ok(data.transaction.map(Into::into))
    }
}

/// Format a datetime the way the SePay query API expects it
fn format_date_param(value: chrono::NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}
