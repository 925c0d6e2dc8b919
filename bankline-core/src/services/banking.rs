//! Banking service - the domain query contract
//!
//! Sole implementer of the query operations the presentation layer calls.
//! Knows nothing about HTTP or the provider's wire format; it validates,
//! delegates fetching to the provider port, and maps results into domain
//! entities.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::balance::derive_balance;
use crate::domain::result::Result;
use crate::domain::{CountQuery, HistoryQuery, Transaction};
use crate::ports::TransactionProvider;
use crate::services::mapping::map_transaction;

/// Banking query service
pub struct BankingService {
    provider: Arc<dyn TransactionProvider>,
}

impl BankingService {
    pub fn new(provider: Arc<dyn TransactionProvider>) -> Self {
        Self { provider }
    }

    /// Name of the provider integration backing this service
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Get transaction history for an account
    ///
    /// Fails the entire batch if the fetch fails or any record fails to
    /// map; a silently incomplete transaction list is worse than an
    /// explicit error.
    pub async fn get_transaction_history(
        &self,
        account_number: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<Transaction>> {
        query.validate(account_number)?;

        let records = self.provider.get_transactions(account_number, query).await?;
        debug!(
            account_number,
            records = records.len(),
            "fetched transaction records"
        );

        let transactions = records
            .iter()
            .map(map_transaction)
            .collect::<Result<Vec<_>>>()?;

        info!(
            account_number,
            count = transactions.len(),
            "transaction history retrieved"
        );
        Ok(transactions)
    }

    /// Get the number of transactions for an account
    ///
    /// Pure pass-through of the provider's count; no domain entity is
    /// produced, so nothing is mapped.
    pub async fn get_transactions_count(
        &self,
        account_number: &str,
        query: &CountQuery,
    ) -> Result<u64> {
        query.validate(account_number)?;

        let count = self
            .provider
            .get_transactions_count(account_number, query)
            .await?;
        info!(account_number, count, "transaction count retrieved");
        Ok(count)
    }

    /// Look up a single transaction by provider ID
    ///
    /// Returns `Ok(None)` when no such transaction exists; errors only on
    /// transport or mapping failure. Callers must keep "not found"
    /// distinct from "lookup failed".
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let record = self.provider.get_transaction_by_id(transaction_id).await?;

        match record {
            Some(record) => {
                let tx = map_transaction(&record)?;
                info!(transaction_id, "transaction retrieved");
                Ok(Some(tx))
            }
            None => {
                info!(transaction_id, "transaction not found");
                Ok(None)
            }
        }
    }

    /// Derive the current balance for an account from its history
    ///
    /// Fetches an unfiltered history page and applies the balance
    /// derivation policy (see [`derive_balance`]). Only as accurate as
    /// the history the provider returns.
    pub async fn get_balance(&self, account_number: &str) -> Result<Decimal> {
        let transactions = self
            .get_transaction_history(account_number, &HistoryQuery::default())
            .await?;

        let balance = derive_balance(&transactions);
        info!(account_number, %balance, "balance derived");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use crate::ports::TransferRecord;
    use async_trait::async_trait;

    /// In-memory provider for service-level tests
    struct FakeProvider {
        records: Vec<TransferRecord>,
        count: u64,
        by_id: Option<TransferRecord>,
        fail_with: Option<String>,
    }

    impl FakeProvider {
        fn with_records(records: Vec<TransferRecord>) -> Self {
            Self {
                records,
                count: 0,
                by_id: None,
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                records: vec![],
                count: 0,
                by_id: None,
                fail_with: Some(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl TransactionProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn get_transactions(
            &self,
            _account_number: &str,
            _query: &HistoryQuery,
        ) -> Result<Vec<TransferRecord>> {
            match &self.fail_with {
                Some(msg) => Err(Error::upstream(msg.clone())),
                None => Ok(self.records.clone()),
            }
        }

        async fn get_transactions_count(
            &self,
            _account_number: &str,
            _query: &CountQuery,
        ) -> Result<u64> {
            match &self.fail_with {
                Some(msg) => Err(Error::upstream(msg.clone())),
                None => Ok(self.count),
            }
        }

        async fn get_transaction_by_id(
            &self,
            _transaction_id: &str,
        ) -> Result<Option<TransferRecord>> {
            match &self.fail_with {
                Some(msg) => Err(Error::upstream(msg.clone())),
                None => Ok(self.by_id.clone()),
            }
        }
    }

    fn record(id: &str, bank: &str, amount_in: Option<i64>, accumulated: Option<i64>) -> TransferRecord {
        TransferRecord {
            id: id.to_string(),
            transaction_date: "2025-01-15 10:30:00".to_string(),
            account_number: "1234567890".to_string(),
            bank_name: bank.to_string(),
            sub_account: None,
            amount_in: amount_in.map(|v| Decimal::new(v, 0)),
            amount_out: None,
            accumulated: accumulated.map(|v| Decimal::new(v, 0)),
            code: None,
            transaction_content: None,
            reference_number: None,
        }
    }

    fn service(provider: FakeProvider) -> BankingService {
        BankingService::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_history_maps_all_records() {
        let svc = service(FakeProvider::with_records(vec![
            record("1", "MB Bank", Some(1_000_000), None),
            record("2", "MBBANK", None, None),
        ]));

        let txs = svc
            .get_transaction_history("1234567890", &HistoryQuery::default())
            .await
            .unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount_in, Decimal::new(1_000_000, 0));
        assert_eq!(txs[1].amount_in, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_history_fails_whole_batch_on_unknown_bank() {
        let svc = service(FakeProvider::with_records(vec![
            record("1", "MB Bank", Some(1_000_000), None),
            record("2", "Mystery Bank", None, None),
        ]));

        let result = svc
            .get_transaction_history("1234567890", &HistoryQuery::default())
            .await;
        assert!(matches!(result, Err(Error::UnsupportedBank(_))));
    }

    #[tokio::test]
    async fn test_history_validates_before_fetch() {
        // A failing provider is never reached when validation rejects the input
        let svc = service(FakeProvider::failing("should not be called"));

        let result = svc.get_transaction_history("", &HistoryQuery::default()).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_count_passes_through() {
        let mut provider = FakeProvider::with_records(vec![]);
        provider.count = 42;
        let svc = service(provider);

        let count = svc
            .get_transactions_count("1234567890", &CountQuery::default())
            .await
            .unwrap();
        assert_eq!(count, 42);
    }

    #[tokio::test]
    async fn test_get_transaction_absent_is_none() {
        let svc = service(FakeProvider::with_records(vec![]));
        let result = svc.get_transaction("nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_transaction_present_is_mapped() {
        let mut provider = FakeProvider::with_records(vec![]);
        provider.by_id = Some(record("92704", "MB Bank", Some(500_000), Some(2_000_000)));
        let svc = service(provider);

        let tx = svc.get_transaction("92704").await.unwrap().unwrap();
        assert_eq!(tx.id, "92704");
        assert_eq!(tx.accumulated, Decimal::new(2_000_000, 0));
    }

    #[tokio::test]
    async fn test_get_transaction_transport_failure_is_error() {
        let svc = service(FakeProvider::failing("connection refused"));
        let result = svc.get_transaction("92704").await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[tokio::test]
    async fn test_balance_uses_last_accumulated() {
        let svc = service(FakeProvider::with_records(vec![
            record("1", "MB Bank", Some(1_000_000), None),
            record("2", "MB Bank", None, Some(5_000_000)),
        ]));

        let balance = svc.get_balance("1234567890").await.unwrap();
        assert_eq!(balance, Decimal::new(5_000_000, 0));
    }

    #[tokio::test]
    async fn test_balance_sums_deltas_without_accumulated() {
        let svc = service(FakeProvider::with_records(vec![record(
            "1",
            "MB Bank",
            Some(1_000_000),
            None,
        )]));

        let balance = svc.get_balance("1234567890").await.unwrap();
        assert_eq!(balance, Decimal::new(1_000_000, 0));
    }

    #[tokio::test]
    async fn test_balance_empty_history_is_zero() {
        let svc = service(FakeProvider::with_records(vec![]));
        let balance = svc.get_balance("1234567890").await.unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_balance_propagates_upstream_failure() {
        let svc = service(FakeProvider::failing("boom"));
        let result = svc.get_balance("1234567890").await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }
}
