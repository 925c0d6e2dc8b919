//! End-to-end tests: BankingService -> SePayClient -> mock SePay server
//!
//! These exercise the full chain over real HTTP, including the wire-format
//! quirks the client has to normalize.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use bankline_core::adapters::sepay::SePayClient;
use bankline_core::adapters::sepay_mock::{MockConfig, MockSePayServer};
use bankline_core::domain::result::Error;
use bankline_core::services::BankingService;
use bankline_core::{CountQuery, HistoryQuery};

fn service_for(server: &MockSePayServer) -> BankingService {
    let client =
        SePayClient::with_base_url("test_key", &server.base_url(), Duration::from_secs(5))
            .expect("client construction");
    BankingService::new(Arc::new(client))
}

#[tokio::test]
async fn history_round_trip() {
    let server = MockSePayServer::start(MockConfig::default()).unwrap();
    let service = service_for(&server);

    let txs = service
        .get_transaction_history("1234567890", &HistoryQuery::default())
        .await
        .unwrap();

    assert_eq!(txs.len(), 5);
    assert_eq!(txs[0].account_number, "1234567890");
    assert_eq!(txs[0].bank_name.to_string(), "MBBANK");
    // First mock record is an inflow of 1,000,000 with no outflow
    assert_eq!(txs[0].amount_in, Decimal::new(1_000_000, 0));
    assert_eq!(txs[0].amount_out, Decimal::ZERO);
}

#[tokio::test]
async fn history_respects_limit() {
    let server = MockSePayServer::start(MockConfig::default()).unwrap();
    let service = service_for(&server);

    let query = HistoryQuery {
        limit: Some(2),
        ..Default::default()
    };
    let txs = service
        .get_transaction_history("1234567890", &query)
        .await
        .unwrap();
    assert_eq!(txs.len(), 2);
}

#[tokio::test]
async fn history_fails_batch_on_unknown_bank() {
    let server = MockSePayServer::start(MockConfig {
        bank_label: "Mystery Bank".to_string(),
        ..Default::default()
    })
    .unwrap();
    let service = service_for(&server);

    let result = service
        .get_transaction_history("1234567890", &HistoryQuery::default())
        .await;
    match result {
        Err(Error::UnsupportedBank(label)) => assert_eq!(label, "Mystery Bank"),
        other => panic!("expected UnsupportedBank, got {:?}", other),
    }
}

#[tokio::test]
async fn balance_prefers_reported_accumulated() {
    let server = MockSePayServer::start(MockConfig {
        final_accumulated: 5_000_000,
        ..Default::default()
    })
    .unwrap();
    let service = service_for(&server);

    let balance = service.get_balance("1234567890").await.unwrap();
    assert_eq!(balance, Decimal::new(5_000_000, 0));
}

#[tokio::test]
async fn balance_sums_deltas_when_unreported() {
    let server = MockSePayServer::start(MockConfig::default()).unwrap();
    let service = service_for(&server);

    // Mock data: in 1,000,000 + 300,000; out 250,000 + 420,000 + 45,000
    let balance = service.get_balance("1234567890").await.unwrap();
    assert_eq!(balance, Decimal::new(585_000, 0));
}

#[tokio::test]
async fn count_is_passed_through() {
    let server = MockSePayServer::start(MockConfig {
        num_transactions: 42,
        ..Default::default()
    })
    .unwrap();
    let service = service_for(&server);

    let count = service
        .get_transactions_count("1234567890", &CountQuery::default())
        .await
        .unwrap();
    assert_eq!(count, 42);
}

#[tokio::test]
async fn lookup_normalizes_by_id_field_name() {
    // The by-id route labels the bank `bank_name` instead of
    // `bank_brand_name`; the record must map all the same.
    let server = MockSePayServer::start(MockConfig::default()).unwrap();
    let service = service_for(&server);

    let tx = service.get_transaction("92704").await.unwrap().unwrap();
    assert_eq!(tx.id, "92704");
    assert_eq!(tx.bank_name.to_string(), "MBBANK");
    assert_eq!(tx.sub_account.as_deref(), Some("SUB01"));
}

#[tokio::test]
async fn lookup_of_unknown_id_is_none() {
    let server = MockSePayServer::start(MockConfig::default()).unwrap();
    let service = service_for(&server);

    let tx = service.get_transaction("does-not-exist").await.unwrap();
    assert!(tx.is_none());
}

#[tokio::test]
async fn auth_failure_surfaces_as_upstream_error() {
    let server = MockSePayServer::start(MockConfig {
        fail_auth: true,
        ..Default::default()
    })
    .unwrap();
    let service = service_for(&server);

    let result = service
        .get_transaction_history("1234567890", &HistoryQuery::default())
        .await;
    match result {
        Err(Error::Upstream(msg)) => assert!(msg.contains("authentication")),
        other => panic!("expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn rate_limit_surfaces_as_upstream_error() {
    let server = MockSePayServer::start(MockConfig {
        rate_limit: true,
        ..Default::default()
    })
    .unwrap();
    let service = service_for(&server);

    let result = service
        .get_transactions_count("1234567890", &CountQuery::default())
        .await;
    match result {
        Err(Error::Upstream(msg)) => assert!(msg.contains("rate limit")),
        other => panic!("expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_refused_surfaces_as_upstream_error() {
    // Bind-then-drop to grab a port nothing is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = SePayClient::with_base_url(
        "test_key",
        &format!("http://127.0.0.1:{}", port),
        Duration::from_secs(2),
    )
    .unwrap();
    let service = BankingService::new(Arc::new(client));

    let result = service.get_transaction("92704").await;
    assert!(matches!(result, Err(Error::Upstream(_))));
}
