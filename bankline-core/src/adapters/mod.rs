//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - SePay HTTP client for TransactionProvider
//! - Mock SePay server for tests that need a live HTTP endpoint

pub mod sepay;
pub mod sepay_mock;
