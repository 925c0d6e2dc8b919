//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod bank;
pub mod balance;
mod query;
pub mod result;
mod transaction;

pub use bank::SupportedBank;
pub use query::{CountQuery, HistoryQuery, MAX_ACCOUNT_NUMBER_LEN, MAX_HISTORY_LIMIT};
pub use transaction::Transaction;
