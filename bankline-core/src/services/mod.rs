//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

mod banking;
pub mod mapping;

pub use banking::BankingService;
