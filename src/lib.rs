//! Expense splitting: record who paid for what, then work out who owes whom.
//!
//! [`settlement::compute_balances`] and [`settlement::compute_transfers`] are
//! the pure core. [`engine::Engine`] drives a CSV event log through a
//! [`domain::Ledger`] and publishes the result.

pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod policy;
pub mod report;
pub mod settlement;

pub use domain::{Balances, Error, Expense, Ledger, Money, Participant, ParticipantSet, Transfer};
pub use settlement::{SettlementEngine, compute_balances, compute_transfers};
