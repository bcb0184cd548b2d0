pub mod balance;
pub mod error;
pub mod event;
pub mod expense;
pub mod ledger;
pub mod money;
pub mod participant;
pub mod traits;
pub mod transfer;

pub use balance::{Balances, ParticipantSummary, Settlement};
pub use error::{Error, LedgerError};
pub use event::LedgerEvent;
pub use expense::{Expense, ExpenseDraft};
pub use ledger::Ledger;
pub use money::Money;
pub use participant::{Participant, ParticipantSet};
pub use traits::{DeadLetterQueue, EventStream, SettlementOutput, SharePolicy};
pub use transfer::Transfer;
