use crate::domain::{Money, Participant};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Ledger rejected event: {0}")]
    Ledger(#[from] LedgerError),
}

/// Reasons a participant change or expense submission is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("participant name is blank")]
    BlankParticipant,

    #[error("participant {0} already exists")]
    DuplicateParticipant(Participant),

    #[error("participant {0} is not in the ledger")]
    UnknownParticipant(String),

    #[error("participant {0} is referenced by a recorded expense")]
    ParticipantInUse(Participant),

    #[error("expense amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    #[error("expense of {0} would overflow the ledger total")]
    AmountOverflow(Money),
}
