use crate::domain::{Money, Participant, ParticipantSet};

/// Format used when an expense is recorded without an explicit timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A recorded expense. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    payer: Participant,
    amount: Money,
    split_among: ParticipantSet,
    description: String,
    timestamp: String,
}

impl Expense {
    /// Builds an expense without checking it against any ledger.
    ///
    /// `Ledger::record_expense` is the validating path; this constructor exists
    /// for callers that hold already-validated records.
    pub fn new(
        payer: Participant,
        amount: Money,
        split_among: ParticipantSet,
        description: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        debug_assert!(amount.is_positive(), "expense amount must be positive");
        debug_assert!(!split_among.is_empty(), "expense must have a split set");
        Self {
            payer,
            amount,
            split_among,
            description: description.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn payer(&self) -> &Participant {
        &self.payer
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn split_among(&self) -> &ParticipantSet {
        &self.split_among
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Whether the expense names `name` as payer or split member.
    pub fn involves(&self, name: &str) -> bool {
        self.payer.name() == name || self.split_among.contains(name)
    }
}

/// An expense submission that has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub payer: String,
    pub amount: Money,
    /// Empty means everyone currently in the ledger.
    pub split_among: Vec<String>,
    pub description: String,
    pub timestamp: Option<String>,
}

impl ExpenseDraft {
    pub fn new(payer: impl Into<String>, amount: Money) -> Self {
        Self {
            payer: payer.into(),
            amount,
            split_among: Vec::new(),
            description: String::new(),
            timestamp: None,
        }
    }

    pub fn split_among<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.split_among = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
