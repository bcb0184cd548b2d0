use crate::domain::expense::TIMESTAMP_FORMAT;
use crate::domain::{
    Expense, ExpenseDraft, LedgerError, LedgerEvent, Money, Participant, ParticipantSet,
};

/// Participants and the expenses recorded between them.
///
/// All validation happens here, so anything that reaches the settlement
/// engine through a ledger satisfies the expense invariants.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    participants: ParticipantSet,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(Expense::amount).sum()
    }

    pub fn apply(&mut self, event: LedgerEvent) -> Result<(), LedgerError> {
        match event {
            LedgerEvent::AddParticipant { name } => self.add_participant(&name).map(|_| ()),
            LedgerEvent::RemoveParticipant { name } => {
                self.remove_participant(&name).map(|_| ())
            }
            LedgerEvent::RecordExpense(draft) => self.record_expense(draft).map(|_| ()),
        }
    }

    pub fn add_participant(&mut self, name: &str) -> Result<Participant, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::BlankParticipant);
        }

        let participant = Participant::new(name);
        if !self.participants.insert(participant.clone()) {
            return Err(LedgerError::DuplicateParticipant(participant));
        }
        Ok(participant)
    }

    /// Participants referenced by a recorded expense cannot be removed.
    pub fn remove_participant(&mut self, name: &str) -> Result<Participant, LedgerError> {
        let participant = self.known(name)?;
        if self.expenses.iter().any(|e| e.involves(participant.name())) {
            return Err(LedgerError::ParticipantInUse(participant));
        }

        self.participants
            .remove(participant.name())
            .ok_or_else(|| LedgerError::UnknownParticipant(participant.to_string()))
    }

    pub fn record_expense(&mut self, draft: ExpenseDraft) -> Result<&Expense, LedgerError> {
        if !draft.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount(draft.amount));
        }
        // every per-payer total and fair share is bounded by the ledger total
        if self.total_spent().checked_add(draft.amount).is_none() {
            return Err(LedgerError::AmountOverflow(draft.amount));
        }

        let payer = self.known(&draft.payer)?;
        let split_among = if draft.split_among.is_empty() {
            self.participants.clone()
        } else {
            draft
                .split_among
                .iter()
                .map(|name| self.known(name))
                .collect::<Result<ParticipantSet, _>>()?
        };

        let timestamp = draft
            .timestamp
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());

        let index = self.expenses.len();
        self.expenses.push(Expense::new(
            payer,
            draft.amount,
            split_among,
            draft.description,
            timestamp,
        ));
        Ok(&self.expenses[index])
    }

    fn known(&self, name: &str) -> Result<Participant, LedgerError> {
        let name = name.trim();
        self.participants
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownParticipant(name.to_string()))
    }
}
