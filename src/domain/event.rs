use crate::domain::ExpenseDraft;

/// One change to a ledger, as read from the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    AddParticipant { name: String },
    RemoveParticipant { name: String },
    RecordExpense(ExpenseDraft),
}

impl core::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LedgerEvent::AddParticipant { name } => write!(f, "add,name={}", name),
            LedgerEvent::RemoveParticipant { name } => write!(f, "remove,name={}", name),
            LedgerEvent::RecordExpense(draft) => write!(
                f,
                "expense,payer={},amount={},split={}",
                draft.payer,
                draft.amount,
                draft.split_among.join(";")
            ),
        }
    }
}
