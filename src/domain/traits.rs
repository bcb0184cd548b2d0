use futures::Stream;
use indexmap::IndexMap;

use crate::domain::{Error, Expense, LedgerEvent, Money, Participant, ParticipantSet, Settlement};

pub trait EventStream {
    type Events: Stream<Item = Result<LedgerEvent, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::Events;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait SettlementOutput {
    fn publish(&mut self, settlement: &Settlement) -> Result<(), Error>;
}

/// Decides how much of the group's spending each participant is responsible for.
pub trait SharePolicy {
    /// Returns one entry per participant, in participant order.
    fn fair_shares(
        &self,
        participants: &ParticipantSet,
        expenses: &[Expense],
    ) -> IndexMap<Participant, Money>;
}
