use indexmap::IndexMap;

use crate::domain::{Expense, Money, Participant, ParticipantSet, SharePolicy};

/// Splits the whole pool evenly across every current participant.
///
/// Each expense's `split_among` set is ignored: someone who was not part of a
/// given expense still owes an equal share of it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EqualSplit;

impl SharePolicy for EqualSplit {
    fn fair_shares(
        &self,
        participants: &ParticipantSet,
        expenses: &[Expense],
    ) -> IndexMap<Participant, Money> {
        let total: Money = expenses.iter().map(Expense::amount).sum();
        let per_person = total.split(participants.len()).unwrap_or(Money::ZERO);

        participants.iter().map(|p| (p.clone(), per_person)).collect()
    }
}

/// Charges each expense only to the participants it was split among.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerExpenseSplit;

impl SharePolicy for PerExpenseSplit {
    fn fair_shares(
        &self,
        participants: &ParticipantSet,
        expenses: &[Expense],
    ) -> IndexMap<Participant, Money> {
        let mut shares: IndexMap<Participant, Money> =
            participants.iter().map(|p| (p.clone(), Money::ZERO)).collect();

        for expense in expenses {
            let Some(share) = expense.amount().split(expense.split_among().len()) else {
                continue;
            };
            for member in expense.split_among() {
                match shares.get_mut(member.name()) {
                    Some(owed) => *owed += share,
                    None => debug_assert!(false, "split member {member} is not a participant"),
                }
            }
        }

        shares
    }
}

/// Runtime choice between the two share policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    #[default]
    Equal,
    PerExpense,
}

impl SharePolicy for SplitPolicy {
    fn fair_shares(
        &self,
        participants: &ParticipantSet,
        expenses: &[Expense],
    ) -> IndexMap<Participant, Money> {
        match self {
            SplitPolicy::Equal => EqualSplit.fair_shares(participants, expenses),
            SplitPolicy::PerExpense => PerExpenseSplit.fair_shares(participants, expenses),
        }
    }
}
