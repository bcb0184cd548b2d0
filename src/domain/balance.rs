use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{Money, Participant, Transfer};

/// Net balance per participant, in participant order.
///
/// Positive balances are owed money, negative balances owe money.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    entries: IndexMap<Participant, Money>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Money> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Participant, Money)> + '_ {
        self.entries.iter().map(|(p, m)| (p, *m))
    }

    /// Sum of all balances. Zero up to rounding for a consistent ledger.
    pub fn total(&self) -> Money {
        self.entries.values().sum()
    }

    /// Participants owed more than `tolerance`, with the amount owed to them.
    pub fn creditors(&self, tolerance: Money) -> Vec<(&Participant, Money)> {
        self.iter().filter(|(_, b)| *b > tolerance).collect()
    }

    /// Participants owing more than `tolerance`, with the amount they owe.
    pub fn debtors(&self, tolerance: Money) -> Vec<(&Participant, Money)> {
        self.iter()
            .filter(|(_, b)| *b < -tolerance)
            .map(|(p, b)| (p, -b))
            .collect()
    }

    /// Balances left over once `transfers` have been paid.
    pub fn after(&self, transfers: &[Transfer]) -> Balances {
        let mut entries = self.entries.clone();
        for transfer in transfers {
            if let Some(from) = entries.get_mut(transfer.from.name()) {
                *from += transfer.amount;
            }
            if let Some(to) = entries.get_mut(transfer.to.name()) {
                *to -= transfer.amount;
            }
        }
        Balances { entries }
    }
}

impl FromIterator<(Participant, Money)> for Balances {
    fn from_iter<T: IntoIterator<Item = (Participant, Money)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One row of the balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub participant: Participant,
    pub total_paid: Money,
    pub fair_share: Money,
    pub balance: Money,
}

/// Everything computed for one ledger snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub summary: Vec<ParticipantSummary>,
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    pub fn total_spent(&self) -> Money {
        self.summary.iter().map(|row| row.total_paid).sum()
    }

    /// No payments are needed.
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
