use indexmap::IndexMap;

use crate::domain::{
    Balances, Expense, Ledger, Money, Participant, ParticipantSet, ParticipantSummary, Settlement,
    SharePolicy, Transfer,
};
use crate::policy::SplitPolicy;

/// Net balance of every participant under an even split of the whole pool.
pub fn compute_balances(participants: &ParticipantSet, expenses: &[Expense]) -> Balances {
    SettlementEngine::default().balances(participants, expenses)
}

/// Transfers that clear `balances`, using a one-cent tolerance.
pub fn compute_transfers(balances: &Balances) -> Vec<Transfer> {
    SettlementEngine::default().transfers(balances)
}

/// Turns participants and expenses into balances and settling transfers.
///
/// The engine holds no state between calls: every method is a function of its
/// arguments.
#[derive(Debug, Clone)]
pub struct SettlementEngine<P = SplitPolicy> {
    policy: P,
    tolerance: Money,
}

impl Default for SettlementEngine<SplitPolicy> {
    fn default() -> Self {
        Self::new(SplitPolicy::default())
    }
}

impl<P: SharePolicy> SettlementEngine<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            tolerance: Money::CENT,
        }
    }

    /// Balances within `tolerance` of zero count as settled.
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    pub fn settle(&self, ledger: &Ledger) -> Settlement {
        let summary = self.summarize(ledger.participants(), ledger.expenses());
        let balances: Balances = summary
            .iter()
            .map(|row| (row.participant.clone(), row.balance))
            .collect();
        let transfers = self.transfers(&balances);

        for transfer in &transfers {
            tracing::debug!(%transfer, "settling transfer");
        }
        tracing::debug!(
            participants = summary.len(),
            expenses = ledger.expenses().len(),
            transfers = transfers.len(),
            "settled ledger"
        );

        Settlement {
            summary,
            balances,
            transfers,
        }
    }

    /// Paid, owed and net amount for each participant, in participant order.
    ///
    /// An empty participant set yields an empty summary.
    pub fn summarize(
        &self,
        participants: &ParticipantSet,
        expenses: &[Expense],
    ) -> Vec<ParticipantSummary> {
        if participants.is_empty() {
            tracing::debug!(
                expenses = expenses.len(),
                "no participants, nothing to settle"
            );
            return Vec::new();
        }

        let mut paid: IndexMap<&Participant, Money> =
            participants.iter().map(|p| (p, Money::ZERO)).collect();
        for expense in expenses {
            match paid.get_mut(expense.payer()) {
                Some(total) => *total += expense.amount(),
                None => debug_assert!(false, "payer {} is not a participant", expense.payer()),
            }
        }

        let shares = self.policy.fair_shares(participants, expenses);

        paid.into_iter()
            .map(|(participant, total_paid)| {
                let fair_share = shares.get(participant).copied().unwrap_or(Money::ZERO);
                ParticipantSummary {
                    participant: participant.clone(),
                    total_paid,
                    fair_share,
                    balance: total_paid - fair_share,
                }
            })
            .collect()
    }

    pub fn balances(&self, participants: &ParticipantSet, expenses: &[Expense]) -> Balances {
        self.summarize(participants, expenses)
            .into_iter()
            .map(|row| (row.participant, row.balance))
            .collect()
    }

    /// Greedy debtor-to-creditor matching in participant order.
    ///
    /// Each debtor pays creditors in turn until what it owes is within
    /// tolerance. This does not minimise the number of transfers.
    pub fn transfers(&self, balances: &Balances) -> Vec<Transfer> {
        let mut creditors = balances.creditors(self.tolerance);
        let debtors = balances.debtors(self.tolerance);
        let mut transfers = Vec::new();

        for (debtor, mut owes) in debtors {
            for (creditor, owed) in creditors.iter_mut() {
                if !owes.is_positive() || !owed.is_positive() {
                    continue;
                }

                let amount = owes.min(*owed);
                transfers.push(Transfer {
                    from: debtor.clone(),
                    to: (*creditor).clone(),
                    amount,
                });
                owes -= amount;
                *owed -= amount;

                if owes <= self.tolerance {
                    break;
                }
            }
        }

        transfers
    }
}
