use crate::domain::{
    Error, Ledger, LedgerEvent, Settlement, SharePolicy,
    traits::{DeadLetterQueue, EventStream, SettlementOutput},
};
use crate::policy::SplitPolicy;
use crate::settlement::SettlementEngine;

use futures::StreamExt;

#[derive(Debug)]
pub struct Engine<I, O, D, P = SplitPolicy>
where
    I: EventStream,
    O: SettlementOutput,
    D: DeadLetterQueue,
    P: SharePolicy,
{
    ingestion: I,
    output: O,
    dlq: D,
    settlement: SettlementEngine<P>,
    ledger: Ledger,
}

impl<I, O, D, P> Engine<I, O, D, P>
where
    I: EventStream,
    O: SettlementOutput,
    D: DeadLetterQueue,
    P: SharePolicy,
{
    pub fn new(ingestion: I, output: O, dlq: D, settlement: SettlementEngine<P>) -> Self {
        Self {
            ingestion,
            output,
            dlq,
            settlement,
            ledger: Ledger::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Applies every event from the ingestion stream to the ledger.
    ///
    /// Rows that fail to parse or that the ledger refuses go to the dead
    /// letter queue; processing carries on with the next event.
    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();
        let mut rejected = 0usize;

        while let Some(event) = res.next().await {
            match event.and_then(|event| self.apply_event(event)) {
                Ok(()) => {}
                Err(e) => {
                    rejected += 1;
                    self.dlq.report(&e);
                }
            }
        }

        tracing::info!(
            participants = self.ledger.participants().len(),
            expenses = self.ledger.expenses().len(),
            rejected,
            "event log processed"
        );
        Ok(())
    }

    fn apply_event(&mut self, event: LedgerEvent) -> Result<(), Error> {
        tracing::debug!(%event, "applying event");
        self.ledger.apply(event)?;
        Ok(())
    }

    /// Settles the current ledger and hands the result to the output.
    pub fn flush(&mut self) -> Result<Settlement, Error> {
        let settlement = self.settlement.settle(&self.ledger);
        if settlement.is_settled() {
            tracing::info!(total = %settlement.total_spent(), "all settled");
        }
        self.output.publish(&settlement)?;
        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{LedgerError, Money, Participant, Transfer};
    use crate::ingestion::CsvReader;
    use crate::policy::PerExpenseSplit;

    #[derive(Default)]
    struct RecordingDlq(RefCell<Vec<String>>);

    impl DeadLetterQueue for RecordingDlq {
        fn report(&self, error: &Error) {
            self.0.borrow_mut().push(error.to_string());
        }
    }

    #[derive(Default)]
    struct LastSettlement(Option<Settlement>);

    impl SettlementOutput for LastSettlement {
        fn publish(&mut self, settlement: &Settlement) -> Result<(), Error> {
            self.0 = Some(settlement.clone());
            Ok(())
        }
    }

    fn engine<P: SharePolicy>(
        input: &'static str,
        settlement: SettlementEngine<P>,
    ) -> Engine<CsvReader<&'static [u8]>, LastSettlement, RecordingDlq, P> {
        Engine::new(
            CsvReader::new(input.as_bytes()),
            LastSettlement::default(),
            RecordingDlq::default(),
            settlement,
        )
    }

    #[tokio::test]
    async fn processes_log_and_publishes_settlement() {
        let mut engine = engine(
            "type,name,amount,split_among\n\
             add,A\n\
             add,B\n\
             add,C\n\
             expense,A,90\n",
            SettlementEngine::default(),
        );

        engine.process().await.unwrap();
        let settlement = engine.flush().unwrap();

        assert!(engine.dlq.0.borrow().is_empty());
        assert_eq!(engine.output.0.as_ref(), Some(&settlement));
        assert_eq!(
            settlement.transfers,
            vec![
                Transfer {
                    from: Participant::new("B"),
                    to: Participant::new("A"),
                    amount: Money::from(30),
                },
                Transfer {
                    from: Participant::new("C"),
                    to: Participant::new("A"),
                    amount: Money::from(30),
                },
            ]
        );
    }

    #[tokio::test]
    async fn rejected_events_go_to_dlq() {
        let mut engine = engine(
            "type,name,amount,split_among\n\
             add,A\n\
             add,A\n\
             expense,A,-5\n\
             expense,Z,5\n\
             bogus,A\n\
             add,B\n\
             expense,A,10,B\n\
             remove,B\n",
            SettlementEngine::default(),
        );

        engine.process().await.unwrap();

        let reported = engine.dlq.0.borrow().clone();
        assert_eq!(reported.len(), 5);
        assert_eq!(
            reported[0],
            Error::from(LedgerError::DuplicateParticipant(Participant::new("A"))).to_string()
        );
        assert!(reported[4].contains("referenced by a recorded expense"));
        assert_eq!(engine.ledger().participants().len(), 2);
        assert_eq!(engine.ledger().expenses().len(), 1);
    }

    #[tokio::test]
    async fn overflowing_expense_is_rejected_and_run_completes() {
        let mut engine = engine(
            "type,name,amount\n\
             add,A\n\
             add,B\n\
             expense,A,50000000000000000000000000000\n\
             expense,B,50000000000000000000000000000\n",
            SettlementEngine::default(),
        );

        engine.process().await.unwrap();
        let settlement = engine.flush().unwrap();

        let reported = engine.dlq.0.borrow().clone();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("would overflow the ledger total"));
        assert_eq!(engine.ledger().expenses().len(), 1);
        assert_eq!(settlement.transfers.len(), 1);
        assert_eq!(
            settlement.transfers[0].amount,
            Money::from_decimal_str("25000000000000000000000000000").unwrap()
        );
    }

    #[tokio::test]
    async fn policy_is_applied_on_flush() {
        let mut engine = engine(
            "type,name,amount,split_among\n\
             add,A\n\
             add,B\n\
             add,C\n\
             expense,A,60,A;B\n",
            SettlementEngine::new(PerExpenseSplit),
        );

        engine.process().await.unwrap();
        let settlement = engine.flush().unwrap();

        assert_eq!(settlement.balances.get("C"), Some(Money::ZERO));
        assert_eq!(settlement.balances.get("B"), Some(Money::from(-30)));
    }

    #[tokio::test]
    async fn empty_log_settles_to_nothing() {
        let mut engine = engine("type,name\n", SettlementEngine::default());

        engine.process().await.unwrap();
        let settlement = engine.flush().unwrap();

        assert!(settlement.summary.is_empty());
        assert!(settlement.is_settled());
    }
}
