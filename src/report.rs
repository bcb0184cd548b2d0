use std::io::Write;

use crate::domain::{Error, Settlement, SettlementOutput};

/// Writes the balance table, a blank line, then the transfer table.
#[derive(Debug)]
pub struct CsvReport<W: Write> {
    inner: W,
}

impl<W: Write> CsvReport<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SettlementOutput for CsvReport<W> {
    fn publish(&mut self, settlement: &Settlement) -> Result<(), Error> {
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut self.inner);
            wtr.write_record(["participant", "total_paid", "fair_share", "balance"])?;
            for row in &settlement.summary {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }

        self.inner.write_all(b"\n")?;

        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut self.inner);
            wtr.write_record(["from", "to", "amount"])?;
            for transfer in &settlement.transfers {
                wtr.serialize(transfer)?;
            }
            wtr.flush()?;
        }

        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseDraft, Ledger, Money};
    use crate::settlement::SettlementEngine;

    fn render(settlement: &Settlement) -> String {
        let mut report = CsvReport::new(Vec::new());
        report.publish(settlement).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn writes_both_tables() {
        let mut ledger = Ledger::new();
        for name in ["A", "B", "C"] {
            ledger.add_participant(name).unwrap();
        }
        ledger
            .record_expense(ExpenseDraft::new("A", Money::from(100)))
            .unwrap();

        let out = render(&SettlementEngine::default().settle(&ledger));

        assert_eq!(
            out,
            "participant,total_paid,fair_share,balance\n\
             A,100.00,33.33,66.67\n\
             B,0.00,33.33,-33.33\n\
             C,0.00,33.33,-33.33\n\
             \n\
             from,to,amount\n\
             B,A,33.33\n\
             C,A,33.33\n"
        );
    }

    #[test]
    fn empty_settlement_still_has_headers() {
        let out = render(&Settlement::default());
        assert_eq!(out, "participant,total_paid,fair_share,balance\n\nfrom,to,amount\n");
    }
}
