use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::EventStream;
use crate::domain::{Error, ExpenseDraft, LedgerEvent, Money};

/// Separator between names in the `split_among` column.
pub const SPLIT_SEPARATOR: char = ';';

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    amount: Option<Money>,
    #[serde(default)]
    split_among: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl TryFrom<CsvRow> for LedgerEvent {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let event = match (row.kind.trim().to_ascii_lowercase().as_str(), row.amount) {
            ("add", None) => LedgerEvent::AddParticipant { name: row.name },
            ("remove", None) => LedgerEvent::RemoveParticipant { name: row.name },
            ("expense", Some(amount)) => {
                let split_among = row
                    .split_among
                    .as_deref()
                    .unwrap_or_default()
                    .split(SPLIT_SEPARATOR)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect();

                LedgerEvent::RecordExpense(ExpenseDraft {
                    payer: row.name,
                    amount,
                    split_among,
                    description: row.description.unwrap_or_default(),
                    timestamp: row.timestamp,
                })
            }
            (kind @ ("add" | "remove"), Some(amount)) => {
                return Err(Error::Ingestion(format!(
                    "Unexpected amount {} on {} row for {}",
                    amount, kind, row.name
                )));
            }
            ("expense", None) => {
                return Err(Error::Ingestion(format!(
                    "Expense paid by {} has no amount",
                    row.name
                )));
            }
            (other, _) => {
                return Err(Error::Ingestion(format!("Invalid event type: {}", other)));
            }
        };

        Ok(event)
    }
}

impl<R: Read + Send + 'static> EventStream for CsvReader<R> {
    type Events = Pin<Box<dyn Stream<Item = Result<LedgerEvent, Error>> + Send>>;

    fn stream(&mut self) -> Self::Events {
        // an event log is read once; the stream owns the csv reader
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                return Box::pin(stream::iter(Vec::<Result<LedgerEvent, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => LedgerEvent::try_from(row),
                Err(e) => Err(Error::Ingestion(format!("CSV deserialization error: {}", e))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn read_all(input: &'static str) -> Vec<Result<LedgerEvent, Error>> {
        CsvReader::new(input.as_bytes()).stream().collect().await
    }

    #[tokio::test]
    async fn maps_rows_to_events() {
        let events = read_all(
            "type, name, amount, split_among, description, timestamp\n\
             add, Alice,,,,\n\
             add, Bob\n\
             expense, Alice, 12.50, Alice; Bob,\"Pizza, large\", 2024-05-01 20:15\n\
             expense, Bob, 3\n\
             remove, Bob,,,,\n",
        )
        .await;

        let events: Vec<LedgerEvent> = events.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            events,
            vec![
                LedgerEvent::AddParticipant {
                    name: "Alice".to_string()
                },
                LedgerEvent::AddParticipant {
                    name: "Bob".to_string()
                },
                LedgerEvent::RecordExpense(
                    ExpenseDraft::new("Alice", Money::from_cents(1250))
                        .split_among(["Alice", "Bob"])
                        .description("Pizza, large")
                        .timestamp("2024-05-01 20:15")
                ),
                LedgerEvent::RecordExpense(ExpenseDraft::new("Bob", Money::from(3))),
                LedgerEvent::RemoveParticipant {
                    name: "Bob".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn bad_rows_are_errors_and_reading_continues() {
        let events = read_all(
            "type,name,amount\n\
             refund,Alice,3\n\
             expense,Alice,\n\
             expense,Alice,ten\n\
             add,Carol,5\n\
             add,Dave\n",
        )
        .await;

        assert_eq!(events.len(), 5);
        assert!(events[..4].iter().all(|e| matches!(e, Err(Error::Ingestion(_)))));
        assert!(matches!(
            &events[3],
            Err(Error::Ingestion(msg)) if msg == "Unexpected amount 5.00 on add row for Carol"
        ));
        assert!(matches!(
            &events[4],
            Ok(LedgerEvent::AddParticipant { name }) if name == "Dave"
        ));
    }

    #[tokio::test]
    async fn second_stream_is_empty() {
        let mut reader = CsvReader::new("type,name\nadd,Alice\n".as_bytes());
        assert_eq!(reader.stream().count().await, 1);
        assert_eq!(reader.stream().count().await, 0);
    }
}
