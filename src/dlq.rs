use crate::domain::{DeadLetterQueue, Error};

/// Logs rejected events and moves on.
#[derive(Default, Debug)]
pub struct TracingDLQ {}

impl DeadLetterQueue for TracingDLQ {
    fn report(&self, error: &Error) {
        tracing::warn!(%error, "event rejected");
    }
}
