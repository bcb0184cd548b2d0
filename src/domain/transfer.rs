use serde::Serialize;

use crate::domain::{Money, Participant};

/// A payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}

impl core::fmt::Display for Transfer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_direction_and_amount() {
        let transfer = Transfer {
            from: Participant::new("Chen"),
            to: Participant::new("Asha"),
            amount: Money::from_cents(5005),
        };
        assert_eq!(transfer.to_string(), "Chen -> Asha: 50.05");
    }
}
