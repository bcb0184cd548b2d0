use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-point currency amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// One hundredth of a currency unit; the default settlement tolerance.
    pub const CENT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    pub const INPUT_DECIMALS: u32 = 4;
    pub const DISPLAY_DECIMALS: u32 = 2;

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// `None` when the sum does not fit.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// True when the amount is no further than `tolerance` from zero.
    pub fn is_within(&self, tolerance: Money) -> bool {
        self.0.abs() <= tolerance.0
    }

    /// Divides the amount evenly into `parts`. Returns `None` for zero parts.
    pub fn split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Self(self.0 / Decimal::from(parts)))
    }

    /// Parses a decimal string, keeping at most four fractional digits.
    /// Ties round half to even.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();

        if s.is_empty() {
            return None;
        }
        let value: Decimal = s.parse().ok()?;
        Some(Self(value.round_dp_with_strategy(
            Self::INPUT_DECIMALS,
            RoundingStrategy::MidpointNearestEven,
        )))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven);
        // avoid rendering "-0.00" for dust
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        write!(f, "{:.2}", rounded)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_decimal_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid Money format: {}", s)))
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
