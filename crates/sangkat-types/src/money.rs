//! Currency amounts.

use serde::{Deserialize, Serialize};

/// A non-negative US dollar amount.
///
/// The raw value is kept at full precision; rounding only happens in the
/// [`Display`](std::fmt::Display) impl, which renders `$1,234,567` with
/// ties rounded to even.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0.0);

    /// Creates an amount, rejecting negative and non-finite values.
    #[must_use]
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = format!("{:.0}", self.0);
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "${grouped}")
    }
}
