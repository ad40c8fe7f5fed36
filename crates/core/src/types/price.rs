//! Type-safe price representation using decimal arithmetic.
//!
//! The shop sells in Indian rupees only, so a [`Price`] is an amount in rupees
//! (not paise). Formatting follows the `en-IN` locale: the last three integer
//! digits form one group and every two digits before that form another, so
//! one million renders as `10,00,000`.
//!
//! On the wire and in local storage prices are plain JSON numbers, which is
//! what the backend emits and expects when it totals orders.

use core::fmt;
use core::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol for Indian rupees.
pub const RUPEE_SYMBOL: &str = "₹";

/// A price in Indian rupees.
///
/// # Examples
///
/// ```
/// use bharat_core::Price;
///
/// let price = Price::from_rupees(1000);
/// assert_eq!(price.format_currency(), "₹1,000.00");
/// assert_eq!(Price::from_rupees(1299).format_grouped(), "1,299");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal rupee amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format as an `en-IN` currency string with two fraction digits.
    ///
    /// `1000` becomes `₹1,000.00` and `1234567.5` becomes `₹12,34,567.50`.
    #[must_use]
    pub fn format_currency(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = sign_prefix(rounded);
        let text = format!("{:.2}", rounded.abs());
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!("{sign}{RUPEE_SYMBOL}{}.{fraction}", group_indian(integer))
    }

    /// Format as an `en-IN` grouped number without a currency symbol.
    ///
    /// Fraction digits are only shown when present (at most three), so
    /// `1299` becomes `1,299` and `1299.5` becomes `1,299.5`.
    #[must_use]
    pub fn format_grouped(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let sign = sign_prefix(rounded);
        let text = rounded.abs().to_string();
        match text.split_once('.') {
            Some((integer, fraction)) => format!("{sign}{}.{fraction}", group_indian(integer)),
            None => format!("{sign}{}", group_indian(&text)),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_currency())
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim()).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.0)))
    }
}

fn sign_prefix(amount: Decimal) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    }
}

/// Insert Indian-style group separators into a string of ASCII digits.
fn group_indian(digits: &str) -> String {
    let mut grouped: Vec<char> = Vec::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in digits.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.into_iter().rev().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_thousand() {
        assert_eq!(Price::from_rupees(1000).format_currency(), "₹1,000.00");
    }

    #[test]
    fn test_format_currency_small_and_zero() {
        assert_eq!(Price::from_rupees(0).format_currency(), "₹0.00");
        assert_eq!(Price::from_rupees(899).format_currency(), "₹899.00");
    }

    #[test]
    fn test_format_currency_lakh_grouping() {
        assert_eq!(
            "1234567.5".parse::<Price>().unwrap().format_currency(),
            "₹12,34,567.50"
        );
        assert_eq!(Price::from_rupees(100_000).format_currency(), "₹1,00,000.00");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!("10.005".parse::<Price>().unwrap().format_currency(), "₹10.01");
        assert_eq!("-10.005".parse::<Price>().unwrap().format_currency(), "-₹10.01");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Price::from_rupees(1299).format_grouped(), "1,299");
        assert_eq!("1299.50".parse::<Price>().unwrap().format_grouped(), "1,299.5");
        assert_eq!(Price::from_rupees(1_000_000).format_grouped(), "10,00,000");
        assert_eq!(Price::from_rupees(999).format_grouped(), "999");
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("1"), "1");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("12345"), "12,345");
        assert_eq!(group_indian("1234567"), "12,34,567");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_rupees(1299).times(2), Price::from_rupees(899)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_rupees(3497));
    }

    #[test]
    fn test_serializes_as_number() {
        let price: Price = serde_json::from_str("1299").unwrap();
        assert_eq!(price, Price::from_rupees(1299));

        let json = serde_json::to_value(price).unwrap();
        assert!(json.is_number());
        assert!((json.as_f64().unwrap() - 1299.0).abs() < f64::EPSILON);
    }
}
