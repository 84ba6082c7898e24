//! Fixed-point money value.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fixed-point price: whole units plus sub-units (cents).
///
/// Cents are stored as given and are not clamped to `0..100`, so `1.150` is
/// one unit and 150 cents. The string form is `"<units>.<cents>"` without zero
/// padding (`12.5` is twelve units and five cents). Ordering compares units
/// first, then cents.
///
/// Cent arithmetic is done in `i128`; results whose units leave the `i64`
/// range saturate at `i64::MIN` / `i64::MAX` units.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    // Field order drives the derived ordering.
    units: i64,
    cents: i32,
}

impl Money {
    pub const ZERO: Money = Money { units: 0, cents: 0 };

    pub const fn new(units: i64, cents: i32) -> Self {
        Self { units, cents }
    }

    /// Build a normalized value from a total amount in cents.
    ///
    /// Uses truncating division, so negative totals keep the sign in both parts.
    pub const fn from_cents(total: i64) -> Self {
        Self {
            units: total / 100,
            cents: (total % 100) as i32,
        }
    }

    /// Build a value from a wide cent total.
    ///
    /// Totals beyond the `i64` unit range saturate to `i64::MIN` / `i64::MAX`
    /// units with zero cents.
    pub fn from_total_cents(total: i128) -> Self {
        match i64::try_from(total / 100) {
            Ok(units) => Self {
                units,
                cents: (total % 100) as i32,
            },
            Err(_) if total < 0 => Self::new(i64::MIN, 0),
            Err(_) => Self::new(i64::MAX, 0),
        }
    }

    pub const fn units(self) -> i64 {
        self.units
    }

    pub const fn cents(self) -> i32 {
        self.cents
    }

    /// Total amount expressed in cents (`units * 100 + cents`), exact.
    pub const fn total_cents(self) -> i128 {
        self.units as i128 * 100 + self.cents as i128
    }

    pub const fn is_zero(self) -> bool {
        self.units == 0 && self.cents == 0
    }

    /// Raise the price by `rate_percent` percent, discarding fractional cents.
    ///
    /// Returns the new (normalized) price and the increase actually applied,
    /// in cents. The new price saturates at the `i64` unit bounds.
    pub fn hiked(self, rate_percent: f64) -> (Money, i128) {
        let total = self.total_cents();
        // `as` truncates toward zero and saturates.
        let raw = (total as f64 * rate_percent / 100.0) as i128;
        let after = Money::from_total_cents(total.saturating_add(raw));
        (after, after.total_cents() - total)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.units, self.cents)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split('.');
        let units = parts.next().unwrap_or_default();
        let cents = parts.next();
        if parts.next().is_some() {
            return Err(DomainError::invalid_money(format!("{s:?}: more than one '.'")));
        }

        let units = units
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_money(format!("{s:?}: units: {e}")))?;
        let cents = match cents {
            None => 0,
            Some(c) => c
                .parse::<i32>()
                .map_err(|e| DomainError::invalid_money(format!("{s:?}: cents: {e}")))?,
        };

        Ok(Self { units, cents })
    }
}

impl TryFrom<String> for Money {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn parses_units_and_raw_cents() {
        assert_eq!(money("12.5"), Money::new(12, 5));
        assert_eq!(money("12.05"), Money::new(12, 5));
        assert_eq!(money("3.150"), Money::new(3, 150));
        assert_eq!(money("7"), Money::new(7, 0));
        assert_eq!(money("-2.40"), Money::new(-2, 40));
    }

    #[test]
    fn display_keeps_literal_cents() {
        assert_eq!(Money::new(12, 5).to_string(), "12.5");
        assert_eq!(Money::new(3, 150).to_string(), "3.150");
        assert_eq!(Money::ZERO.to_string(), "0.0");
    }

    #[test]
    fn malformed_strings_are_rejected() {
        for input in ["", "abc", "1.x", "1.2.3", "12.", ".5"] {
            match input.parse::<Money>() {
                Err(DomainError::InvalidMoney(_)) => {}
                other => panic!("Expected InvalidMoney for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn ordering_compares_units_then_cents() {
        assert!(money("2.0") > money("1.99"));
        assert!(money("1.10") > money("1.9"));
        assert!(money("1.5") < money("1.50"));
        assert_eq!(money("4.0").cmp(&Money::new(4, 0)), core::cmp::Ordering::Equal);
    }

    #[test]
    fn hike_truncates_fractional_cents() {
        assert_eq!(money("10.0").hiked(10.0), (money("11.0"), 100));
        assert_eq!(money("10.03").hiked(1.0), (money("10.13"), 10));
        assert_eq!(money("0.99").hiked(1.0), (money("0.99"), 0));
        assert_eq!(money("5.0").hiked(0.0), (money("5.0"), 0));
    }

    #[test]
    fn hike_normalizes_overflowing_cents() {
        // 1 unit + 150 cents = 250 cents; +10% = 275 cents.
        assert_eq!(money("1.150").hiked(10.0), (Money::new(2, 75), 25));
    }

    #[test]
    fn hike_of_large_prices_does_not_overflow() {
        let big = Money::new(i64::MAX / 10, 0);
        assert_eq!(big.hiked(0.0), (big, 0));

        let (after, increase) = Money::new(i64::MAX / 200, 0).hiked(150.0);
        assert!(after > Money::new(i64::MAX / 200, 0));
        assert!(increase > 0);
    }

    #[test]
    fn hike_saturates_at_unit_bounds() {
        let (after, increase) = Money::new(i64::MAX, 0).hiked(100.0);
        assert_eq!(after.units(), i64::MAX);
        assert_eq!(increase, 0);

        let (after, increase) = Money::new(i64::MIN, 0).hiked(100.0);
        assert_eq!(after, Money::new(i64::MIN, 0));
        assert_eq!(increase, 0);
    }

    #[test]
    fn from_total_cents_saturates_units() {
        assert_eq!(Money::from_total_cents(1234), Money::new(12, 34));
        let huge = i128::from(i64::MAX) * 1000 + 7;
        assert_eq!(Money::from_total_cents(huge), Money::new(i64::MAX, 0));
        assert_eq!(Money::from_total_cents(-huge), Money::new(i64::MIN, 0));
    }

    #[test]
    fn from_cents_splits_with_truncation() {
        assert_eq!(Money::from_cents(1234), Money::new(12, 34));
        assert_eq!(Money::from_cents(-250), Money::new(-2, -50));
        assert!(Money::from_cents(0).is_zero());
    }

    #[test]
    fn serializes_as_literal_string() {
        let json = serde_json::to_string(&Money::new(12, 5)).unwrap();
        assert_eq!(json, "\"12.5\"");
        let back: Money = serde_json::from_str("\"3.150\"").unwrap();
        assert_eq!(back, Money::new(3, 150));
        assert!(serde_json::from_str::<Money>("\"nope\"").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a non-negative hike never lowers the price and reports
        /// exactly the difference in cents.
        #[test]
        fn hike_increase_matches_price_delta(
            cents in 0i64..10_000_000i64,
            rate in 0u32..500u32
        ) {
            let before = Money::from_cents(cents);
            let (after, increase) = before.hiked(f64::from(rate));
            prop_assert!(after >= before);
            prop_assert_eq!(after.total_cents() - before.total_cents(), increase);
            prop_assert_eq!(increase, i128::from(cents * i64::from(rate) / 100));
        }
    }
}
