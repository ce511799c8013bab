use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A quantity of the ledger's single asset, in indivisible base units.
///
/// `Amount` is a thin wrapper over `u128`, wide enough for 18-decimal
/// assets without loss. All arithmetic the ledger performs on amounts is
/// checked; there are no wrapping or panicking operators on this type.
///
/// Amounts serialize as decimal strings (`"250000000000000000"`) so they
/// survive JSON consumers that truncate large integers. Deserialization
/// also accepts plain non-negative integers for config-file ergonomics.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from base units.
    pub const fn new(base_units: u128) -> Self {
        Self(base_units)
    }

    /// The raw base-unit count.
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    /// Returns `true` if this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction. `None` on underflow.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Saturating addition, for diagnostics where clamping is acceptable.
    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// Sum an iterator of amounts. `None` if the total overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Amount>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, Amount::checked_add)
    }
}

impl FromStr for Amount {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Amount)
            .map_err(|e| TypeError::InvalidAmount(format!("{s:?}: {e}")))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AmountVisitor;

        impl serde::de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a base-unit amount as a decimal string or unsigned integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<Amount, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Amount, E>
            where
                E: serde::de::Error,
            {
                Ok(Amount(u128::from(v)))
            }

            fn visit_u128<E>(self, v: u128) -> Result<Amount, E>
            where
                E: serde::de::Error,
            {
                Ok(Amount(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Amount, E>
            where
                E: serde::de::Error,
            {
                u128::try_from(v)
                    .map(Amount)
                    .map_err(|_| E::custom("amount cannot be negative"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_detects_overflow() {
        let max = Amount::new(u128::MAX);
        assert_eq!(max.checked_add(Amount::new(1)), None);
        assert_eq!(
            Amount::new(40).checked_add(Amount::new(2)),
            Some(Amount::new(42))
        );
    }

    #[test]
    fn checked_sub_detects_underflow() {
        assert_eq!(Amount::new(1).checked_sub(Amount::new(2)), None);
        assert_eq!(
            Amount::new(10).checked_sub(Amount::new(4)),
            Some(Amount::new(6))
        );
    }

    #[test]
    fn checked_sum_over_iterator() {
        let parts = [Amount::new(1), Amount::new(2), Amount::new(3)];
        assert_eq!(Amount::checked_sum(parts), Some(Amount::new(6)));

        let overflowing = [Amount::new(u128::MAX), Amount::new(1)];
        assert_eq!(Amount::checked_sum(overflowing), None);
    }

    #[test]
    fn zero_is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn ordering_follows_base_units() {
        assert!(Amount::new(9) < Amount::new(10));
        assert!(Amount::new(10) <= Amount::new(10));
    }

    #[test]
    fn parses_from_decimal_string() {
        let amount: Amount = "10000000000000000".parse().unwrap();
        assert_eq!(amount, Amount::new(10_000_000_000_000_000));
        assert!("-5".parse::<Amount>().is_err());
        assert!("1.5".parse::<Amount>().is_err());
    }

    #[test]
    fn serializes_as_decimal_string() {
        let amount = Amount::new(u128::MAX);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let from_string: Amount = serde_json::from_str("\"42\"").unwrap();
        let from_integer: Amount = serde_json::from_str("42").unwrap();
        assert_eq!(from_string, from_integer);
        assert!(serde_json::from_str::<Amount>("-1").is_err());
    }

    #[test]
    fn deserializes_from_toml_integer() {
        #[derive(Deserialize)]
        struct Doc {
            minimum: Amount,
        }
        let doc: Doc = toml::from_str("minimum = 10000000000000000").unwrap();
        assert_eq!(doc.minimum, Amount::new(10_000_000_000_000_000));
    }

    #[test]
    fn display_is_plain_digits() {
        assert_eq!(Amount::new(12345).to_string(), "12345");
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_string_roundtrip(v in any::<u128>()) {
                let amount = Amount::new(v);
                let json = serde_json::to_string(&amount).unwrap();
                let parsed: Amount = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(amount, parsed);
            }

            #[test]
            fn checked_add_matches_u128(a in any::<u128>(), b in any::<u128>()) {
                let sum = Amount::new(a).checked_add(Amount::new(b));
                prop_assert_eq!(sum.map(|s| s.base_units()), a.checked_add(b));
            }
        }
    }
}
