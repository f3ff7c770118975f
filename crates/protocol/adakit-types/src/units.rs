//! Lovelace/ADA conversion.
//!
//! ADA amounts are parsed from their decimal text with integer arithmetic,
//! so `0.1 + 0.2` style binary floating-point drift never reaches a
//! transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ADA_DECIMALS, LOVELACE_PER_ADA};
use crate::error::{ValueError, ValueResult};

/// An amount in lovelace, the smallest unit (10^-6 ADA).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Lovelace(pub u64);

impl Lovelace {
    /// Zero lovelace.
    pub const ZERO: Lovelace = Lovelace(0);

    /// Raw lovelace count.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Add, returning `None` on overflow.
    pub fn checked_add(self, other: Lovelace) -> Option<Lovelace> {
        self.0.checked_add(other.0).map(Lovelace)
    }
}

impl fmt::Display for Lovelace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Lovelace {
    type Err = ValueError;

    /// Parse a lovelace count; only non-negative integers are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValueError::invalid_amount(s, "empty amount"));
        }
        if trimmed.starts_with('-') {
            return Err(ValueError::invalid_amount(s, "amount is negative"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValueError::invalid_amount(
                s,
                "lovelace must be a whole number",
            ));
        }
        trimmed
            .parse::<u64>()
            .map(Lovelace)
            .map_err(|_| ValueError::invalid_amount(s, "amount out of range"))
    }
}

impl From<u64> for Lovelace {
    fn from(value: u64) -> Self {
        Lovelace(value)
    }
}

/// Convert an ADA amount given as decimal text to lovelace.
///
/// Digits past the sixth decimal place are rounded half-up.
pub fn to_smallest_unit(display: &str) -> ValueResult<Lovelace> {
    let trimmed = display.trim();
    if trimmed.starts_with('-') {
        return Err(ValueError::invalid_amount(display, "amount is negative"));
    }
    let scaled = parse_fixed_point(trimmed, ADA_DECIMALS, Rounding::HalfUp)
        .ok_or_else(|| ValueError::invalid_amount(display, "not a decimal number"))?;
    u64::try_from(scaled)
        .map(Lovelace)
        .map_err(|_| ValueError::invalid_amount(display, "amount out of range"))
}

/// Render a lovelace amount in ADA.
///
/// Trailing zeros are dropped but at least one fractional digit is kept, so
/// `2_000_000` renders as `2.0` and `1_500_000` as `1.5`.
pub fn to_display_unit(amount: Lovelace) -> String {
    let whole = amount.0 / LOVELACE_PER_ADA;
    let frac = amount.0 % LOVELACE_PER_ADA;
    if frac == 0 {
        return format!("{}.0", whole);
    }
    let digits = format!("{:0width$}", frac, width = ADA_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// What to do with digits past the requested scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rounding {
    /// Round half-up on the first dropped digit.
    HalfUp,
    /// Drop extra digits.
    Truncate,
}

/// Parse unsigned decimal text into an integer scaled by `10^scale`.
///
/// Accepts `12`, `12.`, `.5` and `12.345`. Returns `None` for signs,
/// exponents, stray characters or overflow.
pub(crate) fn parse_fixed_point(input: &str, scale: u32, rounding: Rounding) -> Option<u128> {
    let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut value = int_value.checked_mul(10u128.pow(scale))?;

    let frac = frac_part.as_bytes();
    let kept = frac.len().min(scale as usize);
    let mut frac_value: u128 = 0;
    for digit in &frac[..kept] {
        frac_value = frac_value * 10 + u128::from(digit - b'0');
    }
    frac_value *= 10u128.pow(scale - kept as u32);
    value = value.checked_add(frac_value)?;

    if rounding == Rounding::HalfUp && frac.len() > kept && frac[kept] >= b'5' {
        value = value.checked_add(1)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_smallest_unit() {
        assert_eq!(to_smallest_unit("1.5").unwrap(), Lovelace(1_500_000));
        assert_eq!(to_smallest_unit("2").unwrap(), Lovelace(2_000_000));
        assert_eq!(to_smallest_unit("0.000001").unwrap(), Lovelace(1));
        assert_eq!(to_smallest_unit(".25").unwrap(), Lovelace(250_000));
        assert_eq!(to_smallest_unit("3.").unwrap(), Lovelace(3_000_000));
        assert_eq!(to_smallest_unit(" 10.1 ").unwrap(), Lovelace(10_100_000));
    }

    #[test]
    fn test_to_smallest_unit_rounds_half_up() {
        assert_eq!(to_smallest_unit("0.0000005").unwrap(), Lovelace(1));
        assert_eq!(to_smallest_unit("0.0000004").unwrap(), Lovelace(0));
        assert_eq!(to_smallest_unit("1.9999999").unwrap(), Lovelace(2_000_000));
    }

    #[test]
    fn test_to_smallest_unit_is_exact() {
        // 0.1 and 0.7 are not representable in binary floating point
        assert_eq!(to_smallest_unit("0.1").unwrap(), Lovelace(100_000));
        assert_eq!(to_smallest_unit("0.7").unwrap(), Lovelace(700_000));
        assert_eq!(
            to_smallest_unit("45000000000.123456").unwrap(),
            Lovelace(45_000_000_000_123_456)
        );
    }

    #[test]
    fn test_to_smallest_unit_rejects() {
        for bad in ["", ".", "-1", "-0.5", "abc", "1.2.3", "1e6", "+1", "1,5"] {
            let err = to_smallest_unit(bad).unwrap_err();
            assert!(
                matches!(err, ValueError::InvalidAmount { .. }),
                "{bad:?} should be rejected"
            );
        }
        assert!(to_smallest_unit("99999999999999999999").is_err());
    }

    #[test]
    fn test_to_display_unit() {
        assert_eq!(to_display_unit(Lovelace(2_000_000)), "2.0");
        assert_eq!(to_display_unit(Lovelace(1_500_000)), "1.5");
        assert_eq!(to_display_unit(Lovelace(1)), "0.000001");
        assert_eq!(to_display_unit(Lovelace(0)), "0.0");
        assert_eq!(to_display_unit(Lovelace(969_750)), "0.96975");
    }

    #[test]
    fn test_round_trip_within_one_lovelace() {
        for input in ["0", "1.5", "0.123456", "7.0000004", "12.3456789", "1000000"] {
            let lovelace = to_smallest_unit(input).unwrap();
            let back = to_smallest_unit(&to_display_unit(lovelace)).unwrap();
            assert_eq!(back, lovelace);

            let exact = parse_fixed_point(input, 12, Rounding::Truncate).unwrap();
            let recovered = u128::from(back.0) * 1_000_000;
            assert!(exact.abs_diff(recovered) <= 1_000_000, "{input}");
        }
    }

    #[test]
    fn test_lovelace_from_str() {
        assert_eq!("1500000".parse::<Lovelace>().unwrap(), Lovelace(1_500_000));
        assert!("-5".parse::<Lovelace>().is_err());
        assert!("1.5".parse::<Lovelace>().is_err());
        assert!("".parse::<Lovelace>().is_err());
        assert!("18446744073709551616".parse::<Lovelace>().is_err());
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Lovelace(1).checked_add(Lovelace(2)), Some(Lovelace(3)));
        assert_eq!(Lovelace(u64::MAX).checked_add(Lovelace(1)), None);
    }
}
