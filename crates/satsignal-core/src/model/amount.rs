// ── Bitcoin amounts ──
//
// Satoshi-denominated, signed so a transaction sighting can express both
// directions. Decimal BTC strings are parsed without floating point.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Satoshis per bitcoin.
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Hard cap on the number of satoshis that can ever exist.
pub const MAX_MONEY_SATS: u64 = 21_000_000 * SATS_PER_BTC;

const MAX_DECIMALS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    NotDecimal(String),

    #[error("'{0}' has more than 8 decimal places")]
    TooPrecise(String),

    #[error("'{0}' exceeds the 21 million BTC supply")]
    TooLarge(String),
}

/// An amount of bitcoin in satoshis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn from_sats(sats: i64) -> Self {
        Self(sats)
    }

    pub fn sats(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parse a non-negative decimal BTC string such as `"0.015"` or `"50"`.
    pub fn parse_btc(value: &str) -> Result<Self, AmountError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AmountError::Empty);
        }

        let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
        let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
            return Err(AmountError::NotDecimal(value.into()));
        }
        if frac.len() > MAX_DECIMALS {
            return Err(AmountError::TooPrecise(value.into()));
        }

        let too_large = || AmountError::TooLarge(value.into());
        let whole_sats = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| too_large())?
                .checked_mul(SATS_PER_BTC)
                .ok_or_else(too_large)?
        };
        let frac_sats = if frac.is_empty() {
            0
        } else {
            // Right-pad to eight digits: "015" -> "01500000"
            format!("{frac:0<width$}", width = MAX_DECIMALS)
                .parse::<u64>()
                .map_err(|_| AmountError::NotDecimal(value.into()))?
        };

        let total = whole_sats.checked_add(frac_sats).ok_or_else(too_large)?;
        if total > MAX_MONEY_SATS {
            return Err(too_large());
        }
        i64::try_from(total).map(Self).map_err(|_| too_large())
    }
}

impl fmt::Display for Amount {
    /// Renders as BTC with trailing zeros trimmed: `0.015 BTC`, `-1 BTC`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SATS_PER_BTC;
        let frac = abs % SATS_PER_BTC;
        if frac == 0 {
            write!(f, "{sign}{whole} BTC")
        } else {
            let frac = format!("{frac:08}");
            write!(f, "{sign}{whole}.{} BTC", frac.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_btc() {
        assert_eq!(Amount::parse_btc("50").unwrap().sats(), 5_000_000_000);
        assert_eq!(Amount::parse_btc("0.015").unwrap().sats(), 1_500_000);
        assert_eq!(Amount::parse_btc(".5").unwrap().sats(), 50_000_000);
        assert_eq!(Amount::parse_btc("0.00000001").unwrap().sats(), 1);
        assert_eq!(Amount::parse_btc("1.").unwrap().sats(), 100_000_000);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(Amount::parse_btc(""), Err(AmountError::Empty));
        assert!(matches!(Amount::parse_btc("."), Err(AmountError::NotDecimal(_))));
        assert!(matches!(Amount::parse_btc("-1"), Err(AmountError::NotDecimal(_))));
        assert!(matches!(Amount::parse_btc("1e3"), Err(AmountError::NotDecimal(_))));
        assert!(matches!(Amount::parse_btc("1.2.3"), Err(AmountError::NotDecimal(_))));
        assert!(matches!(
            Amount::parse_btc("0.000000001"),
            Err(AmountError::TooPrecise(_))
        ));
        assert!(matches!(
            Amount::parse_btc("21000000.00000001"),
            Err(AmountError::TooLarge(_))
        ));
        assert!(matches!(
            Amount::parse_btc("99999999999999999999"),
            Err(AmountError::TooLarge(_))
        ));
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Amount::from_sats(1_500_000).to_string(), "0.015 BTC");
        assert_eq!(Amount::from_sats(100_000_000).to_string(), "1 BTC");
        assert_eq!(Amount::from_sats(-250_000_000).to_string(), "-2.5 BTC");
        assert_eq!(Amount::ZERO.to_string(), "0 BTC");
        assert_eq!(Amount::from_sats(1).to_string(), "0.00000001 BTC");
    }
}
