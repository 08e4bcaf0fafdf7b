//! Decimal amount parsing and base-unit conversion.
//!
//! All arithmetic is done on integers; user input is never routed through floats.

use std::str::FromStr;

use crate::error::AmountError;

/// Decimal places of the chain's base unit (1 display unit = 10^7 base units).
pub const BASE_UNIT_DECIMALS: u32 = 7;

/// Fixed number of fractional digits shown for amounts.
pub const DISPLAY_PLACES: u32 = 4;

/// A non-negative decimal number as typed by the user, kept as digit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalAmount {
    whole: String,
    fraction: String,
}

impl FromStr for DecimalAmount {
    type Err = AmountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(AmountError::Empty);
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountError::Malformed(text.to_string()));
        }

        Ok(Self {
            whole: whole.to_string(),
            fraction: fraction.to_string(),
        })
    }
}

impl DecimalAmount {
    pub fn is_zero(&self) -> bool {
        self.whole.chars().chain(self.fraction.chars()).all(|c| c == '0')
    }

    /// Scales by 10^decimals, dropping any fractional digits beyond `decimals`
    /// (truncation toward zero).
    pub fn to_base_units(&self, decimals: u32) -> Result<u128, AmountError> {
        let overflow = || AmountError::Overflow(format!("{}.{}", self.whole, self.fraction));

        let kept: String = self
            .fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(decimals as usize)
            .collect();

        let mut value: u128 = 0;
        for digit in self.whole.chars().chain(kept.chars()) {
            let digit = u128::from(digit.to_digit(10).unwrap_or(0));
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(overflow)?;
        }
        Ok(value)
    }
}

/// Parses a user-entered amount and converts it to base units with the given decimals.
pub fn to_base_units(text: &str, decimals: u32) -> Result<u128, AmountError> {
    text.parse::<DecimalAmount>()?.to_base_units(decimals)
}

/// Renders an integer base-unit string as `value / 10^decimals` fixed to four places.
///
/// Input that is not an integer is returned unchanged so the caller never hides
/// what the remote side actually sent.
pub fn format_amount(base_units: &str, decimals: u32) -> String {
    let trimmed = base_units.trim();
    trimmed
        .parse::<i128>()
        .ok()
        .and_then(|value| format_scaled(value, decimals))
        .unwrap_or_else(|| trimmed.to_string())
}

/// Fixed four-place rendering of `value / 10^decimals`, rounding half away from zero.
pub fn format_scaled(value: i128, decimals: u32) -> Option<String> {
    let magnitude = value.unsigned_abs();
    let scaled = if decimals >= DISPLAY_PLACES {
        let divisor = 10u128.checked_pow(decimals - DISPLAY_PLACES)?;
        let quotient = magnitude / divisor;
        let remainder = magnitude % divisor;
        if remainder >= divisor - remainder {
            quotient + 1
        } else {
            quotient
        }
    } else {
        magnitude.checked_mul(10u128.pow(DISPLAY_PLACES - decimals))?
    };

    let unit = 10u128.pow(DISPLAY_PLACES);
    let sign = if value < 0 && scaled != 0 { "-" } else { "" };
    Some(format!(
        "{sign}{}.{:0width$}",
        scaled / unit,
        scaled % unit,
        width = DISPLAY_PLACES as usize
    ))
}

/// Output units per one input unit, both given in base units, fixed to four places.
pub fn exchange_rate(
    amount_in: u128,
    decimals_in: u32,
    amount_out: u128,
    decimals_out: u32,
) -> Option<String> {
    if amount_in == 0 {
        return None;
    }
    // rate = (out / 10^dout) / (in / 10^din), expressed with `decimals_out` places
    let numerator = amount_out.checked_mul(10u128.checked_pow(decimals_in)?)?;
    let rate = numerator / amount_in;
    format_scaled(i128::try_from(rate).ok()?, decimals_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_whole_and_fractional_amounts() {
        assert_eq!(to_base_units("10", 7), Ok(100_000_000));
        assert_eq!(to_base_units("1.5", 7), Ok(15_000_000));
        assert_eq!(to_base_units(".25", 7), Ok(2_500_000));
        assert_eq!(to_base_units("3.", 7), Ok(30_000_000));
        assert_eq!(to_base_units(" 0.0000001 ", 7), Ok(1));
    }

    #[test]
    fn truncates_digits_beyond_base_unit() {
        assert_eq!(to_base_units("0.12345678", 7), Ok(1_234_567));
        assert_eq!(to_base_units("0.00000009", 7), Ok(0));
        assert_eq!(to_base_units("1.99999999", 7), Ok(19_999_999));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert_eq!(to_base_units("", 7), Err(AmountError::Empty));
        assert!(matches!(to_base_units("abc", 7), Err(AmountError::Malformed(_))));
        assert!(matches!(to_base_units("-1", 7), Err(AmountError::Malformed(_))));
        assert!(matches!(to_base_units("1.2.3", 7), Err(AmountError::Malformed(_))));
        assert!(matches!(to_base_units(".", 7), Err(AmountError::Malformed(_))));
        assert!(matches!(to_base_units("1e5", 7), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn rejects_overflowing_amounts() {
        let huge = "9".repeat(40);
        assert!(matches!(to_base_units(&huge, 7), Err(AmountError::Overflow(_))));
    }

    #[test]
    fn zero_detection_ignores_formatting() {
        assert!("0".parse::<DecimalAmount>().expect("parse").is_zero());
        assert!("000.000".parse::<DecimalAmount>().expect("parse").is_zero());
        assert!(!"0.00000001".parse::<DecimalAmount>().expect("parse").is_zero());
    }

    #[test]
    fn formats_base_units_to_four_places() {
        assert_eq!(format_amount("95000000", 7), "9.5000");
        assert_eq!(format_amount("1", 7), "0.0000");
        assert_eq!(format_amount("500", 7), "0.0001");
        assert_eq!(format_amount("12345", 2), "123.4500");
        assert_eq!(format_amount("-15000000", 7), "-1.5000");
        assert_eq!(format_amount("0", 0), "0.0000");
    }

    #[test]
    fn unparseable_base_units_are_returned_verbatim() {
        assert_eq!(format_amount("n/a", 7), "n/a");
        assert_eq!(format_amount("12.5", 7), "12.5");
    }

    #[test]
    fn display_of_converted_amount_matches_four_place_rounding() {
        let cases = [
            ("10", "10.0000"),
            ("0.5", "0.5000"),
            ("1.23456", "1.2346"),
            ("1.23454", "1.2345"),
            ("2.00005", "2.0001"),
            ("7.9999999", "8.0000"),
            ("0.00004999", "0.0000"),
        ];
        for (input, expected) in cases {
            let base = to_base_units(input, BASE_UNIT_DECIMALS).expect("base units");
            assert_eq!(
                format_amount(&base.to_string(), BASE_UNIT_DECIMALS),
                expected,
                "input {input}"
            );
        }
    }

    #[test]
    fn exchange_rate_uses_both_decimals() {
        assert_eq!(
            exchange_rate(100_000_000, 7, 95_000_000, 7).as_deref(),
            Some("0.9500")
        );
        assert_eq!(exchange_rate(10_000_000, 7, 2_000_000, 6).as_deref(), Some("2.0000"));
        assert_eq!(exchange_rate(0, 7, 1, 7), None);
    }
}
