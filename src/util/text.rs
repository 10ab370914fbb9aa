use std::{collections::HashSet, str::FromStr};

use anyhow::*;
use concat_string::concat_string;
use rust_decimal::Decimal;

const NUMBER_ESCAPE_CHAR: &[char] = &[',', ' ', '"', '%', '\n'];

/// Truncates a numeric string to at most two digits after the decimal point.
///
/// Digits beyond the second fractional digit are discarded, never rounded.
/// Strings without a decimal point, and strings that already carry two or
/// fewer fractional digits, are returned unchanged.
///
/// # Arguments
///
/// * `value`: A string slice holding a decimal number, e.g. `"123.456"`.
///
/// # Returns
///
/// * `String`: The value with at most two fractional digits, e.g. `"123.45"`.
pub fn truncate_decimal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut fraction_digits: Option<usize> = None;

    for c in value.chars() {
        match fraction_digits {
            None => {
                if c == '.' {
                    fraction_digits = Some(0);
                }
                out.push(c);
            }
            Some(n) => {
                if n >= 2 {
                    break;
                }
                fraction_digits = Some(n + 1);
                out.push(c);
            }
        }
    }

    out
}

/// Normalizes the sign of a price-change value.
///
/// A non-empty value that does not already start with `-` is prefixed with
/// `+`, so every displayable change carries an explicit sign. Empty values
/// stay empty, they mean "not resolved yet" rather than zero.
pub fn normalize_change_sign(value: &str) -> String {
    if value.is_empty() || value.starts_with('-') {
        return value.to_string();
    }

    concat_string!("+", value)
}

/// Parses a decimal value from a given string.
///
/// This function accepts a string representation of a decimal number,
/// potentially containing commas as thousands separators and other escape
/// characters, and attempts to convert it into a `Decimal`. If the
/// conversion fails, an error is returned.
///
/// # Arguments
///
/// * `s`: A string slice containing the representation of a decimal number.
/// * `escape_chars`: Optional characters to be escaped from the input string.
///
/// # Returns
///
/// * `Result<Decimal>`: The parsed `Decimal` value if successful, or an error
///                      if the conversion fails.
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

/// Removes a set of escape characters from a given string.
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_truncate_decimal() {
        assert_eq!(truncate_decimal("123.456"), "123.45");
        assert_eq!(truncate_decimal("45.6789"), "45.67");
        assert_eq!(truncate_decimal("1"), "1");
        assert_eq!(truncate_decimal("-0.5"), "-0.5");
        assert_eq!(truncate_decimal("3.14"), "3.14");
        assert_eq!(truncate_decimal("0."), "0.");
        assert_eq!(truncate_decimal(""), "");
    }

    #[test]
    fn test_normalize_change_sign() {
        assert_eq!(normalize_change_sign("1.23"), "+1.23");
        assert_eq!(normalize_change_sign("-1.23"), "-1.23");
        assert_eq!(normalize_change_sign("0"), "+0");
        assert_eq!(normalize_change_sign(""), "");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,234.56", None).unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("-0.5", None).unwrap(), dec!(-0.5));
        assert!(parse_decimal(".", None).is_err());
        assert!(parse_decimal("-", None).is_err());
    }
}
