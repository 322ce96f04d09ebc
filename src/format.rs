//! Card number normalization and display formatting.
//!
//! Text fields may show a card number with grouping separators. Validation
//! always works on the number with separators removed, see
//! [`strip_separators`].
//!
//! # Format Conventions
//!
//! - **Visa/Mastercard/Discover** (16 digits): `XXXX XXXX XXXX XXXX`
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Diners Club** (14 digits): `XXXX XXXXXX XXXX`
//! - **Other**: Groups of 4 with remainder at end
//!
//! # Example
//!
//! ```
//! use cardform::format::{format_card_number, format_with_separator, strip_separators};
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_with_separator("4242424242424242", "-"), "4242-4242-4242-4242");
//! assert_eq!(strip_separators("4242 4242-4242 4242"), "4242424242424242");
//! ```

use crate::detect::detect;
use crate::CardScheme;

/// Returns true for characters a text field may use to group digits.
#[inline]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Removes grouping separators, leaving every other character in place.
///
/// Anything that is neither a digit nor a separator survives so that the
/// checksum sees it and refuses the number.
///
/// # Example
///
/// ```
/// use cardform::format::strip_separators;
///
/// assert_eq!(strip_separators(" 4242 4242 4242 4242 "), "4242424242424242");
/// assert_eq!(strip_separators("4242-42x2"), "424242x2");
/// ```
pub fn strip_separators(input: &str) -> String {
    input.chars().filter(|&c| !is_separator(c)).collect()
}

/// Formats a card number with standard grouping and a space separator.
///
/// Non-digit characters are dropped from the output.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number with a custom separator.
///
/// Groups are chosen from the detected scheme, so this also works on
/// partially typed numbers.
///
/// # Example
///
/// ```
/// use cardform::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4242424242424242", " - "), "4242 - 4242 - 4242 - 4242");
/// assert_eq!(format_with_separator("37828", " "), "3782 8");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    format_for_scheme(&digits, detect(&digits), separator)
}

/// Formats a card number for a specific scheme with a custom separator.
pub fn format_for_scheme(input: &str, scheme: CardScheme, separator: &str) -> String {
    split_into_groups_for(input, scheme).join(separator)
}

/// Splits the digits of a card number into display groups.
///
/// # Example
///
/// ```
/// use cardform::format::split_into_groups;
///
/// assert_eq!(split_into_groups("4242424242424242"), vec!["4242", "4242", "4242", "4242"]);
/// assert_eq!(split_into_groups("378282246310005"), vec!["3782", "822463", "10005"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    split_into_groups_for(&digits, detect(&digits))
}

fn split_into_groups_for(input: &str, scheme: CardScheme) -> Vec<String> {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut groups = Vec::new();
    let mut pos = 0;

    for size in grouping_for_scheme(scheme, digits.len()) {
        if pos >= digits.len() {
            break;
        }
        let end = (pos + size).min(digits.len());
        groups.push(digits[pos..end].iter().collect());
        pos = end;
    }

    if pos < digits.len() {
        groups.push(digits[pos..].iter().collect());
    }

    groups
}

/// Returns the digit grouping pattern for a scheme.
fn grouping_for_scheme(scheme: CardScheme, length: usize) -> Vec<usize> {
    match scheme {
        CardScheme::Amex => vec![4, 6, 5],
        CardScheme::DinersClub if length == 14 => vec![4, 6, 4],
        _ => {
            let mut groups = vec![4; length / 4];
            if length % 4 > 0 {
                groups.push(length % 4);
            }
            groups
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_visa_16() {
        assert_eq!(
            format_card_number("4242424242424242"),
            "4242 4242 4242 4242"
        );
    }

    #[test]
    fn test_format_visa_13() {
        assert_eq!(format_card_number("4222222222222"), "4222 2222 2222 2");
    }

    #[test]
    fn test_format_amex() {
        assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
    }

    #[test]
    fn test_format_diners_14() {
        assert_eq!(format_card_number("30569309025904"), "3056 930902 5904");
    }

    #[test]
    fn test_format_partial_input() {
        assert_eq!(format_card_number("4"), "4");
        assert_eq!(format_card_number("42424"), "4242 4");
        assert_eq!(format_card_number("3782822"), "3782 822");
    }

    #[test]
    fn test_format_already_formatted() {
        assert_eq!(
            format_card_number("4242-4242-4242-4242"),
            "4242 4242 4242 4242"
        );
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("   "), "");
    }

    #[test]
    fn test_format_19_digit() {
        assert_eq!(
            format_card_number("4111111111111111111"),
            "4111 1111 1111 1111 111"
        );
    }

    #[test]
    fn test_format_for_scheme() {
        assert_eq!(
            format_for_scheme("378282246310005", CardScheme::Amex, "-"),
            "3782-822463-10005"
        );
    }

    #[test]
    fn test_strip_separators_keeps_other_characters() {
        assert_eq!(strip_separators("4242 4242\t4242-4242"), "4242424242424242");
        assert_eq!(strip_separators("4242.4242"), "4242.4242");
        assert_eq!(strip_separators("  "), "");
    }
}
