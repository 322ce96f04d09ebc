//! Masking for card data that ends up in logs or `Debug` output.
//!
//! PCI-DSS allows showing the last four digits of a number. Nothing else
//! from a card number or CVV should appear in a log line.

/// Masks a card number showing only the last 4 digits.
///
/// Non-digit characters are dropped first. Inputs of four digits or fewer
/// are masked entirely.
///
/// # Example
///
/// ```
/// use cardform::mask::mask_digits;
///
/// assert_eq!(mask_digits("4242 4242 4242 4242"), "************4242");
/// assert_eq!(mask_digits("4242"), "****");
/// assert_eq!(mask_digits(""), "");
/// ```
pub fn mask_digits(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let mut result = "*".repeat(len - 4);
    result.extend(&digits[len - 4..]);
    result
}

/// Replaces every character of a secret with `*`.
#[inline]
pub fn mask_all(input: &str) -> String {
    "*".repeat(input.chars().count())
}
