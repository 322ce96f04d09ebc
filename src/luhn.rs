//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate card numbers and other identification numbers.
//!
//! Two entry points are provided: [`validate`] over a digit slice and
//! [`passes`] over text. Both treat empty input as invalid, and both reject
//! the whole input if anything other than a digit shows up.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates text using the Luhn algorithm.
///
/// Every character must be an ASCII digit. Separators are not skipped here;
/// strip them first with [`crate::format::strip_separators`].
///
/// # Example
///
/// ```
/// use cardform::luhn::passes;
///
/// assert!(passes("4242424242424242"));
/// assert!(!passes("4242424242424243"));
/// assert!(!passes("4242 4242 4242 4242"));
/// assert!(!passes(""));
/// ```
pub fn passes(input: &str) -> bool {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u8> = input.bytes().map(|b| b - b'0').collect();
    validate(&digits)
}

/// Validates a card number using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise. An empty slice or any
/// element above 9 yields `false`.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use cardform::luhn::validate;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert!(validate(&digits));
///
/// let invalid = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 3];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
///
/// Callers must pass digits in 0..=9.
#[inline]
fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                u32::from(DOUBLE_TABLE[d as usize])
            } else {
                u32::from(d)
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes what the check digit
/// should be for the number to pass Luhn validation. Returns `None` if any
/// element is above 9.
///
/// # Example
///
/// ```
/// use cardform::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), Some(2));
/// ```
pub fn generate_check_digit(digits: &[u8]) -> Option<u8> {
    if digits.iter().any(|&d| d > 9) {
        return None;
    }

    // The check digit takes position 0, so every existing digit moves one
    // position left and the rightmost one becomes a doubled position.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                u32::from(DOUBLE_TABLE[d as usize])
            } else {
                u32::from(d)
            }
        })
        .sum();

    Some(((10 - (sum % 10)) % 10) as u8)
}
