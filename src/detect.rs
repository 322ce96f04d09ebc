//! Card scheme detection from a full or partially typed number.
//!
//! Detection walks [`PREFIX_TABLE`] from the widest prefix to the narrowest
//! and returns the first match. It is defined for partial input: `"4"` is
//! already Visa, while `"5"` stays `Unknown` until a second digit arrives.
//!
//! Full validation ([`validate_number`]) additionally requires a length the
//! scheme issues and a passing Luhn checksum.

use crate::error::NumberError;
use crate::format::{is_separator, strip_separators};
use crate::luhn;
use crate::scheme::{CardScheme, PREFIX_TABLE};

/// Widest prefix in the table; detection never looks further.
const MAX_PREFIX_WIDTH: usize = 4;

/// Detects the card scheme from a sequence of digit characters.
///
/// Returns [`CardScheme::Unknown`] for an empty sequence, for a prefix no
/// scheme uses and for a prefix containing a non-digit.
///
/// # Example
///
/// ```
/// use cardform::detect::detect;
/// use cardform::CardScheme;
///
/// assert_eq!(detect("4"), CardScheme::Visa);
/// assert_eq!(detect("4242424242424242"), CardScheme::Visa);
/// assert_eq!(detect("37"), CardScheme::Amex);
/// assert_eq!(detect("5"), CardScheme::Unknown);
/// assert_eq!(detect(""), CardScheme::Unknown);
/// ```
pub fn detect(digits: &str) -> CardScheme {
    let mut prefix = [0u8; MAX_PREFIX_WIDTH];
    let mut len = 0;
    for &b in digits.as_bytes().iter().take(MAX_PREFIX_WIDTH) {
        // A non-digit poisons every prefix that spans it.
        prefix[len] = if b.is_ascii_digit() { b - b'0' } else { u8::MAX };
        len += 1;
    }
    detect_digits(&prefix[..len])
}

/// Detects the card scheme from digit values (0-9).
#[inline]
pub fn detect_digits(digits: &[u8]) -> CardScheme {
    PREFIX_TABLE
        .iter()
        .find(|(range, _)| range.matches(digits))
        .map_or(CardScheme::Unknown, |&(_, scheme)| scheme)
}

/// Returns true if the number has a known scheme, a length that scheme
/// issues and a passing Luhn checksum.
///
/// Spaces and hyphens between digits are ignored.
///
/// # Example
///
/// ```
/// use cardform::detect::is_valid_number;
///
/// assert!(is_valid_number("4242424242424242"));
/// assert!(!is_valid_number("4242424242424243"));
/// assert!(!is_valid_number("5"));
/// ```
#[inline]
pub fn is_valid_number(digits: &str) -> bool {
    validate_number(digits).is_ok()
}

/// Validates a card number and reports the detected scheme.
///
/// # Errors
///
/// Returns a [`NumberError`] naming the first rule the number breaks, checked
/// in this order: empty input, invalid character, no digits, unknown scheme,
/// wrong length for the scheme, failed checksum.
pub fn validate_number(input: &str) -> Result<CardScheme, NumberError> {
    if input.is_empty() {
        return Err(NumberError::Empty);
    }

    let mut digits = Vec::with_capacity(input.len());
    for (position, c) in input.chars().enumerate() {
        match c {
            '0'..='9' => digits.push(c as u8 - b'0'),
            c if is_separator(c) => {}
            character => {
                return Err(NumberError::InvalidCharacter {
                    position,
                    character,
                })
            }
        }
    }

    if digits.is_empty() {
        return Err(NumberError::NoDigits);
    }

    let scheme = detect_digits(&digits);
    if !scheme.is_known() {
        return Err(NumberError::UnknownScheme);
    }

    if !scheme.is_valid_length(digits.len()) {
        return Err(NumberError::InvalidLength {
            scheme,
            length: digits.len(),
            valid_lengths: scheme.valid_lengths(),
        });
    }

    if !luhn::validate(&digits) {
        return Err(NumberError::InvalidChecksum);
    }

    Ok(scheme)
}

/// Tracks the scheme of a card number field across edits.
///
/// The host feeds every edit of the number field through [`SchemeWatch::observe`]
/// and updates the scheme icon only when it reports a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemeWatch {
    current: Option<CardScheme>,
}

impl SchemeWatch {
    /// Creates a watch that has not seen any input.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Last scheme reported, `Unknown` before the first edit.
    pub fn current(&self) -> CardScheme {
        self.current.unwrap_or(CardScheme::Unknown)
    }

    /// Records the field's new raw text.
    ///
    /// Returns `Some(scheme)` on the first edit and whenever the detected
    /// scheme differs from the previous one, `None` otherwise.
    pub fn observe(&mut self, raw: &str) -> Option<CardScheme> {
        let scheme = detect(&strip_separators(raw));
        if self.current == Some(scheme) {
            return None;
        }
        tracing::trace!(from = %self.current(), to = %scheme, "card scheme changed");
        self.current = Some(scheme);
        Some(scheme)
    }
}
