//! CVV/CVC/CID validation.
//!
//! The expected length comes from the detected card scheme (Amex prints four
//! digits on the front, everyone else three on the back) unless the form is
//! configured with a fixed length.
//!
//! # Example
//!
//! ```
//! use cardform::cvv::{validate_cvv_for_scheme, CvvPolicy};
//! use cardform::CardScheme;
//!
//! assert!(validate_cvv_for_scheme("123", CardScheme::Visa, CvvPolicy::ByScheme).is_ok());
//! assert!(validate_cvv_for_scheme("1234", CardScheme::Amex, CvvPolicy::ByScheme).is_ok());
//! assert!(validate_cvv_for_scheme("1234", CardScheme::Visa, CvvPolicy::ByScheme).is_err());
//! assert!(validate_cvv_for_scheme("1234", CardScheme::Visa, CvvPolicy::Fixed(4)).is_ok());
//! ```

use crate::CardScheme;
use std::fmt;

/// How many CVV digits the form asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CvvPolicy {
    /// Use the length printed on cards of the detected scheme.
    #[default]
    ByScheme,
    /// Require exactly this many digits for every scheme.
    Fixed(u8),
}

impl CvvPolicy {
    /// Expected digit count for a card of `scheme`.
    #[inline]
    pub const fn expected_length(&self, scheme: CardScheme) -> usize {
        match self {
            Self::ByScheme => scheme.cvv_length(),
            Self::Fixed(length) => *length as usize,
        }
    }
}

/// Errors that can occur during CVV validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvvError {
    /// The input is empty.
    Empty,
    /// The CVV contains non-digit characters.
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
    /// The CVV length doesn't match what the scheme (or policy) requires.
    WrongLength {
        /// The card scheme.
        scheme: CardScheme,
        /// Actual length provided.
        length: usize,
        /// Expected length.
        expected: usize,
    },
}

impl fmt::Display for CvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "CVV is empty"),
            Self::InvalidCharacter { character, position } => {
                write!(f, "invalid character '{}' at position {}", character, position)
            }
            Self::WrongLength {
                scheme,
                length,
                expected,
            } => {
                write!(
                    f,
                    "{} cards require {} digit CVV, got {}",
                    scheme.name(),
                    expected,
                    length
                )
            }
        }
    }
}

impl std::error::Error for CvvError {}

/// Validates a CVV for a card of `scheme`.
///
/// # Errors
///
/// Returns [`CvvError::Empty`], [`CvvError::InvalidCharacter`] for anything
/// but ASCII digits, or [`CvvError::WrongLength`].
pub fn validate_cvv_for_scheme(
    input: &str,
    scheme: CardScheme,
    policy: CvvPolicy,
) -> Result<(), CvvError> {
    if input.is_empty() {
        return Err(CvvError::Empty);
    }

    if let Some((position, character)) =
        input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(CvvError::InvalidCharacter {
            character,
            position,
        });
    }

    let expected = policy.expected_length(scheme);
    if input.len() != expected {
        return Err(CvvError::WrongLength {
            scheme,
            length: input.len(),
            expected,
        });
    }

    Ok(())
}

/// Checks if a string is a valid CVV for `scheme` under `policy`.
#[inline]
pub fn is_valid_cvv(input: &str, scheme: CardScheme, policy: CvvPolicy) -> bool {
    validate_cvv_for_scheme(input, scheme, policy).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_digit_schemes() {
        for scheme in [
            CardScheme::Visa,
            CardScheme::Mastercard,
            CardScheme::Discover,
            CardScheme::Jcb,
        ] {
            assert!(is_valid_cvv("100", scheme, CvvPolicy::ByScheme));
            assert!(!is_valid_cvv("1000", scheme, CvvPolicy::ByScheme));
            assert!(!is_valid_cvv("10", scheme, CvvPolicy::ByScheme));
        }
    }

    #[test]
    fn test_amex_requires_four() {
        assert!(is_valid_cvv("1234", CardScheme::Amex, CvvPolicy::ByScheme));
        assert!(!is_valid_cvv("123", CardScheme::Amex, CvvPolicy::ByScheme));
    }

    #[test]
    fn test_fixed_policy_overrides_scheme() {
        assert!(is_valid_cvv("123", CardScheme::Amex, CvvPolicy::Fixed(3)));
        assert!(!is_valid_cvv("1234", CardScheme::Amex, CvvPolicy::Fixed(3)));
    }

    #[test]
    fn test_leading_zeros() {
        assert!(is_valid_cvv("007", CardScheme::Visa, CvvPolicy::ByScheme));
        assert!(is_valid_cvv("0001", CardScheme::Amex, CvvPolicy::ByScheme));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            validate_cvv_for_scheme("", CardScheme::Visa, CvvPolicy::ByScheme),
            Err(CvvError::Empty)
        );
        assert_eq!(
            validate_cvv_for_scheme("12a", CardScheme::Visa, CvvPolicy::ByScheme),
            Err(CvvError::InvalidCharacter {
                character: 'a',
                position: 2
            })
        );
        assert_eq!(
            validate_cvv_for_scheme("10", CardScheme::Visa, CvvPolicy::ByScheme),
            Err(CvvError::WrongLength {
                scheme: CardScheme::Visa,
                length: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_cvv_error_display() {
        assert!(CvvError::Empty.to_string().contains("empty"));

        let err = CvvError::WrongLength {
            scheme: CardScheme::Amex,
            length: 3,
            expected: 4,
        };
        assert_eq!(err.to_string(), "American Express cards require 4 digit CVV, got 3");
    }
}
