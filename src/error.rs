//! Error types for card number validation and form submission.
//!
//! The verdict-returning validators never surface these; they exist for
//! callers that want to tell the user why a value was refused.

use crate::form::FieldId;
use crate::CardScheme;
use std::fmt;

/// Reasons a card number fails full validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The input string was empty.
    Empty,

    /// The input held only separators.
    NoDigits,

    /// A character other than a digit or separator was found.
    InvalidCharacter {
        /// The position in the input string (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// No scheme prefix matched the number.
    UnknownScheme,

    /// The digit count is not one the detected scheme issues.
    InvalidLength {
        /// The detected card scheme.
        scheme: CardScheme,
        /// The actual number of digits.
        length: usize,
        /// The valid lengths for this scheme.
        valid_lengths: &'static [u8],
    },

    /// The Luhn checksum validation failed.
    InvalidChecksum,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),

            Self::NoDigits => write!(f, "card number contains no digits"),

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} \
                     (only digits, spaces, and hyphens allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::UnknownScheme => {
                write!(f, "unknown card scheme - check the card number prefix")
            }

            Self::InvalidLength {
                scheme,
                length,
                valid_lengths,
            } => {
                let valid_str: Vec<String> =
                    valid_lengths.iter().map(|l| l.to_string()).collect();
                write!(
                    f,
                    "{} cards must have {} digits, got {}",
                    scheme,
                    valid_str.join(" or "),
                    length
                )
            }

            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }
        }
    }
}

impl std::error::Error for NumberError {}

/// Returned when a token request is asked for while the card data is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// These card fields failed validation, in form order.
    InvalidFields(Vec<FieldId>),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
                write!(f, "form is not submittable: invalid {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumberError::Empty.to_string(), "card number is empty");

        assert_eq!(
            NumberError::InvalidCharacter {
                position: 5,
                character: 'x'
            }
            .to_string(),
            "invalid character 'x' at position 5 (only digits, spaces, and hyphens allowed)"
        );

        assert_eq!(
            NumberError::InvalidLength {
                scheme: CardScheme::Visa,
                length: 15,
                valid_lengths: CardScheme::Visa.valid_lengths(),
            }
            .to_string(),
            "Visa cards must have 13 or 16 or 19 digits, got 15"
        );

        assert_eq!(
            NumberError::InvalidChecksum.to_string(),
            "invalid checksum (Luhn check failed) - please verify the card number"
        );
    }

    #[test]
    fn test_submit_error_lists_fields() {
        let err = SubmitError::InvalidFields(vec![FieldId::CardNumber, FieldId::Cvv]);
        assert_eq!(
            err.to_string(),
            "form is not submittable: invalid card_number, cvv"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NumberError>();
        assert_send_sync::<SubmitError>();
    }
}
