//! Per-field validity predicates.
//!
//! Each validator is a pure function of a field's raw text plus whatever
//! context it needs (reference time, detected scheme, visibility). None of
//! them fail: malformed input is simply [`Verdict::Invalid`].

use crate::cvv::{self, CvvPolicy};
use crate::detect;
use crate::expiry;
use crate::format::strip_separators;
use crate::CardScheme;
use chrono::{DateTime, Utc};
use std::fmt;

/// Outcome of validating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// The value is acceptable.
    Valid,
    /// The value is missing or malformed.
    Invalid,
    /// The field is hidden and takes no part in validation.
    Hidden,
}

impl Verdict {
    /// `Valid` for `true`, `Invalid` for `false`.
    #[inline]
    pub const fn from_bool(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    /// Returns true only for `Valid`.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Hidden => "hidden",
        })
    }
}

/// Whether a field group is shown, and whether it must be filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    /// Shown and must not be blank.
    #[default]
    Required,
    /// Shown; blank is fine.
    Optional,
    /// Not shown; excluded from validation.
    Hidden,
}

impl Visibility {
    /// Returns true unless the field is hidden.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            "hidden" => Ok(Self::Hidden),
            other => Err(format!(
                "unknown visibility '{other}' (expected required, optional or hidden)"
            )),
        }
    }
}

/// Card number: separators removed, the rest must be a valid number for a
/// known scheme.
pub fn validate_card_number(raw: &str) -> Verdict {
    Verdict::from_bool(detect::is_valid_number(&strip_separators(raw)))
}

/// Expiry text such as `"06/2020"`: must parse and not be before the month
/// of `reference`.
pub fn validate_expiry(raw: &str, reference: DateTime<Utc>) -> Verdict {
    let valid = expiry::parse_expiry(raw)
        .is_ok_and(|date| expiry::is_valid_expiry(date.month(), date.year(), reference));
    Verdict::from_bool(valid)
}

/// CVV: digits only, as many as `policy` asks for a card of `scheme`.
pub fn validate_cvv(raw: &str, scheme: CardScheme, policy: CvvPolicy) -> Verdict {
    Verdict::from_bool(cvv::is_valid_cvv(raw, scheme, policy))
}

/// Free text (cardholder name, address lines, postal code, ...).
///
/// Hidden fields are `Hidden`, optional fields are always `Valid`, and
/// required fields are `Valid` once they hold something besides whitespace.
pub fn validate_text(raw: &str, visibility: Visibility) -> Verdict {
    match visibility {
        Visibility::Hidden => Verdict::Hidden,
        Visibility::Optional => Verdict::Valid,
        Visibility::Required => Verdict::from_bool(!raw.trim().is_empty()),
    }
}
