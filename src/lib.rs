//! # cardform
//!
//! Validation engine behind a payment card entry form. The host UI owns every
//! widget and all mutable state; this crate answers the questions the UI asks
//! on each event.
//!
//! ## Features
//!
//! - Card scheme detection from partially typed numbers
//! - Luhn checksum and per-scheme length validation
//! - Expiry picker window with clamping of out-of-range picks
//! - Per-field verdicts (number, expiry, CVV, name, billing address)
//! - A submit gate over all visible fields, and the token request sent on done
//!
//! ## Quick Start
//!
//! ```rust
//! use cardform::{detect, is_valid_number, CardScheme};
//!
//! // Drive the scheme icon while the user types
//! assert_eq!(detect("4"), CardScheme::Visa);
//! assert_eq!(detect("37"), CardScheme::Amex);
//!
//! // Full validation
//! assert!(is_valid_number("4242424242424242"));
//! assert!(!is_valid_number("4242424242424243"));
//! ```
//!
//! ## Expiry Picker
//!
//! ```rust
//! use cardform::picker::{ExpiryRange, MONTH_COMPONENT};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).unwrap();
//! let range = ExpiryRange::new(now, 20);
//!
//! // Picking January of this year snaps to the current month
//! let picked = range.resolve_selection(0, 0);
//! assert_eq!(picked.month(), 5);
//! assert_eq!(range.title_for(MONTH_COMPONENT, 4).as_deref(), Some("05"));
//! assert_eq!(range.title_for(3, 1), None);
//! ```
//!
//! ## Submit Gate
//!
//! ```rust
//! use cardform::{FieldId, FormConfig, FormGate, Visibility};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).unwrap();
//! let gate = FormGate::new(
//!     FormConfig::new()
//!         .with_cardholder_name(Visibility::Hidden)
//!         .with_billing_details(Visibility::Hidden),
//! );
//!
//! let mut snapshot = gate.new_snapshot();
//! snapshot.set_value(FieldId::CardNumber, "4242 4242 4242 4242");
//! snapshot.set_value(FieldId::Expiry, "06/2020");
//! let enabled = gate.end_editing(&mut snapshot, FieldId::Cvv, "100", now);
//! assert!(enabled);
//!
//! let request = gate.submit(&snapshot, now).unwrap();
//! assert_eq!(request.number, "4242424242424242");
//! assert_eq!(request.expiry_year, "20");
//! ```
//!
//! ## Supported Card Schemes
//!
//! | Scheme | Prefix | Length | CVV |
//! |--------|--------|--------|-----|
//! | Visa | 4 | 13, 16, 19 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 6011, 644-649, 65 | 16-19 | 3 |
//! | Diners Club | 300-305, 36, 38, 39 | 14-19 | 3 |
//! | JCB | 3528-3589 | 16-19 | 3 |
//! | UnionPay | 62 | 16-19 | 3 |
//! | Maestro | 5018, 5020, 5038, 5893, 6304, 6759, 6761-6763 | 12-19 | 3 |
//! | Mir | 2200-2204 | 16-19 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | (De)serialize `FormConfig`, serialize `CardTokenRequest` |
//! | `cli` | `cardform` command-line tool |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod country;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod fields;
pub mod form;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod picker;
pub mod scheme;
pub mod token;

// Re-export main types at crate root
pub use config::FormConfig;
pub use cvv::CvvPolicy;
pub use detect::{detect, is_valid_number, validate_number, SchemeWatch};
pub use error::{NumberError, SubmitError};
pub use expiry::{is_valid_expiry, ExpiryDate, ExpiryError};
pub use fields::{Verdict, Visibility};
pub use form::{FieldId, FieldState, FormGate, FormSnapshot};
pub use picker::ExpiryRange;
pub use scheme::CardScheme;
pub use token::{BillingAddress, CardTokenRequest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardScheme>();
        assert_send_sync::<FormGate>();
        assert_send_sync::<FormSnapshot>();
        assert_send_sync::<ExpiryRange>();
        assert_send_sync::<CardTokenRequest>();
        assert_send_sync::<NumberError>();
    }

    #[test]
    fn test_root_reexports() {
        assert_eq!(detect("4242"), CardScheme::Visa);
        assert!(is_valid_number("4242424242424242"));
        assert_eq!(validate_number("5"), Err(NumberError::UnknownScheme));
    }
}
