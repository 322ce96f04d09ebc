//! The card details handed to a tokenization client when the user taps done.
//!
//! The done tap checks the card itself (number, expiry, CVV) from the raw
//! values in the snapshot. Stored verdicts are not trusted, so a host that
//! skips the editing-ended event still cannot hand off a bad card. The
//! cardholder name and billing address ride along when they were entered;
//! requiring them is the job of [`FormGate::is_submittable`], which drives the
//! action button.

use crate::error::SubmitError;
use crate::expiry::parse_expiry;
use crate::fields::Visibility;
use crate::form::{FieldGroup, FieldId, FormGate, FormSnapshot};
use crate::format::strip_separators;
use crate::mask::{mask_all, mask_digits};
use chrono::{DateTime, Utc};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Billing address entered on the form.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BillingAddress {
    /// First address line.
    pub address_line1: String,
    /// Second address line, `None` when blank.
    pub address_line2: Option<String>,
    /// City or town.
    pub city: String,
    /// State, county or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country name as shown to the user.
    pub country: String,
    /// Phone number.
    pub phone: String,
}

impl BillingAddress {
    fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let text = |field| snapshot.value(field).trim().to_owned();
        let line2 = text(FieldId::AddressLine2);
        Self {
            address_line1: text(FieldId::AddressLine1),
            address_line2: (!line2.is_empty()).then_some(line2),
            city: text(FieldId::City),
            state: text(FieldId::State),
            postal_code: text(FieldId::PostalCode),
            country: text(FieldId::Country),
            phone: text(FieldId::Phone),
        }
    }

    fn is_blank(&self) -> bool {
        self.address_line1.is_empty()
            && self.address_line2.is_none()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
            && self.phone.is_empty()
    }
}

impl fmt::Debug for BillingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingAddress")
            .field("city", &self.city)
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}

/// Card details ready for tokenization.
///
/// Sensitive strings are zeroed on drop and `Debug` shows only the last
/// four digits of the number.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardTokenRequest {
    /// Card number digits, separators removed.
    pub number: String,
    /// Two-digit expiry month, e.g. `"06"`.
    pub expiry_month: String,
    /// Two-digit expiry year, e.g. `"20"` for 2020.
    pub expiry_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Cardholder name; `None` when hidden or left blank.
    pub name: Option<String>,
    /// Billing address; `None` when hidden or left blank.
    pub billing: Option<BillingAddress>,
}

impl fmt::Debug for CardTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardTokenRequest")
            .field("number", &mask_digits(&self.number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &mask_all(&self.cvv))
            .field("name", &self.name.as_ref().map(|_| "<redacted>"))
            .field("billing", &self.billing)
            .finish()
    }
}

/// Builds the token request for a done tap.
///
/// # Errors
///
/// Returns [`SubmitError::InvalidFields`] listing the card fields (number,
/// expiry, CVV) that fail validation at `reference`. No request is produced
/// in that case.
pub fn build_token_request(
    gate: &FormGate,
    snapshot: &FormSnapshot,
    reference: DateTime<Utc>,
) -> Result<CardTokenRequest, SubmitError> {
    let invalid: Vec<FieldId> = FieldId::ALL
        .into_iter()
        .filter(|field| field.group() == FieldGroup::Card)
        .filter(|&field| !gate.verdict(snapshot, field, reference).is_valid())
        .collect();
    if !invalid.is_empty() {
        tracing::warn!(fields = ?invalid, "submit refused");
        return Err(SubmitError::InvalidFields(invalid));
    }

    let expiry = parse_expiry(snapshot.value(FieldId::Expiry))
        .map_err(|_| SubmitError::InvalidFields(vec![FieldId::Expiry]))?;

    let config = gate.config();
    let name = match config.cardholder_name() {
        Visibility::Hidden => None,
        _ => {
            let name = snapshot.value(FieldId::CardholderName).trim();
            (!name.is_empty()).then(|| name.to_owned())
        }
    };
    let billing = match config.billing_details() {
        Visibility::Hidden => None,
        _ => Some(BillingAddress::from_snapshot(snapshot)).filter(|address| !address.is_blank()),
    };

    let request = CardTokenRequest {
        number: strip_separators(snapshot.value(FieldId::CardNumber)),
        expiry_month: expiry.month_label(),
        expiry_year: expiry.short_year_label(),
        cvv: snapshot.value(FieldId::Cvv).to_owned(),
        name,
        billing,
    };
    tracing::debug!(
        scheme = %gate.scheme(snapshot),
        number = %mask_digits(&request.number),
        "card token request built"
    );
    Ok(request)
}

impl FormGate {
    /// Handles a tap on the done button, see [`build_token_request`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InvalidFields`] when the card data is invalid.
    pub fn submit(
        &self,
        snapshot: &FormSnapshot,
        reference: DateTime<Utc>,
    ) -> Result<CardTokenRequest, SubmitError> {
        build_token_request(self, snapshot, reference)
    }
}
