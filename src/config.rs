//! Form configuration, fixed when the form is built.

use crate::cvv::CvvPolicy;
use crate::fields::Visibility;
use crate::form::{FieldGroup, FieldId};
use crate::picker::{ExpiryRange, DEFAULT_FUTURE_YEARS};
use chrono::{DateTime, Utc};

/// Which optional field groups the form shows and how the card fields are
/// checked.
///
/// The card number, expiry and CVV are always shown and always required.
///
/// # Example
///
/// ```
/// use cardform::{FormConfig, Visibility};
///
/// let config = FormConfig::new()
///     .with_cardholder_name(Visibility::Hidden)
///     .with_billing_details(Visibility::Optional);
/// assert_eq!(config.cardholder_name(), Visibility::Hidden);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormConfig {
    cardholder_name: Visibility,
    billing_details: Visibility,
    expiry_years: u16,
    cvv_policy: CvvPolicy,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            cardholder_name: Visibility::Required,
            billing_details: Visibility::Required,
            expiry_years: DEFAULT_FUTURE_YEARS,
            cvv_policy: CvvPolicy::ByScheme,
        }
    }
}

impl FormConfig {
    /// Default configuration: every group required, 20 years of expiry,
    /// CVV length by scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the visibility of the cardholder name field.
    #[must_use]
    pub fn with_cardholder_name(mut self, visibility: Visibility) -> Self {
        self.cardholder_name = visibility;
        self
    }

    /// Sets the visibility of the billing address group.
    #[must_use]
    pub fn with_billing_details(mut self, visibility: Visibility) -> Self {
        self.billing_details = visibility;
        self
    }

    /// Sets how many years after the current one the expiry picker offers.
    #[must_use]
    pub fn with_expiry_years(mut self, years: u16) -> Self {
        self.expiry_years = years;
        self
    }

    /// Sets how the CVV length is chosen.
    #[must_use]
    pub fn with_cvv_policy(mut self, policy: CvvPolicy) -> Self {
        self.cvv_policy = policy;
        self
    }

    /// Visibility of the cardholder name field.
    pub const fn cardholder_name(&self) -> Visibility {
        self.cardholder_name
    }

    /// Visibility of the billing address group.
    pub const fn billing_details(&self) -> Visibility {
        self.billing_details
    }

    /// Years after the current one offered by the expiry picker.
    pub const fn expiry_years(&self) -> u16 {
        self.expiry_years
    }

    /// CVV length policy.
    pub const fn cvv_policy(&self) -> CvvPolicy {
        self.cvv_policy
    }

    /// Visibility of a single field under this configuration.
    ///
    /// The second address line is never required; it is optional whenever
    /// the billing group is shown.
    pub fn visibility_of(&self, field: FieldId) -> Visibility {
        match field.group() {
            FieldGroup::Card => Visibility::Required,
            FieldGroup::CardholderName => self.cardholder_name,
            FieldGroup::Billing => match (field, self.billing_details) {
                (_, Visibility::Hidden) => Visibility::Hidden,
                (FieldId::AddressLine2, _) => Visibility::Optional,
                (_, visibility) => visibility,
            },
        }
    }

    /// Every field that is not hidden, in form order, with its visibility.
    pub fn visible_fields(&self) -> impl Iterator<Item = (FieldId, Visibility)> + '_ {
        FieldId::ALL
            .into_iter()
            .map(move |field| (field, self.visibility_of(field)))
            .filter(|(_, visibility)| visibility.is_visible())
    }

    /// Expiry picker window for `reference`.
    pub fn expiry_range(&self, reference: DateTime<Utc>) -> ExpiryRange {
        ExpiryRange::new(reference, self.expiry_years)
    }

    /// Parses a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or unknown values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::new();
        assert_eq!(config.cardholder_name(), Visibility::Required);
        assert_eq!(config.billing_details(), Visibility::Required);
        assert_eq!(config.expiry_years(), 20);
        assert_eq!(config.cvv_policy(), CvvPolicy::ByScheme);
    }

    #[test]
    fn test_all_groups_visible_by_default() {
        let config = FormConfig::new();
        assert_eq!(config.visible_fields().count(), FieldId::ALL.len());
        assert_eq!(config.visibility_of(FieldId::AddressLine2), Visibility::Optional);
    }

    #[test]
    fn test_hidden_groups_drop_out() {
        let config = FormConfig::new()
            .with_cardholder_name(Visibility::Hidden)
            .with_billing_details(Visibility::Hidden);
        let visible: Vec<FieldId> = config.visible_fields().map(|(field, _)| field).collect();
        assert_eq!(visible, vec![FieldId::CardNumber, FieldId::Expiry, FieldId::Cvv]);
    }

    #[test]
    fn test_optional_billing() {
        let config = FormConfig::new().with_billing_details(Visibility::Optional);
        assert_eq!(config.visibility_of(FieldId::City), Visibility::Optional);
        assert_eq!(config.visibility_of(FieldId::CardNumber), Visibility::Required);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config =
            FormConfig::from_json(r#"{"cardholder_name":"hidden","cvv_policy":{"fixed":4}}"#)
                .unwrap();
        assert_eq!(config.cardholder_name(), Visibility::Hidden);
        assert_eq!(config.billing_details(), Visibility::Required);
        assert_eq!(config.cvv_policy(), CvvPolicy::Fixed(4));
        assert!(FormConfig::from_json(r#"{"billing_details":"sometimes"}"#).is_err());
    }
}
