//! Form state and the submit gate.
//!
//! The host owns a [`FormSnapshot`] and mutates it from UI events. The
//! [`FormGate`] holds only the [`FormConfig`]; every call takes the snapshot
//! explicitly and the gate never keeps a copy of it.
//!
//! ```
//! use cardform::{FieldId, FormConfig, FormGate, Visibility};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2018, 5, 15, 12, 0, 0).unwrap();
//! let gate = FormGate::new(
//!     FormConfig::new()
//!         .with_cardholder_name(Visibility::Hidden)
//!         .with_billing_details(Visibility::Hidden),
//! );
//! let mut snapshot = gate.new_snapshot();
//! assert!(!gate.is_submittable(&snapshot));
//!
//! gate.end_editing(&mut snapshot, FieldId::CardNumber, "4242 4242 4242 4242", now);
//! gate.end_editing(&mut snapshot, FieldId::Expiry, "06/2020", now);
//! assert!(gate.end_editing(&mut snapshot, FieldId::Cvv, "100", now));
//! ```

use crate::config::FormConfig;
use crate::detect::detect;
use crate::fields::{self, Verdict, Visibility};
use crate::format::strip_separators;
use crate::mask::mask_all;
use crate::CardScheme;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Groups whose visibility is configured together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// Number, expiry and CVV; always shown and required.
    Card,
    /// The cardholder name.
    CardholderName,
    /// Billing address fields.
    Billing,
}

/// Identifies an input field on the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldId {
    /// Card number.
    CardNumber,
    /// Expiry month and year.
    Expiry,
    /// Card verification value.
    Cvv,
    /// Name printed on the card.
    CardholderName,
    /// First address line.
    AddressLine1,
    /// Second address line.
    AddressLine2,
    /// City or town.
    City,
    /// State, county or region.
    State,
    /// Postal or ZIP code.
    PostalCode,
    /// Country name.
    Country,
    /// Phone number.
    Phone,
}

impl FieldId {
    /// Every field in the order the form lays them out.
    pub const ALL: [FieldId; 11] = [
        Self::CardNumber,
        Self::Expiry,
        Self::Cvv,
        Self::CardholderName,
        Self::AddressLine1,
        Self::AddressLine2,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::Country,
        Self::Phone,
    ];

    /// The group this field's visibility comes from.
    pub const fn group(&self) -> FieldGroup {
        match self {
            Self::CardNumber | Self::Expiry | Self::Cvv => FieldGroup::Card,
            Self::CardholderName => FieldGroup::CardholderName,
            _ => FieldGroup::Billing,
        }
    }

    /// Stable snake_case identifier.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CardNumber => "card_number",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
            Self::CardholderName => "cardholder_name",
            Self::AddressLine1 => "address_line1",
            Self::AddressLine2 => "address_line2",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postal_code",
            Self::Country => "country",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The current raw value of one field and its last verdict.
///
/// The value is zeroed when the state is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FieldState {
    value: String,
    #[zeroize(skip)]
    visibility: Visibility,
    #[zeroize(skip)]
    valid: bool,
}

impl FieldState {
    fn empty(visibility: Visibility) -> Self {
        Self {
            value: String::new(),
            visibility,
            // A blank optional field is acceptable from the start.
            valid: visibility == Visibility::Optional,
        }
    }

    /// Raw text as last entered.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Visibility the field was validated under.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns true if the last validation accepted the value.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("value", &mask_all(&self.value))
            .field("visibility", &self.visibility)
            .field("valid", &self.valid)
            .finish()
    }
}

/// Field states keyed by field, owned by the host.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    fields: BTreeMap<FieldId, FieldState>,
}

impl FormSnapshot {
    /// A snapshot with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot holding an empty state for every field `config` shows.
    pub fn for_config(config: &FormConfig) -> Self {
        let fields = config
            .visible_fields()
            .map(|(field, visibility)| (field, FieldState::empty(visibility)))
            .collect();
        Self { fields }
    }

    /// State of `field`, if it has one.
    pub fn get(&self, field: FieldId) -> Option<&FieldState> {
        self.fields.get(&field)
    }

    /// Raw text of `field`, empty when it has no state.
    pub fn value(&self, field: FieldId) -> &str {
        self.get(field).map_or("", FieldState::value)
    }

    /// Stores new raw text for `field` without validating it.
    ///
    /// A field seen for the first time starts out required and invalid until
    /// the next [`FormGate::refresh`].
    pub fn set_value(&mut self, field: FieldId, raw: impl Into<String>) {
        let state = self
            .fields
            .entry(field)
            .or_insert_with(|| FieldState::empty(Visibility::Required));
        state.value.zeroize();
        state.value = raw.into();
    }

    /// Drops the state of `field`.
    pub fn remove(&mut self, field: FieldId) {
        self.fields.remove(&field);
    }

    /// Fields that have state, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldState)> {
        self.fields.iter().map(|(&field, state)| (field, state))
    }

    /// Number of fields with state.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field has state.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decides whether the form can be submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormGate {
    config: FormConfig,
}

impl FormGate {
    /// Creates a gate for a form built with `config`.
    pub const fn new(config: FormConfig) -> Self {
        Self { config }
    }

    /// The configuration the form was built with.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// A fresh snapshot for this form.
    pub fn new_snapshot(&self) -> FormSnapshot {
        FormSnapshot::for_config(&self.config)
    }

    /// Scheme detected from the snapshot's card number.
    pub fn scheme(&self, snapshot: &FormSnapshot) -> CardScheme {
        detect(&strip_separators(snapshot.value(FieldId::CardNumber)))
    }

    /// Validates one field from the snapshot's current values.
    ///
    /// The CVV verdict depends on the scheme of the card number in the same
    /// snapshot.
    pub fn verdict(
        &self,
        snapshot: &FormSnapshot,
        field: FieldId,
        reference: DateTime<Utc>,
    ) -> Verdict {
        let visibility = self.config.visibility_of(field);
        if !visibility.is_visible() {
            return Verdict::Hidden;
        }
        let raw = snapshot.value(field);
        match field {
            FieldId::CardNumber => fields::validate_card_number(raw),
            FieldId::Expiry => fields::validate_expiry(raw, reference),
            FieldId::Cvv => {
                fields::validate_cvv(raw, self.scheme(snapshot), self.config.cvv_policy())
            }
            _ => fields::validate_text(raw, visibility),
        }
    }

    /// Verdicts of every visible field, in form order.
    pub fn verdicts(
        &self,
        snapshot: &FormSnapshot,
        reference: DateTime<Utc>,
    ) -> Vec<(FieldId, Verdict)> {
        self.config
            .visible_fields()
            .map(|(field, _)| (field, self.verdict(snapshot, field, reference)))
            .collect()
    }

    /// Revalidates every visible field and stores the results in the snapshot.
    ///
    /// States of fields the configuration hides are left untouched; the gate
    /// ignores them.
    pub fn refresh(&self, snapshot: &mut FormSnapshot, reference: DateTime<Utc>) {
        for (field, verdict) in self.verdicts(snapshot, reference) {
            let visibility = self.config.visibility_of(field);
            let state = snapshot
                .fields
                .entry(field)
                .or_insert_with(|| FieldState::empty(visibility));
            state.visibility = visibility;
            state.valid = verdict.is_valid();
        }
    }

    /// Handles the "editing ended" event for `field`.
    ///
    /// Stores `raw`, revalidates the form and returns whether it is now
    /// submittable, which is what the action button should be set to.
    pub fn end_editing(
        &self,
        snapshot: &mut FormSnapshot,
        field: FieldId,
        raw: impl Into<String>,
        reference: DateTime<Utc>,
    ) -> bool {
        snapshot.set_value(field, raw);
        self.refresh(snapshot, reference);
        let submittable = self.is_submittable(snapshot);
        tracing::debug!(
            %field,
            valid = snapshot.get(field).is_some_and(FieldState::is_valid),
            submittable,
            "field editing ended"
        );
        submittable
    }

    /// Visible fields whose stored state is invalid, or required fields with
    /// no state at all.
    pub fn invalid_fields(&self, snapshot: &FormSnapshot) -> Vec<FieldId> {
        self.config
            .visible_fields()
            .filter(|&(field, visibility)| match snapshot.get(field) {
                Some(state) => !state.valid,
                None => visibility == Visibility::Required,
            })
            .map(|(field, _)| field)
            .collect()
    }

    /// Returns true when every visible field's stored state is valid.
    ///
    /// Hidden fields and fields the configuration does not know are ignored.
    /// A required field without state counts as invalid.
    pub fn is_submittable(&self, snapshot: &FormSnapshot) -> bool {
        self.config
            .visible_fields()
            .all(|(field, visibility)| match snapshot.get(field) {
                Some(state) => state.valid,
                None => visibility == Visibility::Optional,
            })
    }

    /// Visible fields that fail validation right now, ignoring stored verdicts.
    pub fn invalid_fields_at(
        &self,
        snapshot: &FormSnapshot,
        reference: DateTime<Utc>,
    ) -> Vec<FieldId> {
        self.verdicts(snapshot, reference)
            .into_iter()
            .filter(|(_, verdict)| !verdict.is_valid())
            .map(|(field, _)| field)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn may_2018() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).unwrap()
    }

    fn card_only() -> FormGate {
        FormGate::new(
            FormConfig::new()
                .with_cardholder_name(Visibility::Hidden)
                .with_billing_details(Visibility::Hidden),
        )
    }

    fn fill(gate: &FormGate, number: &str, expiry: &str, cvv: &str) -> FormSnapshot {
        let mut snapshot = gate.new_snapshot();
        snapshot.set_value(FieldId::CardNumber, number);
        snapshot.set_value(FieldId::Expiry, expiry);
        snapshot.set_value(FieldId::Cvv, cvv);
        gate.refresh(&mut snapshot, may_2018());
        snapshot
    }

    #[test]
    fn test_new_snapshot_is_not_submittable() {
        let gate = card_only();
        let snapshot = gate.new_snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(!gate.is_submittable(&snapshot));
    }

    #[test]
    fn test_valid_card_fields_submit() {
        let gate = card_only();
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        assert!(gate.is_submittable(&snapshot));
        assert!(gate.invalid_fields(&snapshot).is_empty());
    }

    #[test]
    fn test_short_cvv_blocks() {
        let gate = card_only();
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "10");
        assert!(!gate.is_submittable(&snapshot));
        assert_eq!(gate.invalid_fields(&snapshot), vec![FieldId::Cvv]);
    }

    #[test]
    fn test_unknown_scheme_blocks() {
        let gate = card_only();
        let snapshot = fill(&gate, "5", "06/2020", "100");
        assert!(!gate.is_submittable(&snapshot));
        assert_eq!(gate.invalid_fields(&snapshot), vec![FieldId::CardNumber]);
    }

    #[test]
    fn test_cvv_revalidated_when_scheme_changes() {
        let gate = card_only();
        let mut snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        assert!(gate.is_submittable(&snapshot));
        let amex = "378282246310005";
        assert!(!gate.end_editing(&mut snapshot, FieldId::CardNumber, amex, may_2018()));
        assert_eq!(gate.invalid_fields(&snapshot), vec![FieldId::Cvv]);
        assert!(gate.end_editing(&mut snapshot, FieldId::Cvv, "1000", may_2018()));
    }

    #[test]
    fn test_required_name_missing_blocks() {
        let gate = FormGate::new(FormConfig::new().with_billing_details(Visibility::Hidden));
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        assert!(!gate.is_submittable(&snapshot));
        assert_eq!(gate.invalid_fields(&snapshot), vec![FieldId::CardholderName]);
    }

    #[test]
    fn test_optional_name_may_stay_blank() {
        let gate = FormGate::new(
            FormConfig::new()
                .with_cardholder_name(Visibility::Optional)
                .with_billing_details(Visibility::Hidden),
        );
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        assert!(gate.is_submittable(&snapshot));
    }

    #[test]
    fn test_missing_required_state_fails_closed() {
        let gate = card_only();
        let mut snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        snapshot.remove(FieldId::Expiry);
        assert!(!gate.is_submittable(&snapshot));
        assert_eq!(gate.invalid_fields(&snapshot), vec![FieldId::Expiry]);
    }

    #[test]
    fn test_hidden_field_state_is_ignored() {
        let gate = card_only();
        let mut snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        snapshot.set_value(FieldId::CardholderName, "");
        gate.refresh(&mut snapshot, may_2018());
        assert!(gate.is_submittable(&snapshot));
        assert_eq!(gate.verdict(&snapshot, FieldId::CardholderName, may_2018()), Verdict::Hidden);
    }

    #[test]
    fn test_is_submittable_is_idempotent() {
        let gate = card_only();
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        let before = format!("{snapshot:?}");
        assert_eq!(gate.is_submittable(&snapshot), gate.is_submittable(&snapshot));
        assert_eq!(format!("{snapshot:?}"), before);
    }

    #[test]
    fn test_invalid_fields_at_ignores_stale_flags() {
        let gate = card_only();
        let mut snapshot = gate.new_snapshot();
        snapshot.set_value(FieldId::CardNumber, "4242424242424242");
        snapshot.set_value(FieldId::Expiry, "06/2020");
        snapshot.set_value(FieldId::Cvv, "100");
        // No refresh yet, so stored flags are still the initial ones.
        assert!(!gate.is_submittable(&snapshot));
        assert!(gate.invalid_fields_at(&snapshot, may_2018()).is_empty());
    }

    #[test]
    fn test_field_state_debug_is_masked() {
        let gate = card_only();
        let snapshot = fill(&gate, "4242424242424242", "06/2020", "100");
        let debug = format!("{snapshot:?}");
        assert!(!debug.contains("4242"));
        assert!(!debug.contains("100"));
    }
}
