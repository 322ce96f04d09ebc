//! Arbitrary edit sequences through the submit gate.

#![no_main]

use arbitrary::Arbitrary;
use cardform::{FieldId, FormConfig, FormGate, Visibility};
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    name: u8,
    billing: u8,
    edits: Vec<(u8, String)>,
}

fn visibility(choice: u8) -> Visibility {
    match choice % 3 {
        0 => Visibility::Required,
        1 => Visibility::Optional,
        _ => Visibility::Hidden,
    }
}

fuzz_target!(|input: Input| {
    let Some(now) = Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).single() else {
        return;
    };
    let gate = FormGate::new(
        FormConfig::new()
            .with_cardholder_name(visibility(input.name))
            .with_billing_details(visibility(input.billing)),
    );

    let mut snapshot = gate.new_snapshot();
    for (index, value) in input.edits {
        let field = FieldId::ALL[usize::from(index) % FieldId::ALL.len()];
        let enabled = gate.end_editing(&mut snapshot, field, value, now);
        assert_eq!(enabled, gate.is_submittable(&snapshot));
    }

    let fresh_ok = gate.invalid_fields_at(&snapshot, now).is_empty();
    assert_eq!(gate.is_submittable(&snapshot), fresh_ok);

    let card_ok = [FieldId::CardNumber, FieldId::Expiry, FieldId::Cvv]
        .into_iter()
        .all(|field| gate.verdict(&snapshot, field, now).is_valid());
    assert_eq!(gate.submit(&snapshot, now).is_ok(), card_ok);
    if fresh_ok {
        assert!(card_ok);
    }
});
