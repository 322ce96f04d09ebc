//! A checkout form driven through the submit gate.
//!
//! Run with: `cargo run --example checkout_form`

use cardform::{format, ExpiryDate, FieldId, FormConfig, FormGate, SchemeWatch, Visibility};
use chrono::Utc;

fn main() {
    println!("=== Checkout Form ===\n");

    let gate = FormGate::new(
        FormConfig::new()
            .with_cardholder_name(Visibility::Required)
            .with_billing_details(Visibility::Hidden),
    );
    let now = Utc::now();
    let mut snapshot = gate.new_snapshot();

    // -------------------------------------------------------------------------
    // Typing the card number
    // -------------------------------------------------------------------------
    println!("--- Card number ---\n");

    let number = "3782 822463 10005";
    let mut watch = SchemeWatch::new();
    for end in 1..=number.len() {
        if let Some(scheme) = watch.observe(&number[..end]) {
            println!("  after '{}': scheme icon -> {}", &number[..end], scheme);
        }
    }
    println!("  display: {}", format::format_card_number(number));
    println!();

    // -------------------------------------------------------------------------
    // Editing-ended events
    // -------------------------------------------------------------------------
    println!("--- Editing ended ---\n");

    let expiry = ExpiryDate::current().plus_years(2).format_long();
    let edits = [
        (FieldId::CardNumber, number),
        (FieldId::Expiry, expiry.as_str()),
        (FieldId::Cvv, "123"),
        (FieldId::Cvv, "1234"),
        (FieldId::CardholderName, "Ada Lovelace"),
    ];
    for (field, value) in edits {
        let enabled = gate.end_editing(&mut snapshot, field, value, now);
        println!(
            "  {:<16} -> {:<8} button {}",
            field.name(),
            gate.verdict(&snapshot, field, now).to_string(),
            if enabled { "enabled" } else { "disabled" }
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------
    println!("--- Submit ---\n");

    match gate.submit(&snapshot, now) {
        Ok(request) => println!("  token request: {request:?}"),
        Err(e) => println!("  refused: {e}"),
    }
}
