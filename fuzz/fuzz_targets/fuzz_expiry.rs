//! Free-text expiry parsing and the picker window.

#![no_main]

use arbitrary::Arbitrary;
use cardform::expiry;
use cardform::picker::ExpiryRange;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    years: u8,
    month_row: usize,
    year_row: usize,
    component: usize,
}

fuzz_target!(|input: Input<'_>| {
    let Some(reference) = Utc.with_ymd_and_hms(2018, 5, 15, 0, 0, 0).single() else {
        return;
    };

    let _ = expiry::parse_expiry(input.text);
    let _ = expiry::validate_expiry_at(input.text, reference, Some(20));
    if let Ok(date) = expiry::parse_expiry(input.text) {
        let _ = date.is_expired_at(reference);
        let _ = date.months_after(reference);
        let _ = date.format_short();
        let _ = date.format_long();
    }

    let range = ExpiryRange::new(reference, u16::from(input.years));
    let picked = range.resolve_selection(input.month_row, input.year_row);
    assert!(range.contains(picked));
    let _ = range.title_for(input.component, input.month_row);
});
