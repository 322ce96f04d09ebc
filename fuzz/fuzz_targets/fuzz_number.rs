//! Card number detection, validation and display formatting.

#![no_main]

use cardform::{detect, format, is_valid_number, validate_number, SchemeWatch};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let scheme = detect(&format::strip_separators(data));
    let valid = is_valid_number(data);
    assert_eq!(valid, validate_number(data).is_ok());
    if valid {
        assert!(scheme.is_known());
    }

    let _ = format::format_card_number(data);
    let _ = format::split_into_groups(data);

    let mut watch = SchemeWatch::new();
    for (end, _) in data.char_indices() {
        let _ = watch.observe(&data[..end]);
    }
});
