//! Luhn checksum on arbitrary text and digit slices.

#![no_main]

use cardform::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = luhn::validate(data);
    let _ = luhn::generate_check_digit(data);

    if let Ok(text) = std::str::from_utf8(data) {
        let passes = luhn::passes(text);
        if passes {
            assert!(text.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    // Any digit sequence completed with its check digit must pass.
    let digits: Vec<u8> = data.iter().map(|b| b % 10).collect();
    if let Some(check) = luhn::generate_check_digit(&digits) {
        let mut full = digits;
        full.push(check);
        assert!(luhn::validate(&full));
    }
});
