//! CVV validation against every scheme and policy.

#![no_main]

use cardform::cvv::{validate_cvv_for_scheme, CvvPolicy};
use cardform::CardScheme;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, u8)| {
    let (input, fixed) = data;
    for scheme in CardScheme::KNOWN.into_iter().chain([CardScheme::Unknown]) {
        for policy in [CvvPolicy::ByScheme, CvvPolicy::Fixed(fixed)] {
            if validate_cvv_for_scheme(input, scheme, policy).is_ok() {
                assert_eq!(input.len(), policy.expected_length(scheme));
            }
        }
    }
});
