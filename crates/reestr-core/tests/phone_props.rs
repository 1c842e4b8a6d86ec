//! Property tests for the phone normalization engine.

use proptest::prelude::*;

use reestr_core::phone::{normalize_number, split_code_body};

proptest! {
    // Any input at all: never panic, never produce a non-E164 non-empty
    // result shape.
    #[test]
    fn normalization_total_over_arbitrary_input(input in ".{0,40}") {
        let normalized = normalize_number(&input);
        prop_assert!(normalized.is_empty() || normalized.starts_with('+'));
    }

    #[test]
    fn normalization_is_deterministic(input in ".{0,40}") {
        prop_assert_eq!(normalize_number(&input), normalize_number(&input));
    }

    // Text without digits has nothing to parse and nothing to match.
    #[test]
    fn digitless_text_yields_empty(input in "[a-zA-Zа-яА-Я .,-]{0,30}") {
        prop_assert_eq!(normalize_number(&input), "");
    }

    #[test]
    fn code_body_reassembles_the_number(digits in "9[0-9]{9}") {
        let normalized = normalize_number(&format!("8{digits}"));
        if !normalized.is_empty() {
            let (code, body) = split_code_body(&normalized);
            prop_assert_eq!(format!("+7{code}{body}"), normalized);
        }
    }
}
