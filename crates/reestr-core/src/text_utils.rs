//! Character-based text helpers.
//!
//! Register payloads are largely Cyrillic, so all positional slicing here is
//! by character, never by byte offset.

use once_cell::sync::Lazy;
use regex::Regex;

/// Slice `[start, end)` by character position, clamped to the string; a
/// collapsed or inverted span yields the empty string.
pub fn char_slice(value: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    value.chars().skip(start).take(end - start).collect()
}

/// Everything from character `start` onward.
pub fn char_slice_from(value: &str, start: usize) -> String {
    value.chars().skip(start).collect()
}

/// The last `n` characters.
pub fn char_suffix(value: &str, n: usize) -> String {
    let len = value.chars().count();
    value.chars().skip(len.saturating_sub(n)).collect()
}

pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Left-pad with zeroes until the requested length is reached.
pub fn pad_left_zeroes(value: &str, length: usize) -> String {
    let mut padded = value.to_string();
    while padded.chars().count() < length {
        padded.insert(0, '0');
    }
    padded
}

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// First integer substring of a cell; anything else is 0.
pub fn first_integer(value: &str) -> i64 {
    FIRST_INTEGER
        .find(value)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slicing_is_character_based() {
        assert_eq!(char_slice("Иванов Иван", 0, 6), "Иванов");
        assert_eq!(char_suffix("Иванова", 2), "ва");
        assert_eq!(char_slice("abc", 5, 9), "");
        assert_eq!(char_slice("abcdef", 4, 2), "");
    }

    #[test]
    fn padding_always_reaches_length() {
        assert_eq!(pad_left_zeroes("7", 6), "000007");
        assert_eq!(pad_left_zeroes("1234567", 6), "1234567");
        assert_eq!(pad_left_zeroes("", 4), "0000");
    }

    #[test]
    fn first_integer_extraction() {
        assert_eq!(first_integer("площадка 3"), 3);
        assert_eq!(first_integer("12b34"), 12);
        assert_eq!(first_integer("none"), 0);
    }
}
