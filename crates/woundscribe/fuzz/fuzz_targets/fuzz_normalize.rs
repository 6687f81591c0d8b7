//! Fuzz target for name normalization.
//!
//! Normalization must never panic, the file label it produces must be safe
//! to use as a path component, and a normalized key must normalize to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use woundscribe::normalize;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        let name = normalize(raw);
        assert!(!name.identity_key.is_empty());
        assert!(!name.file_label.is_empty());
        assert!(!name.file_label.contains(['/', '\\', ':', '*', '?', '"', '<', '>', '|']));
        assert!(!name.file_label.chars().any(char::is_whitespace));
        assert_eq!(normalize(&name.identity_key).identity_key, name.identity_key);
    }
});
