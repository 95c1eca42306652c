//! Fuzz target for input sanitization
//!
//! Ensure arbitrary text can never smuggle terminal control into the input
//!
//! # Invariants
//!
//! - Output contains no ESC (0x1B) or 8-bit CSI (0x9B)
//! - Every output character is printable
//! - Sanitizing twice equals sanitizing once
//! - Output is never longer than the input

#![no_main]

use dialtone_app::sanitize::{is_printable, sanitize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    let clean = sanitize(&text);

    assert!(!clean.contains(['\u{1b}', '\u{9b}']), "escape introducer survived: {clean:?}");
    assert!(clean.chars().all(is_printable), "non-printable survived: {clean:?}");
    assert_eq!(sanitize(&clean), clean, "sanitize not idempotent for {text:?}");
    assert!(clean.len() <= text.len());
});
