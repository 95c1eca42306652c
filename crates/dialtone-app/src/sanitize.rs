//! Input buffer sanitization.
//!
//! Terminal input can carry escape sequences (pasted colour codes, cursor
//! reports, OSC titles) and invisible code points. Neither may reach the
//! input buffer, since the buffer is echoed back to the terminal and sent to
//! the partner verbatim.

use std::sync::LazyLock;

use regex::Regex;
use unicode_general_category::{GeneralCategory, get_general_category};

/// CSI and OSC style sequences introduced by ESC or the 8-bit CSI.
///
/// Either a BEL-terminated string (OSC) or optional numeric parameters
/// followed by a final byte (CSI, SGR, cursor keys).
const ESCAPE_PATTERN: &str = concat!(
    r"[\x{1B}\x{9B}][\[\]()#;?]*",
    r"(?:(?:(?:[a-zA-Z0-9]*(?:;[a-zA-Z0-9]*)*)?\x{07})",
    r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PRZcf-ntqry=><~]))",
);

static ESCAPE_SEQUENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| match Regex::new(ESCAPE_PATTERN) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("escape sequence pattern failed to compile: {e}");
            None
        },
    });

/// Strip escape sequences, then every non-printable code point.
///
/// Sequence introducers are themselves non-printable, so the result never
/// contains ESC and sanitizing twice is the same as sanitizing once.
pub fn sanitize(input: &str) -> String {
    let stripped = match ESCAPE_SEQUENCE.as_ref() {
        Some(re) => re.replace_all(input, ""),
        None => input.into(),
    };
    stripped.chars().filter(|&c| is_printable(c)).collect()
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space.
///
/// Every other general category is rejected: separators other than U+0020,
/// controls, format characters, surrogates, private use and unassigned code
/// points (which includes the noncharacters).
pub fn is_printable(c: char) -> bool {
    use GeneralCategory as Gc;

    c == ' '
        || matches!(
            get_general_category(c),
            Gc::UppercaseLetter
                | Gc::LowercaseLetter
                | Gc::TitlecaseLetter
                | Gc::ModifierLetter
                | Gc::OtherLetter
                | Gc::NonspacingMark
                | Gc::SpacingMark
                | Gc::EnclosingMark
                | Gc::DecimalNumber
                | Gc::LetterNumber
                | Gc::OtherNumber
                | Gc::ConnectorPunctuation
                | Gc::DashPunctuation
                | Gc::OpenPunctuation
                | Gc::ClosePunctuation
                | Gc::InitialPunctuation
                | Gc::FinalPunctuation
                | Gc::OtherPunctuation
                | Gc::MathSymbol
                | Gc::CurrencySymbol
                | Gc::ModifierSymbol
                | Gc::OtherSymbol
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_pattern_compiles() {
        assert!(ESCAPE_SEQUENCE.is_some());
    }

    #[test]
    fn strips_sgr_sequence() {
        assert_eq!(sanitize("hi\u{1b}[31m!"), "hi!");
        assert_eq!(sanitize("\u{1b}[1;32mgreen\u{1b}[0m"), "green");
    }

    #[test]
    fn strips_eight_bit_csi() {
        assert_eq!(sanitize("a\u{9b}2Jb"), "ab");
    }

    #[test]
    fn strips_bel_terminated_osc() {
        assert_eq!(sanitize("x\u{1b}]0;title\u{7}y"), "xy");
    }

    #[test]
    fn strips_cursor_keys() {
        assert_eq!(sanitize("\u{1b}[A\u{1b}[D"), "");
    }

    #[test]
    fn lone_escape_is_removed() {
        assert_eq!(sanitize("a\u{1b}"), "a");
    }

    #[test]
    fn strips_controls_and_invisible() {
        assert_eq!(sanitize("a\tb\nc\u{0}d\u{200b}e\u{feff}f"), "abcdef");
        assert_eq!(sanitize("a\u{a0}b\u{2028}c"), "abc");
    }

    #[test]
    fn keeps_printable_unicode() {
        let text = "héllo wörld ✓ 日本語 👋 e\u{301}";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn private_use_and_noncharacters() {
        assert!(!is_printable('\u{E000}'));
        assert!(!is_printable('\u{FFFF}'));
        assert!(!is_printable('\u{1FFFE}'));
        assert!(!is_printable('\u{FDD0}'));
        assert!(is_printable('\u{FFFD}'));
    }

    #[test]
    fn unassigned_code_points_removed() {
        assert!(!is_printable('\u{378}'));
        assert!(!is_printable('\u{E0080}'));
        assert_eq!(sanitize("a\u{378}\u{5FF}\u{E0080}b"), "ab");
    }

    #[test]
    fn separators_other_than_space_removed() {
        assert!(is_printable(' '));
        assert!(!is_printable('\u{3000}'));
        assert!(!is_printable('\u{2029}'));
    }

    #[test]
    fn sanitize_is_idempotent_on_samples() {
        let samples =
            ["", "plain", "\u{1b}\u{1b}[[31m", "\u{9b}\u{1b}]x\u{7}", "a\u{1b}[", "\u{1b}[3\u{1b}[1m"];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "sample {sample:?}");
        }
    }
}
