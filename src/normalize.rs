//! Cell text normalization.
//!
//! Spreadsheet exports carry invisible noise (BOMs, zero-width spaces, soft
//! hyphens) and occasionally decomposed Hangul. Normalizing before filtering
//! keeps character counts and the deduplication key stable.

use crate::options::NormalizeOptions;
use std::borrow::Cow;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Normalizes one cell value according to `options`.
///
/// Returns the input unchanged (borrowed) when nothing needs rewriting.
pub fn normalize_text<'a>(input: &'a str, options: &NormalizeOptions) -> Cow<'a, str> {
    if !needs_rewrite(input, options) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut push = |c: char| {
        if options.strip_control && is_control_char(c) {
            return;
        }
        if options.ideographic_space && c == '\u{3000}' {
            result.push(' ');
            return;
        }
        result.push(c);
    };

    if options.nfc {
        input.nfc().for_each(&mut push);
    } else {
        input.chars().for_each(&mut push);
    }

    Cow::Owned(result)
}

fn needs_rewrite(input: &str, options: &NormalizeOptions) -> bool {
    if !options.is_enabled() {
        return false;
    }
    if options.nfc && is_nfc_quick(input.chars()) != IsNormalized::Yes {
        return true;
    }
    input.chars().any(|c| {
        (options.strip_control && is_control_char(c))
            || (options.ideographic_space && c == '\u{3000}')
    })
}

/// Characters removed by `strip_control`.
fn is_control_char(c: char) -> bool {
    matches!(
        c,
        '\0'
            | '\x0B'     // Vertical Tab
            | '\x0C'     // Form Feed
            | '\u{00AD}' // Soft hyphen
            | '\u{200B}' // Zero-width space
            | '\u{200C}' // Zero-width non-joiner
            | '\u{200D}' // Zero-width joiner
            | '\u{2060}' // Word joiner
            | '\u{FEFF}' // BOM
            | '\u{FFFD}' // Replacement character
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_borrowed() {
        let out = normalize_text("Let's go 가자", &NormalizeOptions::default());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_nfc_composes_hangul_jamo() {
        // "가" as U+1100 U+1161
        let decomposed = "\u{1100}\u{1161}자";
        assert_eq!(decomposed.chars().count(), 3);

        let out = normalize_text(decomposed, &NormalizeOptions::default());
        assert_eq!(out, "가자");
        assert_eq!(out.chars().count(), 2);
    }

    #[test]
    fn test_control_chars_removed() {
        let input = "\u{FEFF}Hello\u{200B} world\u{00AD}";
        let out = normalize_text(input, &NormalizeOptions::default());
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn test_ideographic_space_mapped() {
        let out = normalize_text("안녕\u{3000}하세요", &NormalizeOptions::default());
        assert_eq!(out, "안녕 하세요");
    }

    #[test]
    fn test_disabled_leaves_text_alone() {
        let input = "\u{FEFF}\u{1100}\u{1161}\u{3000}";
        let options = NormalizeOptions::disabled();
        assert!(!options.is_enabled());
        let out = normalize_text(input, &options);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn test_single_step_enabled() {
        let options = NormalizeOptions {
            ideographic_space: true,
            ..NormalizeOptions::disabled()
        };
        assert!(options.is_enabled());
        let out = normalize_text("\u{1100}\u{1161}\u{3000}", &options);
        assert_eq!(out, "\u{1100}\u{1161} ");
    }
}
