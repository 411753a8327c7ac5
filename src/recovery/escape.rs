//! Escape repair
//!
//! A single bad escape desynchronizes a JSON parser for the rest of the
//! document: every later quote flips string context the wrong way. This pass
//! resolves invalid escapes in one left-to-right scan so the parser only ever
//! sees a consistent document.
//!
//! Resolution rules:
//! - valid escape: kept as-is
//! - invalid escape of a quote character (`\'`): the quote never needed
//!   escaping, so the backslash is dropped
//! - any other invalid escape: the backslash is doubled, preserving it as a
//!   literal character
//!
//! Each resolved pair is consumed atomically so no byte is re-examined and
//! the quote-parity rule (a quote delimits only after an even number of
//! backslashes) holds by construction.

use crate::constants::recovery::VALID_ESCAPES;

/// Repair invalid escape sequences inside string literals. O(n), no-op on
/// valid input.
pub fn repair_escapes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 8);
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if !in_string {
            if b == b'"' {
                in_string = true;
            }
            out.push(b);
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = false;
                out.push(b);
                i += 1;
            }
            b'\\' => match bytes.get(i + 1) {
                Some(&next) if VALID_ESCAPES.contains(&next) => {
                    out.push(b'\\');
                    out.push(next);
                    i += 2;
                }
                Some(&next) if next == b'\'' || next == b'`' => {
                    // The quote did not need escaping; drop the backslash
                    out.push(next);
                    i += 2;
                }
                Some(_) => {
                    // Preserve the backslash as a literal. The following byte
                    // cannot be '"' or '\\' here (both are valid escapes), so
                    // it is safe to re-process it as ordinary content.
                    out.push(b'\\');
                    out.push(b'\\');
                    i += 1;
                }
                None => {
                    // Trailing backslash from truncation
                    out.push(b'\\');
                    out.push(b'\\');
                    i += 1;
                }
            },
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // The scan only copies or duplicates whole bytes, so the output is valid
    // UTF-8 whenever the input was.
    String::from_utf8(out)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_untouched() {
        let input = r#"{"a": "line\nbreak \"quoted\" \\ done"}"#;
        assert_eq!(repair_escapes(input), input);
    }

    #[test]
    fn test_single_quote_escape_dropped() {
        let input = r#"{"msg": "it\'s fine"}"#;
        assert_eq!(repair_escapes(input), r#"{"msg": "it's fine"}"#);
    }

    #[test]
    fn test_invalid_escape_doubled() {
        let input = r#"{"path": "C:\x"}"#;
        assert_eq!(repair_escapes(input), r#"{"path": "C:\\x"}"#);
    }

    #[test]
    fn test_escaped_backslash_then_quote_keeps_delimiter() {
        // "a\\" - the closing quote follows a complete \\ escape and must
        // still close the string; the following key stays outside
        let input = r#"{"a": "x\\", "b": 1}"#;
        assert_eq!(repair_escapes(input), input);
    }

    #[test]
    fn test_trailing_backslash_doubled() {
        let input = r#"{"a": "cut\"#;
        assert_eq!(repair_escapes(input), r#"{"a": "cut\\"#);
    }

    #[test]
    fn test_backslashes_outside_strings_untouched() {
        // Not valid JSON, but the pass must only act inside strings
        let input = r"\x {}";
        assert_eq!(repair_escapes(input), input);
    }

    #[test]
    fn test_one_bad_escape_does_not_desync_rest() {
        let input = r#"{"a": "bad\q escape", "b": "ok"}"#;
        let repaired = repair_escapes(input);
        assert_eq!(repaired, r#"{"a": "bad\\q escape", "b": "ok"}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }
}
