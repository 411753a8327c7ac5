//! String-Context-Aware Scanning
//!
//! The low-level primitive shared by the recovery parser, the markup
//! extractor, and the page assembler: a byte cursor that always knows whether
//! it is inside a string literal, plus depth-tracked balanced-span extraction
//! built on top of it.
//!
//! Implemented once so escape handling behaves identically everywhere and can
//! be unit-tested in isolation. Every scan is O(n) with the cursor strictly
//! advancing; malformed nesting yields `None` instead of panicking or
//! spinning.

/// Quote set for JSON documents (double quotes only)
pub const JSON_QUOTES: &[u8] = b"\"";

/// Quote set for JSX/TS source (double, single, and template literals)
pub const JSX_QUOTES: &[u8] = b"\"'`";

// =============================================================================
// StringTracker
// =============================================================================

/// Per-byte string-context state machine.
///
/// A quote toggles the delimiter state only when preceded by an even number
/// of backslashes; escape pairs are consumed atomically.
#[derive(Debug, Clone)]
pub struct StringTracker {
    quotes: &'static [u8],
    in_string: Option<u8>,
    escaped: bool,
}

impl StringTracker {
    pub fn new(quotes: &'static [u8]) -> Self {
        Self {
            quotes,
            in_string: None,
            escaped: false,
        }
    }

    /// Whether the cursor is currently inside a string literal
    pub fn in_string(&self) -> bool {
        self.in_string.is_some()
    }

    /// Feed one byte; returns true if that byte belongs to string content
    /// or a closing delimiter (i.e. the cursor was inside a string when the
    /// byte was reached). Opening delimiters return false.
    pub fn advance(&mut self, b: u8) -> bool {
        match self.in_string {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == quote {
                    self.in_string = None;
                }
                true
            }
            None => {
                if self.quotes.contains(&b) {
                    self.in_string = Some(b);
                }
                false
            }
        }
    }
}

/// Byte-indexed in-string map for `s`.
///
/// `mask[i]` is true when byte `i` is string content or a closing quote.
/// Used to gate pattern-based repairs so they never fire inside retained
/// string data.
pub fn string_mask(s: &str, quotes: &'static [u8]) -> Vec<bool> {
    let mut tracker = StringTracker::new(quotes);
    s.bytes().map(|b| tracker.advance(b)).collect()
}

// =============================================================================
// Balanced Spans
// =============================================================================

/// Find the end (exclusive) of the balanced `open`..`close` group starting at
/// `start`. String contents never perturb depth; when `open` is not a brace,
/// brace-delimited embedded expressions are skipped as opaque spans.
///
/// Returns `None` when `s[start]` is not `open` or the group never closes.
pub fn balanced_span(
    s: &str,
    start: usize,
    open: u8,
    close: u8,
    quotes: &'static [u8],
) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start) != Some(&open) {
        return None;
    }

    let mut tracker = StringTracker::new(quotes);
    let mut depth = 0usize;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];

        if tracker.advance(b) {
            i += 1;
            continue;
        }

        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i + 1);
            }
        } else if b == b'{' && open != b'{' {
            // Embedded expression: skip without scanning into it. The span is
            // self-contained, so the tracker resumes in a clean state after it.
            i = balanced_span(s, i, b'{', b'}', quotes)?;
            tracker = StringTracker::new(quotes);
            continue;
        }

        i += 1;
    }

    None
}

/// Find the end (exclusive) of a balanced markup element starting at the `<`
/// at `start`. Tracks tag depth across open/close/self-closing tags and
/// fragments; quoted attribute values and brace expressions are opaque.
pub fn balanced_tag_span(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start) != Some(&b'<') {
        return None;
    }

    let mut depth = 0isize;
    let mut i = start;
    let mut saw_tag = false;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                let next = bytes.get(i + 1).copied();
                match next {
                    Some(b'>') => {
                        // Fragment open
                        depth += 1;
                        saw_tag = true;
                        i += 2;
                    }
                    Some(b'/') => {
                        // Closing tag or fragment close
                        let end = scan_tag_end(s, i)?;
                        depth -= 1;
                        saw_tag = true;
                        i = end;
                        if depth <= 0 {
                            return Some(i);
                        }
                    }
                    Some(c) if c.is_ascii_alphabetic() => {
                        let end = scan_tag_end(s, i)?;
                        // A trailing "/>" leaves depth unchanged
                        if !s[i..end].trim_end_matches('>').trim_end().ends_with('/') {
                            depth += 1;
                        }
                        saw_tag = true;
                        i = end;
                    }
                    Some(b'!') => {
                        // Comment or doctype: skip to the closing angle
                        i = bytes[i..].iter().position(|&b| b == b'>').map(|p| i + p + 1)?;
                    }
                    _ => i += 1,
                }
            }
            b'{' => {
                i = balanced_span(s, i, b'{', b'}', JSX_QUOTES)?;
            }
            _ => i += 1,
        }

        if saw_tag && depth == 0 {
            return Some(i);
        }
    }

    None
}

/// Scan from the `<` at `start` to just past the tag's terminating `>`.
/// Attribute strings and expression values do not end the tag.
fn scan_tag_end(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut tracker = StringTracker::new(JSX_QUOTES);
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];

        if tracker.advance(b) {
            i += 1;
            continue;
        }

        match b {
            b'>' => return Some(i + 1),
            b'{' => {
                i = balanced_span(s, i, b'{', b'}', JSX_QUOTES)?;
                tracker = StringTracker::new(JSX_QUOTES);
            }
            _ => i += 1,
        }
    }

    None
}

/// First non-whitespace byte at or after `start`
pub fn next_non_ws(s: &str, start: usize) -> Option<(usize, u8)> {
    s.as_bytes()
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, b)| !b.is_ascii_whitespace())
        .map(|(i, b)| (i, *b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_toggles_on_quotes() {
        let mask = string_mask(r#"a "bc" d"#, JSON_QUOTES);
        assert_eq!(
            mask,
            vec![false, false, false, true, true, true, false, false]
        );
    }

    #[test]
    fn test_tracker_escaped_quote_stays_inside() {
        // "a\"b" - the escaped quote does not close the string
        let mask = string_mask(r#""a\"b""#, JSON_QUOTES);
        assert!(mask[3], "escaped quote is string content");
        assert!(mask[4], "byte after escaped quote still inside");
        assert!(mask[5], "closing quote flagged as inside");
    }

    #[test]
    fn test_tracker_double_backslash_then_quote_closes() {
        // "a\\" - the quote follows an even number of backslashes and closes
        let s = "\"a\\\\\" x";
        let mask = string_mask(s, JSON_QUOTES);
        assert!(!mask[6], "x is outside the string");
    }

    #[test]
    fn test_balanced_span_simple() {
        let s = "(a (b) c) tail";
        assert_eq!(balanced_span(s, 0, b'(', b')', JSX_QUOTES), Some(9));
    }

    #[test]
    fn test_balanced_span_ignores_closers_in_strings() {
        let s = r#"(a ")" b)"#;
        assert_eq!(balanced_span(s, 0, b'(', b')', JSX_QUOTES), Some(s.len()));
    }

    #[test]
    fn test_balanced_span_skips_brace_expressions() {
        // The ')' inside the arrow body must not close the outer group
        let s = "(items.map(i => {return (i)}))";
        assert_eq!(balanced_span(s, 0, b'(', b')', JSX_QUOTES), Some(s.len()));
    }

    #[test]
    fn test_balanced_span_unclosed_returns_none() {
        assert_eq!(balanced_span("(a (b)", 0, b'(', b')', JSX_QUOTES), None);
        assert_eq!(balanced_span("x", 0, b'(', b')', JSX_QUOTES), None);
    }

    #[test]
    fn test_tag_span_nested() {
        let s = "<div><h1>Hi</h1></div> rest";
        assert_eq!(balanced_tag_span(s, 0), Some(22));
    }

    #[test]
    fn test_tag_span_self_closing_root() {
        let s = "<br/> tail";
        assert_eq!(balanced_tag_span(s, 0), Some(5));
    }

    #[test]
    fn test_tag_span_fragment() {
        let s = "<><p>a</p></> rest";
        assert_eq!(balanced_tag_span(s, 0), Some(13));
    }

    #[test]
    fn test_tag_span_attribute_angle_opaque() {
        // '>' inside an attribute string must not terminate the tag early
        let s = r#"<div title="a > b">x</div>"#;
        assert_eq!(balanced_tag_span(s, 0), Some(s.len()));
    }

    #[test]
    fn test_tag_span_brace_expression_opaque() {
        let s = "<ul>{items.map(i => <li key={i}>{i}</li>)}</ul>";
        assert_eq!(balanced_tag_span(s, 0), Some(s.len()));
    }

    #[test]
    fn test_tag_span_unclosed_returns_none() {
        assert_eq!(balanced_tag_span("<div><p>", 0), None);
    }

    #[test]
    fn test_next_non_ws() {
        assert_eq!(next_non_ws("  \n,x", 0), Some((3, b',')));
        assert_eq!(next_non_ws("   ", 0), None);
    }
}
