//! Targeted malformation repairs
//!
//! Small, specific rewrites applied before the final parse. Each one is
//! idempotent and a no-op on valid input. All of them run through the shared
//! string-context scanner: file contents routinely contain text like `", }"`
//! that a blind substitution would corrupt.

use std::sync::OnceLock;

use regex::Regex;

use crate::scan::{JSON_QUOTES, StringTracker, next_non_ws, string_mask};

/// Remove trailing commas before a closing bracket/brace.
pub fn fix_trailing_commas(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut tracker = StringTracker::new(JSON_QUOTES);
    let mut out = Vec::with_capacity(bytes.len());

    for (i, &b) in bytes.iter().enumerate() {
        let in_string = tracker.advance(b);

        if !in_string
            && b == b','
            && matches!(next_non_ws(s, i + 1), Some((_, b']')) | Some((_, b'}')))
        {
            continue;
        }
        out.push(b);
    }

    String::from_utf8(out)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Insert a comma between a closer and a following opener or key.
///
/// Valid JSON never places `{`, `[`, or `"` directly after `}`/`]`, so this
/// cannot fire on well-formed input.
pub fn fix_missing_commas(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut tracker = StringTracker::new(JSON_QUOTES);
    let mut out = Vec::with_capacity(bytes.len() + 4);

    for (i, &b) in bytes.iter().enumerate() {
        let in_string = tracker.advance(b);
        out.push(b);

        if !in_string
            && (b == b'}' || b == b']')
            && matches!(
                next_non_ws(s, i + 1),
                Some((_, b'{')) | Some((_, b'[')) | Some((_, b'"'))
            )
        {
            out.push(b',');
        }
    }

    String::from_utf8(out)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Collapse the double-colon pattern `"outer": "inner": "value"` produced
/// when a dependency value was itself emitted as a nested key-value pair.
/// Keeps the inner pair, drops the outer key.
pub fn fix_double_colon(s: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r#""([^"\n]*)"\s*:\s*"([^"\n]*)"\s*:\s*"([^"\n]*)""#)
            .expect("double-colon pattern compiles")
    });

    let mask = string_mask(s, JSON_QUOTES);
    let mut out = String::with_capacity(s.len());
    let mut cursor = 0;

    for caps in re.captures_iter(s) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() < cursor {
            continue;
        }
        // Matches whose opening quote sits inside retained string content
        // are data, not structure.
        if mask.get(m.start()).copied().unwrap_or(true) {
            continue;
        }
        out.push_str(&s[cursor..m.start()]);
        out.push_str(&format!("\"{}\": \"{}\"", &caps[2], &caps[3]));
        cursor = m.end();
    }
    out.push_str(&s[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_comma_removed() {
        assert_eq!(
            fix_trailing_commas(r#"{"files": [{"path": "a"},]}"#),
            r#"{"files": [{"path": "a"}]}"#
        );
    }

    #[test]
    fn test_trailing_comma_inside_string_kept() {
        let input = r#"{"content": "return [1, ]"}"#;
        assert_eq!(fix_trailing_commas(input), input);
    }

    #[test]
    fn test_missing_comma_between_records() {
        let repaired = fix_missing_commas(r#"{"files": [{"path": "a"} {"path": "b"}]}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_missing_comma_before_key() {
        let repaired = fix_missing_commas(r#"{"a": {} "b": 1}"#);
        assert_eq!(repaired, r#"{"a": {}, "b": 1}"#);
    }

    #[test]
    fn test_missing_comma_noop_on_valid() {
        let input = r#"{"a": {"x": "} ["}, "b": [1, 2]}"#;
        assert_eq!(fix_missing_commas(input), input);
    }

    #[test]
    fn test_double_colon_keeps_inner_pair() {
        let repaired = fix_double_colon(r#"{"dependencies": {"react": "react": "^18.2.0"}}"#);
        assert_eq!(
            repaired,
            r#"{"dependencies": {"react": "^18.2.0"}}"#
        );
    }

    #[test]
    fn test_double_colon_noop_on_valid() {
        let input = r#"{"dependencies": {"react": "^18.2.0", "next": "14.0.0"}}"#;
        assert_eq!(fix_double_colon(input), input);
    }

    #[test]
    fn test_double_colon_inside_content_kept() {
        let input = r#"{"content": "\"a\": \"b\": \"c\""}"#;
        assert_eq!(fix_double_colon(input), input);
    }
}
