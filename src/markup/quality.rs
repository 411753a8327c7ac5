//! Extraction quality gate
//!
//! Decides whether a rewritten body is worth showing. Rewrites are lossy,
//! and a body that is mostly placeholders, raw data fragments, or leftover
//! code is worse than an honest fallback page.

use tracing::debug;

use crate::constants::markup::DYNAMIC_PLACEHOLDER;
use crate::constants::quality::{
    MAX_KEY_VALUE_FRAGMENTS, MAX_PLACEHOLDER_RATIO, MIN_BODY_CHARS,
};

/// Thresholds for accepting a rewritten body.
#[derive(Debug, Clone)]
pub struct QualityGate {
    /// Minimum visible (tag-stripped) text length.
    pub min_body_chars: usize,
    /// Maximum `"key":` fragments before the body reads as leaked JSON.
    pub max_key_value_fragments: usize,
    /// Maximum share of visible text made up of placeholder comments.
    pub max_placeholder_ratio: f64,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            min_body_chars: MIN_BODY_CHARS,
            max_key_value_fragments: MAX_KEY_VALUE_FRAGMENTS,
            max_placeholder_ratio: MAX_PLACEHOLDER_RATIO,
        }
    }
}

impl QualityGate {
    /// Check a rewritten body; `false` routes the page to the fallback
    /// synthesizer.
    pub fn accept(&self, body: &str) -> bool {
        let placeholders = body.matches(DYNAMIC_PLACEHOLDER).count();
        let visible = visible_text(body);

        if visible.len() < self.min_body_chars {
            debug!(chars = visible.len(), "body rejected: too little visible text");
            return false;
        }

        if key_value_fragments(&visible) > self.max_key_value_fragments {
            debug!("body rejected: leaked key/value data");
            return false;
        }

        if placeholders > 0 {
            let placeholder_chars = placeholders * DYNAMIC_PLACEHOLDER.len();
            let total = visible.len() + placeholder_chars;
            if placeholder_chars as f64 > self.max_placeholder_ratio * total as f64 {
                debug!(placeholders, "body rejected: mostly dynamic placeholders");
                return false;
            }
        }

        if has_code_residue(&visible) {
            debug!("body rejected: code residue in visible text");
            return false;
        }

        true
    }
}

/// Text a browser would actually show: tags and comments stripped.
fn visible_text(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' {
            match body[i..].find('>') {
                Some(close) => i += close + 1,
                None => break,
            }
        } else {
            let ch_len = body[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            out.push_str(&body[i..i + ch_len]);
            i += ch_len;
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count `"key":` shapes in visible text, the signature of JSON that leaked
/// through the rewrites.
fn key_value_fragments(text: &str) -> usize {
    let mut count = 0;
    let mut rest = text;
    while let Some(open) = rest.find('"') {
        let after = &rest[open + 1..];
        if let Some(close) = after.find('"') {
            let following = after[close + 1..].trim_start();
            if following.starts_with(':') {
                count += 1;
            }
            rest = &after[close + 1..];
        } else {
            break;
        }
    }
    count
}

/// Spot script-like tokens that should never appear in rendered prose.
fn has_code_residue(text: &str) -> bool {
    text.contains("=>")
        || text.contains("${")
        || text.contains("function(")
        || text.contains("function (")
        || text.contains('{')
        || text.contains('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BODY: &str = "<main><h1>Welcome aboard</h1>\
        <p>We build delightful tools for busy teams everywhere.</p>\
        <p>Get started in minutes with our guided setup.</p></main>";

    #[test]
    fn test_accepts_substantial_body() {
        assert!(QualityGate::default().accept(GOOD_BODY));
    }

    #[test]
    fn test_rejects_short_body() {
        assert!(!QualityGate::default().accept("<div><p>Hi</p></div>"));
        assert!(!QualityGate::default().accept(""));
    }

    #[test]
    fn test_rejects_leaked_json() {
        let body = r#"<pre>"name": "demo", "version": "1.0", "private": true</pre>
            <p>Some surrounding text to pass the length check easily.</p>"#;
        assert!(!QualityGate::default().accept(body));
    }

    #[test]
    fn test_rejects_placeholder_heavy_body() {
        let body = format!(
            "<div>{p}{p}{p}<p>tiny</p>{p}</div>",
            p = DYNAMIC_PLACEHOLDER
        );
        assert!(!QualityGate::default().accept(&body));
    }

    #[test]
    fn test_accepts_occasional_placeholder() {
        let body = format!(
            "<main><h1>Product tour</h1>\
             <p>Everything your team needs to ship faster, in one place.</p>\
             {DYNAMIC_PLACEHOLDER}\
             <p>Trusted by thousands of developers around the world.</p></main>"
        );
        assert!(QualityGate::default().accept(&body));
    }

    #[test]
    fn test_rejects_code_residue() {
        let body = "<p>items.map(item => item.name) and some more text to \
                    pass the minimum length check here</p>";
        assert!(!QualityGate::default().accept(body));
    }

    #[test]
    fn test_visible_text_strips_tags() {
        assert_eq!(
            visible_text("<div><h1>Hello</h1> <p>world</p></div>"),
            "Hello world"
        );
    }

    #[test]
    fn test_key_value_fragment_count() {
        assert_eq!(key_value_fragments(r#""a": 1, "b": 2"#), 2);
        assert_eq!(key_value_fragments(r#"say "hello" to "the" world"#), 0);
    }
}
