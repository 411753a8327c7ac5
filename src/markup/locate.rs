//! Renderable-expression location
//!
//! Finds the span of markup a page component returns. The entry-point choice
//! is a best-effort guess: prefer the function following the last explicit
//! default-export marker, otherwise the last component-looking candidate in
//! the file. Preserved as a fallback order, not a guarantee.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::constants::markup::MAX_RETURN_CANDIDATES;
use crate::scan::{balanced_tag_span, next_non_ws};

/// Extract the markup expression returned by the page's entry point.
/// Returns `None` when no renderable `return` can be found.
pub fn locate_renderable(source: &str) -> Option<&str> {
    let start = entry_point_offset(source);
    let mut cursor = start;

    // A component may have early returns (`return null;`); keep trying
    // later `return` keywords until one yields markup.
    for _ in 0..MAX_RETURN_CANDIDATES {
        let ret = find_return(source, cursor)?;
        cursor = ret + "return".len();

        let (expr_start, first) = next_non_ws(source, cursor)?;
        match first {
            // Parenthesized markup: scan from the tag itself, not the paren.
            // Tag-depth tracking knows that apostrophes in text position
            // ("It's") are prose, which a quote-tracking paren scan does not.
            b'(' => {
                if let Some((tag_start, b'<')) = next_non_ws(source, expr_start + 1)
                    && let Some(end) = balanced_tag_span(source, tag_start)
                {
                    return Some(source[tag_start..end].trim());
                }
            }
            b'<' => {
                if let Some(end) = balanced_tag_span(source, expr_start) {
                    return Some(source[expr_start..end].trim());
                }
            }
            _ => {}
        }
    }

    debug!("no renderable return expression located");
    None
}

/// Offset at which to start searching for the returned expression.
fn entry_point_offset(source: &str) -> usize {
    if let Some(idx) = source.rfind("export default") {
        return idx;
    }

    static CANDIDATE: OnceLock<Regex> = OnceLock::new();
    let candidate = CANDIDATE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?(?:async\s+)?function\s+[A-Z]\w*|const\s+[A-Z]\w*\s*=")
            .expect("candidate pattern compiles")
    });

    candidate
        .find_iter(source)
        .last()
        .map(|m| m.start())
        .unwrap_or(0)
}

/// Next `return` keyword (word-bounded) at or after `from`.
fn find_return(source: &str, from: usize) -> Option<usize> {
    static RETURN: OnceLock<Regex> = OnceLock::new();
    let re = RETURN.get_or_init(|| Regex::new(r"\breturn\b").expect("return pattern compiles"));
    re.find(source.get(from..)?).map(|m| from + m.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized_return() {
        let source = r#"export default function Page() {
  return (
    <div className="a"><h1>Hi</h1></div>
  );
}"#;
        let markup = locate_renderable(source).expect("located");
        assert_eq!(markup, r#"<div className="a"><h1>Hi</h1></div>"#);
    }

    #[test]
    fn test_bare_tag_return() {
        let source = "function Page() { return <p>solo</p>; }";
        assert_eq!(locate_renderable(source), Some("<p>solo</p>"));
    }

    #[test]
    fn test_prefers_default_export() {
        let source = r#"
function Helper() { return (<span>helper</span>); }

export default function Page() {
  return (<main>page</main>);
}
"#;
        assert_eq!(locate_renderable(source), Some("<main>page</main>"));
    }

    #[test]
    fn test_last_candidate_without_default_export() {
        let source = r#"
function First() { return (<span>first</span>); }
function Second() { return (<span>second</span>); }
"#;
        assert_eq!(locate_renderable(source), Some("<span>second</span>"));
    }

    #[test]
    fn test_skips_early_non_markup_return() {
        let source = r#"export default function Page() {
  if (!data) return null;
  return (<section>ready</section>);
}"#;
        assert_eq!(locate_renderable(source), Some("<section>ready</section>"));
    }

    #[test]
    fn test_no_return_yields_none() {
        assert_eq!(locate_renderable("const x = 1;"), None);
        assert_eq!(locate_renderable(""), None);
    }

    #[test]
    fn test_apostrophes_in_text_are_prose() {
        let source = r#"export default function Page() {
  return (
    <main className="hero">
      <h1>It's a wonderful product</h1>
      <p>We're glad you're here.</p>
    </main>
  );
}"#;
        let markup = locate_renderable(source).expect("contractions are plain text");
        assert!(markup.starts_with("<main"));
        assert!(markup.contains("It's a wonderful product"));
        assert!(markup.ends_with("</main>"));
    }

    #[test]
    fn test_parens_in_strings_do_not_break_span() {
        let source = r#"export default function Page() {
  return (<p title="a ) b">text</p>);
}"#;
        assert_eq!(
            locate_renderable(source),
            Some(r#"<p title="a ) b">text</p>"#)
        );
    }
}
