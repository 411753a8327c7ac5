//! Markup-to-static-HTML rewrites
//!
//! A fixed, ordered battery of textual rewrites that turns a located JSX
//! expression into static HTML. The contract is safety, not fidelity:
//! partial JS expressions must never surface as visible text or executable
//! script, and no interactive attribute survives.
//!
//! Pass order matters: attribute expressions (including event handlers) are
//! resolved before text-position expressions so a stripped handler never
//! leaves a dangling `onClick=`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::constants::markup::{DYNAMIC_PLACEHOLDER, VOID_ELEMENTS};
use crate::scan::{JSX_QUOTES, balanced_span};

/// Apply the full rewrite battery.
pub fn rewrite_markup(markup: &str) -> String {
    let s = alias_attributes(markup);
    let s = rewrite_attribute_expressions(&s);
    let s = alias_components(&s);
    let s = rewrite_text_expressions(&s);
    let s = strip_fragments(&s);
    expand_self_closing(&s)
}

// =============================================================================
// Attribute Passes
// =============================================================================

/// Component-style attribute names → standard HTML names.
fn alias_attributes(s: &str) -> String {
    static CLASS: OnceLock<Regex> = OnceLock::new();
    static FOR: OnceLock<Regex> = OnceLock::new();

    let class = CLASS.get_or_init(|| Regex::new(r"\bclassName(\s*=)").expect("className pattern"));
    let html_for = FOR.get_or_init(|| Regex::new(r"\bhtmlFor(\s*=)").expect("htmlFor pattern"));

    let s = class.replace_all(s, "class$1");
    html_for.replace_all(&s, "for$1").into_owned()
}

/// Attributes that only mean something to an executing framework.
fn is_framework_only(name: &str) -> bool {
    matches!(
        name,
        "ref" | "key" | "dangerouslySetInnerHTML" | "suppressHydrationWarning"
            | "suppressContentEditableWarning"
    )
}

/// Interactive event handlers (`onClick`, `onSubmit`, ...).
fn is_event_handler(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("on")
        && name.as_bytes()[2].is_ascii_uppercase()
}

/// Resolve every `name={expr}` attribute:
/// - event handlers and framework-only attributes are removed entirely
/// - a plain string/template literal becomes a quoted HTML attribute
/// - anything else is removed (never leaked)
fn rewrite_attribute_expressions(s: &str) -> String {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    let attr = ATTR.get_or_init(|| {
        Regex::new(r"\s*([A-Za-z_][\w-]*)\s*=\s*\{").expect("attribute expression pattern")
    });

    let mut out = String::with_capacity(s.len());
    let mut cursor = 0;

    for caps in attr.captures_iter(s) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() < cursor {
            continue;
        }
        let brace = m.end() - 1;
        let Some(end) = balanced_span(s, brace, b'{', b'}', JSX_QUOTES) else {
            continue;
        };

        let name = caps.get(1).map(|g| g.as_str()).unwrap_or_default();
        let interior = s[brace + 1..end - 1].trim();

        out.push_str(&s[cursor..m.start()]);

        if !is_event_handler(name) && !is_framework_only(name)
            && let Some(value) = plain_literal(interior)
        {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
        // Otherwise: drop the attribute, whitespace included.

        cursor = end;
    }
    out.push_str(&s[cursor..]);

    strip_string_handlers(&out)
}

/// Remove string-valued handlers (`onClick="..."`) the expression pass
/// cannot see.
fn strip_string_handlers(s: &str) -> String {
    static HANDLER: OnceLock<Regex> = OnceLock::new();
    let handler = HANDLER.get_or_init(|| {
        Regex::new(r#"\s+on[A-Z]\w*\s*=\s*("[^"]*"|'[^']*')"#).expect("string handler pattern")
    });
    handler.replace_all(s, "").into_owned()
}

/// Extract the value of a plain string or interpolation-free template
/// literal; `None` for anything with runtime behavior.
fn plain_literal(expr: &str) -> Option<String> {
    let bytes = expr.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let quote = bytes[0];
    if !JSX_QUOTES.contains(&quote) || bytes[bytes.len() - 1] != quote {
        return None;
    }

    let inner = &expr[1..expr.len() - 1];
    // An unescaped delimiter inside means this is not a single literal
    let mut escaped = false;
    for &b in inner.as_bytes() {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == quote {
            return None;
        }
    }
    if quote == b'`' && inner.contains("${") {
        return None;
    }

    Some(inner.replace("\\'", "'").replace("\\\"", "\""))
}

// =============================================================================
// Text-Position Expressions
// =============================================================================

/// Resolve brace expressions in text position:
/// - plain literal → its value
/// - contains nested markup (conditional render branch) → placeholder comment
/// - anything else → dropped silently
fn rewrite_text_expressions(s: &str) -> String {
    static NESTED_TAG: OnceLock<Regex> = OnceLock::new();
    let nested_tag =
        NESTED_TAG.get_or_init(|| Regex::new(r"<[A-Za-z]").expect("nested tag pattern"));

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            // Copy whole UTF-8 sequences, not bytes
            let ch_len = s[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            out.push_str(&s[i..i + ch_len]);
            i += ch_len;
            continue;
        }

        let Some(end) = balanced_span(s, i, b'{', b'}', JSX_QUOTES) else {
            // Unmatched brace from malformed input: drop it rather than leak
            i += 1;
            continue;
        };

        let interior = s[i + 1..end - 1].trim();
        if let Some(value) = plain_literal(interior) {
            out.push_str(&value);
        } else if nested_tag.is_match(interior) {
            out.push_str(DYNAMIC_PLACEHOLDER);
        }
        // Otherwise dropped.

        i = end;
    }

    out
}

// =============================================================================
// Tag Passes
// =============================================================================

/// Remove fragment wrappers.
fn strip_fragments(s: &str) -> String {
    static FRAGMENT: OnceLock<Regex> = OnceLock::new();
    let fragment = FRAGMENT.get_or_init(|| {
        Regex::new(r"</?(?:React\.)?Fragment\s*>|<>\s*|</>").expect("fragment pattern")
    });
    fragment.replace_all(s, "").into_owned()
}

/// Known helper components → native tags.
fn alias_components(s: &str) -> String {
    static OPEN_LINK: OnceLock<Regex> = OnceLock::new();
    static CLOSE_LINK: OnceLock<Regex> = OnceLock::new();
    static OPEN_IMAGE: OnceLock<Regex> = OnceLock::new();
    static CLOSE_IMAGE: OnceLock<Regex> = OnceLock::new();

    let open_link =
        OPEN_LINK.get_or_init(|| Regex::new(r"<Link(?P<rest>[\s>/])").expect("Link pattern"));
    let close_link = CLOSE_LINK.get_or_init(|| Regex::new(r"</Link\s*>").expect("close Link"));
    let open_image =
        OPEN_IMAGE.get_or_init(|| Regex::new(r"<Image(?P<rest>[\s>/])").expect("Image pattern"));
    let close_image = CLOSE_IMAGE.get_or_init(|| Regex::new(r"</Image\s*>").expect("close Image"));

    let s = open_link.replace_all(s, "<a$rest");
    let s = close_link.replace_all(&s, "</a>");
    let s = open_image.replace_all(&s, "<img$rest");
    close_image.replace_all(&s, "").into_owned()
}

/// Expand self-closed non-void elements; HTML only allows the void set to
/// stay self-closed.
fn expand_self_closing(s: &str) -> String {
    static SELF_CLOSED: OnceLock<Regex> = OnceLock::new();
    let self_closed = SELF_CLOSED.get_or_init(|| {
        Regex::new(r#"<([A-Za-z][\w.-]*)((?:"[^"]*"|'[^']*'|[^>"'])*?)\s*/>"#)
            .expect("self-closing pattern")
    });

    self_closed
        .replace_all(s, |caps: &Captures<'_>| {
            let name = &caps[1];
            let attrs = &caps[2];
            if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
                format!("<{name}{attrs}>")
            } else {
                format!("<{name}{attrs}></{name}>")
            }
        })
        .into_owned()
}
