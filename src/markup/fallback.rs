//! Fallback document synthesis
//!
//! When the quality gate rejects a primary extraction, the preview must still
//! show *something*. This pass mines the original source for strings that
//! look like user-facing copy and renders them into a generic styled shell;
//! when nothing usable is found it falls back to a static explanatory
//! placeholder.

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::quality::{MAX_COPY_LITERALS, MIN_COPY_LITERAL_CHARS};
use crate::markup::document::escape_html;

/// Pull user-facing quoted literals out of markup-like source.
///
/// Heuristic by design: it errs toward dropping code-ish strings rather
/// than leaking them into a rendered page.
pub fn extract_copy_literals(source: &str) -> Vec<String> {
    static LITERAL: OnceLock<Regex> = OnceLock::new();
    let literal = LITERAL
        .get_or_init(|| Regex::new(r#""([^"\n]+)"|'([^'\n]+)'|>([^<>{}\n]+)<"#).expect("literal pattern compiles"));

    let mut seen = std::collections::HashSet::new();
    let mut copy = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim_start();
        // Module plumbing never carries copy
        if trimmed.starts_with("import ")
            || (trimmed.starts_with("export ") && trimmed.contains(" from "))
            || trimmed.starts_with("require(")
            || trimmed.starts_with("//")
        {
            continue;
        }

        for caps in literal.captures_iter(line) {
            let text = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().trim())
                .unwrap_or_default();

            if !looks_like_copy(text) {
                continue;
            }
            if seen.insert(text.to_string()) {
                copy.push(text.to_string());
            }
            if copy.len() >= MAX_COPY_LITERALS {
                return copy;
            }
        }
    }

    copy
}

/// Filter out literals that are code, paths, or styling rather than prose.
fn looks_like_copy(text: &str) -> bool {
    if text.len() < MIN_COPY_LITERAL_CHARS {
        return false;
    }
    // Code and markup signatures
    if text.contains(['{', '}', ';', '='])
        || text.contains("=>")
        || text.contains("${")
        || text.contains("()")
    {
        return false;
    }
    // Paths, URLs, and utility-class lists read as single tokens or
    // slash/dash-heavy strings
    if !text.contains(' ') {
        return text.len() >= 12
            && !text.contains(['/', '.', '-', '_', ':'])
            && text.chars().filter(|c| c.is_alphabetic()).count() * 10 >= text.len() * 7;
    }
    if text.starts_with("./") || text.starts_with('/') || text.starts_with("http") {
        return false;
    }
    // Utility-class lists contain spaces too ("flex items-center gap-2")
    let words: Vec<&str> = text.split_whitespace().collect();
    let dashed = words.iter().filter(|w| w.contains('-')).count();
    if dashed * 2 > words.len() {
        return false;
    }

    text.chars().any(|c| c.is_alphabetic())
}

/// Build a fallback body for a page whose primary extraction was rejected.
pub fn synthesize_fallback(source: &str, title: &str, project_name: &str) -> String {
    let copy = extract_copy_literals(source);

    if copy.is_empty() {
        return placeholder_body(title, project_name);
    }

    let mut body = String::new();
    body.push_str("<main class=\"min-h-screen bg-gray-50 text-gray-900\">\n");
    body.push_str("  <section class=\"max-w-3xl mx-auto px-6 py-16\">\n");
    body.push_str(&format!(
        "    <p class=\"text-sm uppercase tracking-wide text-gray-500\">{}</p>\n",
        escape_html(project_name)
    ));
    body.push_str(&format!(
        "    <h1 class=\"text-4xl font-bold mb-8\">{}</h1>\n",
        escape_html(title)
    ));
    for text in &copy {
        body.push_str(&format!(
            "    <p class=\"text-lg leading-relaxed mb-4\">{}</p>\n",
            escape_html(text)
        ));
    }
    body.push_str("  </section>\n</main>");
    body
}

/// Static explanatory document body used when no copy could be salvaged.
fn placeholder_body(title: &str, project_name: &str) -> String {
    format!(
        "<main class=\"min-h-screen flex items-center justify-center bg-gray-50\">\n  <div class=\"text-center px-6\">\n    <h1 class=\"text-3xl font-bold text-gray-900 mb-2\">{}</h1>\n    <p class=\"text-gray-600\">This page of {} could not be rendered as a static preview.</p>\n    <p class=\"text-gray-400 text-sm mt-4\">Run the project to see the live version.</p>\n  </div>\n</main>",
        escape_html(title),
        escape_html(project_name)
    )
}
