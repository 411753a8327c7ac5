//! Static document shell
//!
//! Every extraction result, primary or fallback, is wrapped in the same
//! complete self-contained document: metadata header, the fixed utility
//! stylesheet reference, optional caller-supplied shared styles, body.
//! No scripts beyond the stylesheet loader, no inline event handlers.

use crate::constants::markup::UTILITY_STYLESHEET_URL;

/// Minimal escaping for text interpolated into markup/attribute positions.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a complete static HTML document around `body`.
pub fn render_document(
    title: &str,
    project_name: &str,
    body: &str,
    shared_styles: Option<&str>,
) -> String {
    let full_title = escape_html(&format!("{} — {}", title, project_name));
    let style_block = shared_styles
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("\n  <style>\n{}\n  </style>", s.trim_end()))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>{full_title}</title>\n  <script src=\"{UTILITY_STYLESHEET_URL}\"></script>{style_block}\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
