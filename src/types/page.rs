//! Preview page model

use serde::{Deserialize, Serialize};

/// Reserved slug for the root route
pub const HOME_SLUG: &str = "home";

/// One statically previewable route.
///
/// Produced by the page assembler; `html_document` is a complete
/// self-contained document safe to serve in a sandboxed viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Lowercase hyphenated route slug; `"home"` is reserved for the root
    pub slug: String,
    /// Human-readable title derived from the route segment
    pub title: String,
    /// Complete static HTML document
    pub html_document: String,
    pub is_homepage: bool,
    /// 0-based position after sorting (homepage first, then by title)
    pub order: usize,
}
