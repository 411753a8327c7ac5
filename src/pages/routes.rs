//! Route-convention matching
//!
//! Maps file paths following the app-router layout (`app/about/page.tsx`)
//! to page routes. Grouping segments in parentheses are organizational and
//! dropped; parameterized segments in brackets have no static address and
//! exclude the file entirely.

use crate::constants::routes::{PAGE_ENTRY_FILES, ROUTE_ROOTS};
use crate::types::HOME_SLUG;

/// A static page route derived from a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoute {
    /// Filename-safe slug, `"home"` for the root route.
    pub slug: String,
    /// Human-readable title derived from the final route segment.
    pub title: String,
}

/// Match a file path against the page-entry convention.
///
/// Returns `None` for non-page files and for parameterized routes, which
/// have no static address to preview.
pub fn match_page_route(path: &str) -> Option<PageRoute> {
    let normalized = path.trim_start_matches("./").replace('\\', "/");

    let relative = ROUTE_ROOTS
        .iter()
        .find_map(|root| normalized.strip_prefix(root))?;

    let (dir, file) = match relative.rfind('/') {
        Some(idx) => (&relative[..idx], &relative[idx + 1..]),
        None => ("", relative),
    };
    if !PAGE_ENTRY_FILES.contains(&file) {
        return None;
    }

    let mut segments = Vec::new();
    for segment in dir.split('/').filter(|s| !s.is_empty()) {
        // Grouping segments organize files without affecting the route
        if segment.starts_with('(') && segment.ends_with(')') {
            continue;
        }
        // Parameterized segments have no static address
        if segment.contains('[') || segment.contains(']') {
            return None;
        }
        segments.push(segment);
    }

    if segments.is_empty() {
        return Some(PageRoute {
            slug: HOME_SLUG.to_string(),
            title: "Home".to_string(),
        });
    }

    let slug = segments
        .iter()
        .map(|s| s.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    let title = title_from_segment(segments[segments.len() - 1]);

    Some(PageRoute { slug, title })
}

/// `"contact-us"` → `"Contact Us"`.
fn title_from_segment(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
