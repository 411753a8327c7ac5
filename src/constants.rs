//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.
//! Quality thresholds are tunable policy, not correctness-critical logic.

/// Recovery parser constants
pub mod recovery {
    /// Size of the context window included in `Malformed` errors
    pub const ERROR_CONTEXT_CHARS: usize = 200;

    /// Project name substituted when the model omitted one
    pub const DEFAULT_NAME: &str = "recovered-project";

    /// Escape characters JSON considers valid after a backslash
    pub const VALID_ESCAPES: &[u8] = b"\"\\/bfnrtu";
}

/// Markup extraction constants
pub mod markup {
    /// Placeholder comment substituted for unrenderable dynamic expressions
    pub const DYNAMIC_PLACEHOLDER: &str = "<!-- dynamic content -->";

    /// Elements HTML allows to stay self-closed
    pub const VOID_ELEMENTS: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];

    /// Fixed utility stylesheet referenced by every generated document
    pub const UTILITY_STYLESHEET_URL: &str = "https://cdn.tailwindcss.com";

    /// Maximum `return` keywords inspected while locating the renderable expression
    pub const MAX_RETURN_CANDIDATES: usize = 16;
}

/// Quality gate thresholds (tuned empirically)
pub mod quality {
    /// Minimum meaningful body length for an extracted page
    pub const MIN_BODY_CHARS: usize = 50;

    /// Residual `"key":` fragments tolerated before the body is judged corrupted
    pub const MAX_KEY_VALUE_FRAGMENTS: usize = 2;

    /// Fraction of the body allowed to be placeholder comments
    pub const MAX_PLACEHOLDER_RATIO: f64 = 0.5;

    /// Minimum length for a quoted literal to count as user-facing copy
    pub const MIN_COPY_LITERAL_CHARS: usize = 3;

    /// Cap on copy literals rendered into a fallback document
    pub const MAX_COPY_LITERALS: usize = 12;
}

/// Directory-routing convention constants
pub mod routes {
    /// Accepted route roots, checked in order
    pub const ROUTE_ROOTS: &[&str] = &["app/", "src/app/"];

    /// Entry filenames that mark a navigable page
    pub const PAGE_ENTRY_FILES: &[&str] = &["page.tsx", "page.jsx", "page.js"];

    /// Shared stylesheet filename looked up under the route root
    pub const SHARED_STYLESHEET: &str = "globals.css";
}
