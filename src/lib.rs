//! pageloom - Static Preview Extraction for AI-Generated Web Projects
//!
//! Recovers a structured project from raw (often truncated or malformed)
//! model output and extracts render-safe static HTML previews of its pages,
//! without executing any generated code.
//!
//! ## Core Features
//!
//! - **Resilient Recovery**: repairs code fences, invalid escapes, truncation,
//!   and common comma/colon malformations before parsing
//! - **Static Extraction**: rewrites component markup to plain HTML with all
//!   event handlers and dynamic expressions stripped
//! - **Quality Gate**: rejects thin or code-leaking extractions in favor of
//!   copy-based fallback documents
//! - **Page Assembly**: maps route-convention files to an ordered page set
//!
//! ## Quick Start
//!
//! ```ignore
//! let project = pageloom::recover(&raw_model_output)?;
//! let pages = pageloom::assemble_pages(&project);
//! for page in &pages {
//!     std::fs::write(format!("{}.html", page.slug), &page.html_document)?;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`recovery`]: envelope stripping, escape/truncation repair, parsing
//! - [`markup`]: locate, rewrite, gate, and render static documents
//! - [`pages`]: route matching and ordered page assembly
//! - [`scan`]: string-aware scanning primitives shared by the above

pub mod cli;
pub mod constants;
pub mod markup;
pub mod pages;
pub mod recovery;
pub mod scan;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use markup::extract_document;
pub use pages::assemble_pages;
pub use recovery::recover;
pub use types::{
    EnvVar, FileEntry, FileKind, PageRecord, PageloomError, ProjectDescriptor, ProjectKind,
    RecoveryError, Result,
};
