//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Recovery failures carry enough context to diagnose the offending input
//! - The markup extractor and page assembler have no error surface at all:
//!   they always degrade to a usable fallback instead of propagating
//! - No panic/unwrap in library code - all errors are recoverable

use thiserror::Error;

// =============================================================================
// Recovery Error
// =============================================================================

/// Errors surfaced by the structured-text recovery parser.
///
/// Only genuinely unrecoverable input reaches these variants; everything
/// else is repaired in place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    /// Input was empty or whitespace-only
    #[error("input is empty")]
    Empty,

    /// Input could not be parsed even after all repair passes
    #[error("malformed input after repair: {context}")]
    Malformed {
        /// ~200-character window around the parse failure offset
        context: String,
    },

    /// Parsing succeeded but no file entry survived validation
    #[error("no valid file entries in recovered project")]
    NoValidFiles,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum PageloomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("recovery failed: {0}")]
    Recovery(#[from] RecoveryError),
}

pub type Result<T> = std::result::Result<T, PageloomError>;
