//! Structured-Text Recovery Parser
//!
//! Turns raw model output into a [`ProjectDescriptor`], repairing the
//! malformations generative models actually produce:
//! - markdown code fence wrapping
//! - invalid escape sequences inside strings
//! - truncation mid-record (the text is cut at the last complete file entry)
//! - trailing commas, missing commas, double-colon dependency values
//!
//! ## Design Philosophy
//! Local recovery over propagation: every stage is total, and only truly
//! unrecoverable input (empty text, zero valid file entries) surfaces an
//! error. Repairing already-valid input is a no-op, so `recover` is
//! idempotent over its own output.

mod envelope;
mod escape;
pub(crate) mod repairs;
mod truncation;

pub use envelope::strip_envelope;
pub use escape::repair_escapes;
pub use truncation::{TruncationOutcome, repair_truncation};

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::recovery::{DEFAULT_NAME, ERROR_CONTEXT_CHARS};
use crate::types::{EnvVar, FileEntry, ProjectDescriptor, ProjectKind, RecoveryError};

/// Recover a project descriptor from raw model output.
pub fn recover(raw: &str) -> Result<ProjectDescriptor, RecoveryError> {
    if raw.trim().is_empty() {
        return Err(RecoveryError::Empty);
    }

    let stripped = strip_envelope(raw);
    let escaped = repair_escapes(stripped);
    let (closed, outcome) = repair_truncation(&escaped);
    let repaired = repairs::fix_trailing_commas(&repairs::fix_missing_commas(
        &repairs::fix_double_colon(&closed),
    ));

    if repaired != stripped {
        debug!("input required repair before parsing");
    }

    let mut value: Value = serde_json::from_str(&repaired)
        .map_err(|e| malformed_error(&repaired, &e))?;

    // Force-closing an open string means the last retained record was cut
    // mid-value; a partial record must never masquerade as a valid file.
    if outcome == (TruncationOutcome::ForcedClose { closed_string: true })
        && let Some(files) = value.get_mut("files").and_then(|v| v.as_array_mut())
    {
        if files.pop().is_some() {
            warn!("discarding trailing record truncated mid-string");
        }
    }

    build_descriptor(&value)
}

/// Produce a `Malformed` error carrying a context window around the failure.
fn malformed_error(text: &str, err: &serde_json::Error) -> RecoveryError {
    let offset = offset_of(text, err.line(), err.column());
    let half = ERROR_CONTEXT_CHARS / 2;
    let start = floor_char_boundary(text, offset.saturating_sub(half));
    let end = ceil_char_boundary(text, (offset + half).min(text.len()));

    RecoveryError::Malformed {
        context: format!("{} (at: {})", err, &text[start..end]),
    }
}

/// Byte offset of a 1-based line/column position.
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (n, l) in text.split('\n').enumerate() {
        if n + 1 == line {
            return (offset + column.saturating_sub(1)).min(text.len());
        }
        offset += l.len() + 1;
    }
    text.len()
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

// =============================================================================
// Shape Validation
// =============================================================================

/// Validate the parsed document and assemble the descriptor. File entries
/// missing a usable path or content are dropped, not fatal.
fn build_descriptor(value: &Value) -> Result<ProjectDescriptor, RecoveryError> {
    let name = match json_string(value, "name") {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            warn!("project name missing, substituting default");
            DEFAULT_NAME.to_string()
        }
    };

    let raw_files = value
        .get("files")
        .and_then(|v| v.as_array())
        .map(|a| a.as_slice())
        .unwrap_or_default();

    let mut files = Vec::with_capacity(raw_files.len());
    for entry in raw_files {
        let path = json_string(entry, "path");
        let content = json_string(entry, "content");
        match (path, content) {
            (Some(path), Some(content)) if !path.trim().is_empty() && !content.is_empty() => {
                files.push(FileEntry::new(path, content));
            }
            _ => {
                warn!(
                    entry = %entry.get("path").and_then(|p| p.as_str()).unwrap_or("<unknown>"),
                    "dropping file entry without path and content"
                );
            }
        }
    }

    if files.is_empty() {
        return Err(RecoveryError::NoValidFiles);
    }

    Ok(ProjectDescriptor {
        name,
        description: json_string(value, "description").unwrap_or_default(),
        kind: json_string(value, "kind")
            .map(|k| ProjectKind::parse_lenient(&k))
            .unwrap_or_default(),
        files,
        dependencies: string_map(value, "dependencies"),
        dev_dependencies: string_map(value, "devDependencies"),
        env_vars: env_vars(value),
        setup_steps: string_array(value, "setupSteps"),
    })
}

/// Extract a string field by key.
fn json_string(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

/// Extract a string array, dropping non-string elements.
fn string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract a string→string map, dropping non-string values.
fn string_map(value: &Value, key: &str) -> std::collections::BTreeMap<String, String> {
    value
        .get(key)
        .and_then(|v| v.as_object())
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract the declared environment variables; entries without a key are
/// dropped.
fn env_vars(value: &Value) -> Vec<EnvVar> {
    value
        .get("envVars")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|e| {
                    Some(EnvVar {
                        key: json_string(e, "key")?,
                        description: json_string(e, "description").unwrap_or_default(),
                        example: json_string(e, "example"),
                        required: e.get("required").and_then(|v| v.as_bool()).unwrap_or(false),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
