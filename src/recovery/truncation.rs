//! Truncation repair
//!
//! Mid-stream cutoff is the most common malformation in model output. The
//! signature is an unbalanced brace/bracket count outside strings. Repair
//! prefers retaining the *latest* structurally complete file record; only
//! when no record boundary exists does it fall back to blindly closing
//! whatever is still open.

use std::borrow::Cow;

use tracing::debug;

use crate::scan::{JSON_QUOTES, StringTracker, next_non_ws, string_mask};

/// Structural balance state after scanning a document
struct Balance {
    /// Openers still unmatched, in open order
    stack: Vec<u8>,
    /// Whether the document ends inside a string literal
    open_string: bool,
}

impl Balance {
    fn is_balanced(&self) -> bool {
        self.stack.is_empty() && !self.open_string
    }
}

fn analyze(s: &str) -> Balance {
    let mut tracker = StringTracker::new(JSON_QUOTES);
    let mut stack = Vec::new();

    for b in s.bytes() {
        if tracker.advance(b) {
            continue;
        }
        match b {
            b'{' | b'[' => stack.push(b),
            b'}' => {
                if stack.last() == Some(&b'{') {
                    stack.pop();
                }
            }
            b']' => {
                if stack.last() == Some(&b'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    Balance {
        stack,
        open_string: tracker.in_string(),
    }
}

/// How (and whether) the document was re-closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationOutcome {
    /// Input was already balanced
    Balanced,
    /// Text was cut at the last complete file record
    RecordBoundary,
    /// No record boundary existed; open structures were force-closed.
    /// When `closed_string` is set, the text ended mid-string and the last
    /// retained record may carry partial data.
    ForcedClose { closed_string: bool },
}

/// Repair a truncated document, or return it unchanged when balanced.
pub fn repair_truncation(s: &str) -> (Cow<'_, str>, TruncationOutcome) {
    let balance = analyze(s);
    if balance.is_balanced() {
        return (Cow::Borrowed(s), TruncationOutcome::Balanced);
    }

    // Preferred: truncate at the last complete record in the files array and
    // re-close array and root. A trailing comma is kept; the trailing-comma
    // repair removes it later.
    if let Some(array_start) = find_files_array(s)
        && let Some(boundary) = last_complete_record(s, array_start)
    {
        debug!(boundary, "truncating to last complete file record");
        let mut repaired = s[..boundary].to_string();
        repaired.push_str("]}");
        return (Cow::Owned(repaired), TruncationOutcome::RecordBoundary);
    }

    // Fallback: close an open string literal, then every still-open
    // container in reverse open order.
    debug!(
        open = balance.stack.len(),
        open_string = balance.open_string,
        "no record boundary found, closing open structures"
    );
    let mut repaired = s.to_string();
    if balance.open_string {
        repaired.push('"');
    }
    for opener in balance.stack.iter().rev() {
        repaired.push(if *opener == b'{' { '}' } else { ']' });
    }
    (
        Cow::Owned(repaired),
        TruncationOutcome::ForcedClose {
            closed_string: balance.open_string,
        },
    )
}

/// Locate the `[` opening the top-level `"files"` array.
fn find_files_array(s: &str) -> Option<usize> {
    let mask = string_mask(s, JSON_QUOTES);

    for (idx, _) in s.match_indices("\"files\"") {
        // The key's opening quote must be at structural level, not content
        // inside some other string.
        if mask.get(idx).copied().unwrap_or(true) {
            continue;
        }
        let (colon_idx, colon) = match next_non_ws(s, idx + "\"files\"".len()) {
            Some(found) => found,
            None => continue,
        };
        if colon != b':' {
            continue;
        }
        if let Some((bracket_idx, b'[')) = next_non_ws(s, colon_idx + 1) {
            return Some(bracket_idx);
        }
    }

    None
}

/// Scan the files array for the latest element-closing `}` whose next
/// non-whitespace is `,` or `]` (or end of input). Returns the byte offset
/// just past the boundary, including a trailing comma when present.
fn last_complete_record(s: &str, array_start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut tracker = StringTracker::new(JSON_QUOTES);
    let mut depth = 0usize;
    let mut boundary = None;

    for (i, &b) in bytes.iter().enumerate().skip(array_start) {
        if tracker.advance(b) {
            continue;
        }
        match b {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.saturating_sub(1);
                // Back at array-element level: a record just closed
                if b == b'}' && depth == 1 {
                    match next_non_ws(s, i + 1) {
                        Some((comma_idx, b',')) => boundary = Some(comma_idx + 1),
                        Some((_, b']')) | None => boundary = Some(i + 1),
                        Some(_) => {}
                    }
                }
            }
            _ => {}
        }
    }

    boundary
}
