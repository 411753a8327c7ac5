//! Envelope stripping
//!
//! Model output frequently wraps the JSON payload in a markdown code fence,
//! sometimes with a language tag. Exactly one leading and one trailing
//! wrapper is removed; anything else is left untouched.

/// Strip a single fenced-block wrapper if present.
pub fn strip_envelope(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = strip_leading_fence(trimmed) else {
        return trimmed;
    };

    // Only treat it as a wrapper when a closing fence exists too; a lone
    // opening fence is more likely truncated output than an envelope.
    match rest.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => rest.trim(),
    }
}

/// Remove a leading fence line: backticks optionally followed by a language
/// tag, terminated by a newline.
fn strip_leading_fence(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("```")?;
    let line_end = rest.find('\n')?;

    // The fence line may only carry a short language tag ("json", "jsonc"...)
    let tag = rest[..line_end].trim();
    if tag.len() > 12 || tag.contains(|c: char| !c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(&rest[line_end + 1..])
}
