//! Mermaid label escaping.
//!
//! Document titles and link targets are free text; Mermaid's parser breaks on
//! quotes, `#`, `&`, `<` and `>`, and long labels make diagrams unreadable.

/// Longest label drawn before truncation, in characters.
pub const MAX_LABEL_LEN: usize = 48;

/// Wrap a label in double quotes, escaping internal quotes as `#quot;`.
#[must_use]
pub fn quote_label(label: &str) -> String {
    let escaped = label.replace('"', "#quot;");
    format!("\"{escaped}\"")
}

/// Replace characters that break Mermaid parsing with entity escapes.
#[must_use]
pub fn escape_mermaid_chars(text: &str) -> String {
    text.replace('#', "#35;")
        .replace('&', "#amp;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
}

/// Truncate to `max_len` characters, appending `...` if truncated.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Truncate, escape and quote a label in one step.
#[must_use]
pub fn label(text: &str) -> String {
    quote_label(&escape_mermaid_chars(&truncate(text, MAX_LABEL_LEN)))
}
