use std::sync::LazyLock;

use regex::Regex;

use crate::domain::truncate_chars;

const MAX_VISIBLE_CHARS: usize = 100;

/// `key=value` and bearer credentials that must never reach the logs.
static SECRETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>bearer\s+|(?:api_key|password|secret|token|session_id)=)[^\s&;"']+"#)
        .unwrap()
});

/// Shortens a prompt for logging and masks credentials in it. Uploaded file
/// text is part of the prompt, so only the head is ever logged.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        format!(
            "{}... ({} chars total)",
            truncate_chars(trimmed, MAX_VISIBLE_CHARS),
            total_chars
        )
    } else {
        trimmed.to_string()
    };

    SECRETS.replace_all(&visible, "${key}[REDACTED]").into_owned()
}
