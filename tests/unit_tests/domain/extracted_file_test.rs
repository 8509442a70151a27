use chat_gateway::domain::{MAX_EXTRACTED_CHARS, truncate_chars};

#[test]
fn given_short_text_when_truncating_then_returns_unchanged() {
    assert_eq!(truncate_chars("hello", MAX_EXTRACTED_CHARS), "hello");
}

#[test]
fn given_text_longer_than_limit_when_truncating_then_keeps_first_chars() {
    let text = "a".repeat(MAX_EXTRACTED_CHARS + 500);
    let truncated = truncate_chars(&text, MAX_EXTRACTED_CHARS);
    assert_eq!(truncated.chars().count(), MAX_EXTRACTED_CHARS);
}

#[test]
fn given_multibyte_text_when_truncating_then_counts_characters_not_bytes() {
    let text = "ñandú".repeat(2000);
    let truncated = truncate_chars(&text, MAX_EXTRACTED_CHARS);
    assert_eq!(truncated.chars().count(), MAX_EXTRACTED_CHARS);
    assert!(text.starts_with(truncated));
}

#[test]
fn given_text_exactly_at_limit_when_truncating_then_returns_whole_text() {
    let text = "b".repeat(MAX_EXTRACTED_CHARS);
    assert_eq!(truncate_chars(&text, MAX_EXTRACTED_CHARS), text);
}
