use super::FileKind;

pub const MAX_EXTRACTED_CHARS: usize = 8000;

/// Text and classification derived from one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub kind: FileKind,
    pub text: String,
    pub name: String,
}

impl ExtractedFile {
    pub fn new(kind: FileKind, text: String, name: String) -> Self {
        Self { kind, text, name }
    }
}

/// Keeps the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
