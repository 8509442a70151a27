mod conversation_entry;
mod extracted_file;
mod file_format;
mod session_id;

pub use conversation_entry::ConversationEntry;
pub use extracted_file::{ExtractedFile, MAX_EXTRACTED_CHARS, truncate_chars};
pub use file_format::{FileFormat, FileKind, file_extension};
pub use session_id::SessionId;
