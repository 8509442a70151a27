use serde::{Deserialize, Serialize};

/// Upload formats the extraction registry knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Pdf,
    Docx,
    Txt,
    Pptx,
    Xlsx,
    Jpg,
    Jpeg,
    Png,
    Webp,
}

/// Coarse classification reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    #[serde(rename = "documento")]
    Document,
    #[serde(rename = "imagen")]
    Image,
}

impl FileFormat {
    pub const ALL: [FileFormat; 9] = [
        Self::Pdf,
        Self::Docx,
        Self::Txt,
        Self::Pptx,
        Self::Xlsx,
        Self::Jpg,
        Self::Jpeg,
        Self::Png,
        Self::Webp,
    ];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "pptx" => Some(Self::Pptx),
            "xlsx" => Some(Self::Xlsx),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn as_extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn kind(&self) -> FileKind {
        match self {
            Self::Pdf | Self::Docx | Self::Txt | Self::Pptx | Self::Xlsx => FileKind::Document,
            Self::Jpg | Self::Jpeg | Self::Png | Self::Webp => FileKind::Image,
        }
    }
}

/// Returns the lower-cased text after the last `.` of a file name, or the
/// whole name when it has no dot.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "documento",
            Self::Image => "imagen",
        }
    }
}
