//! Helpers shared by the Office Open XML extractors (docx, pptx, xlsx).

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::BytesStart;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::application::ports::FileLoaderError;

pub(super) type Archive = ZipArchive<File>;

pub(super) fn open_archive(path: &Path) -> Result<Archive, FileLoaderError> {
    let file = File::open(path)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to open file: {e}")))?;
    ZipArchive::new(file)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("not an OOXML package: {e}")))
}

/// Reads one package part as UTF-8. Missing parts yield `None`.
pub(super) fn read_part(
    archive: &mut Archive,
    name: &str,
) -> Result<Option<String>, FileLoaderError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "failed to read {name}: {e}"
            )));
        }
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to read {name}: {e}")))?;
    Ok(Some(xml))
}

pub(super) fn xml_error(e: impl Display) -> FileLoaderError {
    FileLoaderError::ExtractionFailed(format!("malformed XML: {e}"))
}

pub(super) fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Runs a synchronous parser on the blocking pool.
pub(super) async fn parse_blocking<F>(path: &Path, parse: F) -> Result<String, FileLoaderError>
where
    F: FnOnce(&Path) -> Result<String, FileLoaderError> + Send + 'static,
{
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || parse(&path))
        .await
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))?
}
