use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a zip package with the given `(part name, content)` entries.
pub fn write_package(dir: &Path, file_name: &str, parts: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

pub fn write_file(dir: &Path, file_name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}
