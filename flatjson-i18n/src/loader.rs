use crate::document::SourceDocument;
use crate::error::{DocumentError, DocumentResult};
use crate::record::{OutputRecord, records_to_pretty_json};
use std::fs;
use std::path::Path;

/// Largest document the loader will read (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name suggested for a saved translation
pub const DEFAULT_OUTPUT_FILE: &str = "ja_jp.json";

/// Load a source document from a JSON file
///
/// The file must have a `.json` extension (any case) and be at most
/// [`MAX_FILE_SIZE`] bytes. Its content must be a flat JSON object:
/// ```json
/// {
///     "message-key": "message text",
///     "another-key": "%d items left"
/// }
/// ```
///
/// # Errors
/// - Wrong extension
/// - File too large
/// - File read errors
/// - Invalid JSON or non-object root
pub fn load_document_from_file(path: &Path) -> DocumentResult<SourceDocument> {
    ensure_json_extension(path)?;

    let metadata = fs::metadata(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(DocumentError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    SourceDocument::parse(&content)
}

/// Write translated records as a pretty-printed flat JSON object.
///
/// Untranslated records are saved with their original value.
pub fn save_records_to_file(path: &Path, records: &[OutputRecord]) -> DocumentResult<()> {
    let content = records_to_pretty_json(records)?;
    fs::write(path, content).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_json_extension(path: &Path) -> DocumentResult<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(DocumentError::InvalidFileType(path.to_path_buf()))
    }
}
