use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, parsing or writing a flat JSON document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Valid JSON, but the root is not an object
    #[error("Invalid document: root must be an object, found {0}")]
    NotAnObject(&'static str),
    /// The file does not carry a `.json` extension
    #[error("Invalid file type '{}': expected a .json file", .0.display())]
    InvalidFileType(PathBuf),
    /// The file exceeds the loader's size cap
    #[error("File '{}' is too large ({size} bytes, limit {limit})", path.display())]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },
    /// Underlying filesystem error
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
