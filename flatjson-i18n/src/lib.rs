//! Flat key/value JSON documents for machine translation.
//!
//! A document is parsed into an ordered [`SourceDocument`], translated elsewhere, and
//! returned as a list of [`OutputRecord`]s that can be saved back as a flat JSON object.

pub mod document;
pub mod error;
pub mod loader;
pub mod record;

pub use document::SourceDocument;
pub use error::{DocumentError, DocumentResult};
pub use loader::{
    DEFAULT_OUTPUT_FILE, MAX_FILE_SIZE, load_document_from_file, save_records_to_file,
};
pub use record::{OutputRecord, records_to_json, records_to_pretty_json};
