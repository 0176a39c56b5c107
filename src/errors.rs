use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, extracting or rendering bank account reports.
///
/// None of them is recoverable per entry: the first error aborts the run.
#[derive(Error, Debug)]
pub enum StatementError {
    /// A mandatory element (indicator, amount, currency, booking or value date) is absent
    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    /// An element is present but its text cannot be interpreted
    #[error("Malformed value for '{field}': {value:?} ({reason})")]
    MalformedValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Input file cannot be opened or read
    #[error("Failed to read {path}: {source}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input sniffed as a zip archive but cannot be opened or enumerated
    #[error("Corrupt archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Document is not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Document bytes are not valid UTF-8
    #[error("Document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// Extraction failure of a single report entry (1-based position in the document)
    #[error("Entry #{index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<StatementError>,
    },

    /// Any extraction failure, tagged with the document it came from
    #[error("Error processing {origin}: {source}")]
    Document {
        origin: String,
        #[source]
        source: Box<StatementError>,
    },

    // ── Input validation ────────────────────────────────────────────────────────

    /// The builder was run without any input file
    #[error("At least one input file is required")]
    MissingInput,

    #[error("File does not exist: {0}")]
    FileNotFound(PathBuf),

    #[error("File given more than once: {0}")]
    DuplicateInput(PathBuf),

    // ── Output ──────────────────────────────────────────────────────────────────

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet output failed: {0}")]
    Spreadsheet(#[from] spreadsheet_ods::OdsError),
}

impl StatementError {
    pub(crate) fn malformed(field: &'static str, value: &str, reason: impl ToString) -> Self {
        StatementError::MalformedValue {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn in_entry(self, index: usize) -> Self {
        StatementError::Entry {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_document(self, origin: &str) -> Self {
        StatementError::Document {
            origin: origin.to_string(),
            source: Box::new(self),
        }
    }

    /// Innermost error, looking through `Document` and `Entry` wrappers.
    pub fn root(&self) -> &StatementError {
        match self {
            StatementError::Document { source, .. } | StatementError::Entry { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

/// Convenience alias for results carrying [`StatementError`]
pub type StatementResult<T> = Result<T, StatementError>;
