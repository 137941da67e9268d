//! Error types for the tabmerge library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum TabmergeError {
    /// Input file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Error reading, writing or renaming a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data (ragged rows, bad encoding, missing header).
    #[error("Parse error in '{}' at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// A value could not be converted to the type a step requires.
    ///
    /// `row` is the 0-based data row of the source file (header excluded).
    #[error("Cannot convert {value:?} in column '{column}' (row {row}) to {target}")]
    TypeConversion {
        column: String,
        row: usize,
        value: String,
        target: String,
    },

    /// A row or column did not match the table's shape.
    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A transform step failed on one input file.
    #[error("In '{}': {source}", path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: Box<TabmergeError>,
    },

    /// A step referenced a column the table does not have.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TabmergeError {
    /// The underlying failure, looking through per-file context.
    pub fn root_cause(&self) -> &TabmergeError {
        match self {
            TabmergeError::Dataset { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn in_dataset(self, path: impl Into<PathBuf>) -> Self {
        TabmergeError::Dataset {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Rewrite a conversion error's row through `origin`, which maps current
    /// row positions to rows of the loaded table.
    pub(crate) fn at_source_rows(self, origin: &[usize]) -> Self {
        match self {
            TabmergeError::TypeConversion {
                column,
                row,
                value,
                target,
            } => TabmergeError::TypeConversion {
                column,
                row: origin.get(row).copied().unwrap_or(row),
                value,
                target,
            },
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TabmergeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tabmerge operations.
pub type Result<T> = std::result::Result<T, TabmergeError>;
