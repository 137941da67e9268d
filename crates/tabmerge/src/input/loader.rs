//! Delimited file loader with explicit column typing.

use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, TabmergeError};
use crate::schema::{ColumnType, TableSchema, Value};
use super::source::{Dataset, SourceMetadata, Table};

/// Markers often used for missing data. Not applied unless configured, since
/// they are also legitimate text (a surname of "None").
pub const COMMON_NULL_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>",
];

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Field delimiter.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
    /// Extra cell contents read as null. Blank cells always are.
    pub null_values: Vec<String>,
    /// Declared column types. Undeclared columns are inferred.
    pub schema: TableSchema,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            null_values: Vec::new(),
            schema: TableSchema::new(),
        }
    }
}

impl LoaderConfig {
    /// Declare a column type.
    pub fn with_column_type(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.schema.insert(name, column_type);
        self
    }

    /// Also read [`COMMON_NULL_TOKENS`] as null.
    pub fn with_common_null_tokens(mut self) -> Self {
        self.null_values
            .extend(COMMON_NULL_TOKENS.iter().map(|s| s.to_string()));
        self
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        ascii_byte(self.delimiter, "delimiter")
    }

    fn quote_byte(&self) -> Result<u8> {
        ascii_byte(self.quote, "quote")
    }
}

pub(crate) fn ascii_byte(c: char, what: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(TabmergeError::Config(format!(
            "{} must be a single ASCII character, got {:?}",
            what, c
        )))
    }
}

/// Reads delimited files into typed tables.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file into a dataset.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TabmergeError::NotFound {
                path: path.to_path_buf(),
            },
            _ => TabmergeError::io(path, e),
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| TabmergeError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, schema) = self.parse(&contents, path)?;

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        debug!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded dataset"
        );

        Ok(Dataset {
            table,
            schema,
            source,
        })
    }

    /// Parse in-memory delimited data. `origin` is used in error messages.
    pub fn load_bytes(&self, bytes: &[u8], origin: impl AsRef<Path>) -> Result<Table> {
        self.parse(bytes, origin.as_ref()).map(|(table, _)| table)
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<(Table, TableSchema)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .quote(self.config.quote_byte()?)
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(path, e))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(TabmergeError::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: "missing header row".to_string(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(TabmergeError::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: format!("duplicate column '{}'", dup),
            });
        }

        // Raw cells, None for null tokens.
        let mut raw: Vec<Vec<Option<String>>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(path, e))?;
            raw.push(
                record
                    .iter()
                    .map(|cell| (!self.is_null(cell)).then(|| cell.to_string()))
                    .collect(),
            );
        }

        let schema: TableSchema = headers
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let column_type = self.config.schema.get(name).unwrap_or_else(|| {
                    ColumnType::infer(raw.iter().filter_map(|r| r[col].as_deref()))
                });
                (name.clone(), column_type)
            })
            .collect();

        let types: Vec<ColumnType> = schema.iter().map(|(_, t)| t).collect();
        let mut table = Table::new(headers);

        for (row_idx, cells) in raw.into_iter().enumerate() {
            let mut row = Vec::with_capacity(cells.len());
            for (col, cell) in cells.into_iter().enumerate() {
                let value = match cell {
                    None => Value::Null,
                    Some(cell) => types[col].parse(&cell).ok_or_else(|| {
                        TabmergeError::TypeConversion {
                            column: table.columns()[col].clone(),
                            row: row_idx,
                            value: cell.clone(),
                            target: types[col].to_string(),
                        }
                    })?,
                };
                row.push(value);
            }
            table.push_row(row)?;
        }

        Ok((table, schema))
    }

    fn is_null(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        trimmed.is_empty() || self.config.null_values.iter().any(|n| n == trimmed)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a CSV reader error onto the error taxonomy.
fn csv_error(path: &Path, err: csv::Error) -> TabmergeError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { .. } => "invalid UTF-8".to_string(),
        _ => err.to_string(),
    };

    match err.into_kind() {
        csv::ErrorKind::Io(io) => TabmergeError::io(path, io),
        _ => TabmergeError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}
