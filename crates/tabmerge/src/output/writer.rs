//! Delimited file writer.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TabmergeError};
use crate::input::{Table, ascii_byte};

/// Writer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Field delimiter.
    pub delimiter: char,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Serializes tables to delimited files.
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Serialize a table to bytes: header row, then one record per row.
    pub fn to_bytes(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(ascii_byte(self.config.delimiter, "delimiter")?)
            .from_writer(Vec::new());

        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|v| v.render()))?;
        }

        writer
            .into_inner()
            .map_err(|e| TabmergeError::io("<buffer>", e.into_error()))
    }

    /// Write a table to `path`, replacing any existing file.
    ///
    /// Data goes to a sibling temporary file that is renamed over the target,
    /// so the target is either the old file or the complete new one.
    pub fn write(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(table)?;
        let staging = staging_path(path);

        let outcome = fs::File::create(&staging)
            .and_then(|mut file| {
                file.write_all(&bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&staging, path));

        if let Err(e) = outcome {
            let _ = fs::remove_file(&staging);
            return Err(TabmergeError::io(path, e));
        }

        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "wrote table"
        );
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.partial", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    #[test]
    fn test_to_bytes_has_header_and_no_index() {
        let table = Table::from_records(vec![
            vec![("name", Value::from("Ann")), ("above_100", Value::Boolean(false))],
            vec![("name", Value::Null), ("above_100", Value::Boolean(true))],
        ]);
        let bytes = Writer::new().to_bytes(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "name,above_100\nAnn,false\n,true\n"
        );
    }

    #[test]
    fn test_quotes_fields_with_delimiter() {
        let table = Table::from_records(vec![vec![("name", "Lee, Ann")]]);
        let bytes = Writer::new().to_bytes(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "name\n\"Lee, Ann\"\n");
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let staged = staging_path(Path::new("/tmp/out/combined.csv"));
        assert_eq!(staged, Path::new("/tmp/out/.combined.csv.partial"));
    }
}
