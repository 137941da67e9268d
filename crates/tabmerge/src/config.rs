//! Pipeline configuration.
//!
//! Defaults reproduce the two-dataset price pipeline; a TOML file can
//! override any subset of keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabmergeError};
use crate::input::LoaderConfig;
use crate::output::WriterConfig;
use crate::schema::ColumnType;
use crate::transform::TransformOperation;

/// Default price threshold for the flag column.
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Column names the pipeline reads and derives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Free-text full name to split.
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// Rows with a null value here are dropped.
    pub key: String,
    /// Numeric field that is zero-stripped and flagged.
    pub price: String,
    /// Derived boolean column.
    pub flag: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            first_name: "first_name".to_string(),
            last_name: "last_name".to_string(),
            key: "name".to_string(),
            price: "price".to_string(),
            flag: "above_100".to_string(),
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input files, processed and concatenated in this order.
    pub inputs: Vec<PathBuf>,
    /// Output file.
    pub output: PathBuf,
    pub threshold: f64,
    pub columns: ColumnNames,
    pub loader: LoaderConfig,
    pub writer: WriterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("dataset1.csv"), PathBuf::from("dataset2.csv")],
            output: PathBuf::from("combined.csv"),
            threshold: DEFAULT_THRESHOLD,
            columns: ColumnNames::default(),
            loader: LoaderConfig::default(),
            writer: WriterConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TabmergeError::NotFound {
                path: path.to_path_buf(),
            },
            _ => TabmergeError::io(path, e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn with_inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(TabmergeError::Config("at least one input is required".to_string()));
        }
        if !self.threshold.is_finite() {
            return Err(TabmergeError::Config(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.columns.first_name == self.columns.last_name {
            return Err(TabmergeError::Config(format!(
                "first and last name columns must differ (both '{}')",
                self.columns.first_name
            )));
        }
        Ok(())
    }

    /// Loader configuration with the name and price columns declared as text
    /// unless the config declares them otherwise.
    ///
    /// Keeping them text lets values like `"0099"` reach the normalizer intact.
    pub fn loader_config(&self) -> LoaderConfig {
        let mut loader = self.loader.clone();
        for column in [&self.columns.name, &self.columns.price] {
            if loader.schema.get(column).is_none() {
                loader.schema.insert(column.clone(), ColumnType::Text);
            }
        }
        loader
    }

    /// The per-dataset transformation sequence.
    pub fn operations(&self) -> Vec<TransformOperation> {
        let c = &self.columns;
        vec![
            TransformOperation::SplitName {
                column: c.name.clone(),
                first: c.first_name.clone(),
                rest: c.last_name.clone(),
            },
            TransformOperation::StripLeadingZeros {
                column: c.price.clone(),
            },
            TransformOperation::DropNulls {
                column: c.key.clone(),
            },
            TransformOperation::FlagAbove {
                column: c.price.clone(),
                flag_column: c.flag.clone(),
                threshold: self.threshold,
            },
        ]
    }
}
