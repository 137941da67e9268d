//! Pipeline orchestration and run reporting.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{Result, TabmergeError};
use crate::input::{Loader, SourceMetadata, Table};
use crate::output::Writer;
use crate::schema::TableSchema;
use crate::transform::{TransformEngine, TransformResult, concat};

/// What happened to one input dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Column types resolved at load time.
    pub schema: TableSchema,
    pub rows_loaded: usize,
    pub rows_retained: usize,
    /// Per-step changes.
    pub transforms: TransformResult,
}

/// Summary of the written output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub row_count: usize,
    pub columns: Vec<String>,
}

/// Result of a complete pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub threshold: f64,
    pub datasets: Vec<DatasetReport>,
    pub output: OutputSummary,
}

impl RunReport {
    /// Total rows dropped across all datasets.
    pub fn rows_dropped(&self) -> usize {
        self.datasets
            .iter()
            .map(|d| d.rows_loaded - d.rows_retained)
            .sum()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| TabmergeError::io(path, e))
    }
}

/// Load → transform each input → merge → write.
pub struct Pipeline {
    config: PipelineConfig,
    loader: Loader,
    engine: TransformEngine,
    writer: Writer,
}

impl Pipeline {
    /// Build a pipeline, validating the configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let loader = Loader::with_config(config.loader_config());
        let writer = Writer::with_config(config.writer.clone());

        Ok(Self {
            config,
            loader,
            engine: TransformEngine::new(),
            writer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the per-dataset transformation sequence on a table.
    pub fn process_table(&self, table: Table) -> Result<(Table, TransformResult)> {
        self.engine.apply_all(table, &self.config.operations())
    }

    /// Load one file and run it through the transformation sequence.
    ///
    /// Transform failures are wrapped in [`TabmergeError::Dataset`] naming the file.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<(Table, DatasetReport)> {
        let path = path.as_ref();
        let dataset = self.loader.load(path)?;
        let rows_loaded = dataset.table.row_count();

        let (table, transforms) = self
            .process_table(dataset.table)
            .map_err(|e| e.in_dataset(path))?;

        info!(
            file = %dataset.source.file,
            rows_loaded,
            rows_retained = table.row_count(),
            "processed dataset"
        );

        let report = DatasetReport {
            source: dataset.source,
            schema: dataset.schema,
            rows_loaded,
            rows_retained: table.row_count(),
            transforms,
        };
        Ok((table, report))
    }

    /// Process every configured input, merge and write the output.
    ///
    /// Nothing is written unless every input was processed successfully.
    pub fn run(&self) -> Result<RunReport> {
        let started_at = Utc::now();

        let mut tables = Vec::with_capacity(self.config.inputs.len());
        let mut datasets = Vec::with_capacity(self.config.inputs.len());
        for input in &self.config.inputs {
            let (table, report) = self.process_file(input)?;
            tables.push(table);
            datasets.push(report);
        }

        let merged = concat(tables);
        self.writer.write(&merged, &self.config.output)?;

        info!(
            path = %self.config.output.display(),
            rows = merged.row_count(),
            columns = merged.column_count(),
            "wrote combined output"
        );

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            threshold: self.config.threshold,
            datasets,
            output: OutputSummary {
                path: self.config.output.clone(),
                row_count: merged.row_count(),
                columns: merged.columns().to_vec(),
            },
        })
    }
}
