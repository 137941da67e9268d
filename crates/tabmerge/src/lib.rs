//! tabmerge: load, clean, flag and merge tabular CSV datasets.
//!
//! Each input file goes through the same fixed sequence of steps before the
//! results are concatenated and written as one CSV:
//!
//! - **Split**: `name` → `first_name`, `last_name` on the first space
//! - **Normalize**: strip leading zeros from text `price` values
//! - **Filter**: drop rows with a null `name`
//! - **Flag**: `above_100 = price > 100`
//!
//! Every step takes a [`Table`] by value and returns the transformed table.
//!
//! # Example
//!
//! ```no_run
//! use tabmerge::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default()
//!     .with_inputs(vec!["dataset1.csv".into(), "dataset2.csv".into()])
//!     .with_output("combined.csv");
//! let report = Pipeline::new(config).unwrap().run().unwrap();
//!
//! println!("Rows written: {}", report.output.row_count);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod schema;
pub mod transform;

mod pipeline;

pub use crate::pipeline::{DatasetReport, OutputSummary, Pipeline, RunReport};
pub use config::{ColumnNames, PipelineConfig};
pub use error::{Result, TabmergeError};
pub use input::{Dataset, Loader, LoaderConfig, SourceMetadata, Table};
pub use output::{Writer, WriterConfig};
pub use schema::{ColumnType, TableSchema, Value};
pub use transform::{TransformEngine, TransformOperation, TransformResult, concat};
