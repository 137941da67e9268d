//! Run command - process inputs and write the combined CSV.

use std::path::PathBuf;

use colored::Colorize;
use tabmerge::{Pipeline, PipelineConfig};
use tracing::{debug, warn};

/// Layer CLI flags over the config file over built-in defaults.
pub fn resolve_config(
    config: Option<PathBuf>,
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    threshold: Option<f64>,
) -> tabmerge::Result<PipelineConfig> {
    let mut resolved = match config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    if !inputs.is_empty() {
        resolved = resolved.with_inputs(inputs);
    }
    if let Some(output) = output {
        resolved = resolved.with_output(output);
    }
    if let Some(threshold) = threshold {
        resolved = resolved.with_threshold(threshold);
    }

    resolved.validate()?;
    Ok(resolved)
}

pub fn run(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    threshold: Option<f64>,
    report: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(config, inputs, output, threshold)?;
    debug!(
        inputs = ?config.inputs,
        output = %config.output.display(),
        threshold = config.threshold,
        "resolved configuration"
    );

    let pipeline = Pipeline::new(config)?;

    println!(
        "{} {} input(s)",
        "Processing".cyan().bold(),
        pipeline.config().inputs.len().to_string().white().bold()
    );

    let result = pipeline.run()?;

    for dataset in &result.datasets {
        println!(
            "  {:30} {} → {} rows",
            dataset.source.file,
            dataset.rows_loaded,
            dataset.rows_retained.to_string().white().bold()
        );

        if verbose {
            for change in &dataset.transforms.changes {
                println!(
                    "    {} ({} values, {} rows removed)",
                    change.description.dimmed(),
                    change.values_changed,
                    change.rows_removed
                );
            }
        }
    }

    let dropped = result.rows_dropped();
    if dropped > 0 {
        println!(
            "{} {} row(s) with a null key",
            "Dropped".yellow(),
            dropped.to_string().yellow().bold()
        );
    }

    println!();
    println!(
        "{} {} rows × {} columns to {}",
        "Wrote".green().bold(),
        result.output.row_count,
        result.output.columns.len(),
        result.output.path.display().to_string().white()
    );

    // The combined CSV is already in place; a report failure does not fail the run.
    if let Some(report_path) = report {
        match result.save(&report_path) {
            Ok(()) => println!(
                "{} {}",
                "Report saved to".green(),
                report_path.display().to_string().white()
            ),
            Err(e) => {
                warn!(path = %report_path.display(), "run report not saved");
                eprintln!("{} {}", "Warning:".yellow().bold(), e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_defaults() {
        let config = resolve_config(
            None,
            vec![PathBuf::from("x.csv")],
            Some(PathBuf::from("y.csv")),
            Some(10.0),
        )
        .unwrap();

        assert_eq!(config.inputs, vec![PathBuf::from("x.csv")]);
        assert_eq!(config.output, PathBuf::from("y.csv"));
        assert_eq!(config.threshold, 10.0);
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let config = resolve_config(None, Vec::new(), None, None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        assert!(resolve_config(None, Vec::new(), None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = resolve_config(Some(PathBuf::from("/no/such/tabmerge.toml")), Vec::new(), None, None)
            .unwrap_err();
        assert!(matches!(err, tabmerge::TabmergeError::NotFound { .. }));
    }

    #[test]
    fn test_report_failure_keeps_run_successful() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.csv");
        fs::write(&input, "name,price\nAnn Lee,150\n").unwrap();
        let out = dir.path().join("out.csv");
        let report = dir.path().join("missing_dir").join("report.json");

        run(vec![input], Some(out.clone()), None, None, Some(report.clone()), false).unwrap();

        assert!(out.exists());
        assert!(!report.exists());
    }

    #[test]
    fn test_report_is_saved() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.csv");
        fs::write(&input, "name,price\nAnn Lee,150\n").unwrap();
        let out = dir.path().join("out.csv");
        let report = dir.path().join("report.json");

        run(vec![input], Some(out), None, None, Some(report.clone()), true).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["output"]["row_count"], 1);
    }
}
