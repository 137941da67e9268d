//! Inspect command - show how a file loads.

use std::path::PathBuf;

use colored::Colorize;
use tabmerge::{Loader, PipelineConfig};

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    let dataset = Loader::with_config(config.loader_config()).load(&file)?;

    if json {
        let summary = serde_json::json!({
            "source": dataset.source,
            "schema": dataset.schema,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "{} rows, {} columns ({} bytes)",
        dataset.source.row_count.to_string().white().bold(),
        dataset.source.column_count.to_string().white().bold(),
        dataset.source.size_bytes
    );
    println!("{}", dataset.source.hash.dimmed());

    println!();
    println!("{}", "Schema:".yellow().bold());
    for (name, column_type) in dataset.schema.iter() {
        let nulls = dataset
            .table
            .column_values(name)
            .map(|values| values.filter(|v| v.is_null()).count())
            .unwrap_or(0);
        println!("  {:20} {:10} {} null", name, column_type.to_string(), nulls);
    }

    if verbose {
        println!();
        println!("{}", "First rows:".yellow().bold());
        for row in dataset.table.rows().take(5) {
            let cells: Vec<String> = row.iter().map(|v| v.render()).collect();
            println!("  {}", cells.join(" | "));
        }
    }

    Ok(())
}
