//! tabmerge CLI - clean, flag and merge CSV datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            inputs,
            output,
            config,
            threshold,
            report,
        } => commands::run::run(inputs, output, config, threshold, report, cli.verbose),

        Commands::Inspect { file, config, json } => {
            commands::inspect::run(file, config, json, cli.verbose)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[String]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        let out = dir.path().join("out.csv");

        let cli = parse(&[
            "tabmerge".into(),
            "run".into(),
            missing.display().to_string(),
            "-o".into(),
            out.display().to_string(),
        ]);

        let err = dispatch(cli).unwrap_err();
        assert!(err.to_string().contains("missing.csv"), "{err}");
        assert!(!out.exists());
    }

    #[test]
    fn test_inspect_missing_file_is_an_error() {
        let cli = parse(&["tabmerge".into(), "inspect".into(), "/no/such/file.csv".into()]);
        assert!(dispatch(cli).is_err());
    }

    #[test]
    fn test_successful_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.csv");
        fs::write(&input, "name,price\nAnn Lee,0050\n").unwrap();
        let out = dir.path().join("out.csv");

        let cli = parse(&[
            "tabmerge".into(),
            "run".into(),
            input.display().to_string(),
            "-o".into(),
            out.display().to_string(),
        ]);

        dispatch(cli).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "name,price,first_name,last_name,above_100\nAnn Lee,50,Ann,Lee,false\n"
        );
    }
}
