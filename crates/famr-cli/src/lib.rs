//! FAMR CLI - train, apply and evaluate Fuzzy ARTMAP models from the terminal
//!
//! Commands:
//! - `train`: build a model from a JSON dataset and save it
//! - `classify`: predict labels for a dataset with a saved model
//! - `evaluate`: train/test hold-out accuracy
//! - `config`: show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use commands::classify::ClassifyArgs;
use commands::config::ConfigArgs;
use commands::evaluate::EvaluateArgs;
use commands::train::TrainArgs;
use config::CliConfig;
use error::CliResult;
use output::OutputFormat;

/// FAMR CLI application
#[derive(Debug, Parser)]
#[command(name = "famr")]
#[command(about = "Fuzzy ARTMAP with relevance factor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "FAMR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Train a model and save it
    Train(TrainArgs),

    /// Classify a dataset with a saved model
    Classify(ClassifyArgs),

    /// Train on one dataset and report accuracy on another
    #[command(alias = "eval")]
    Evaluate(EvaluateArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Execute the parsed command line and return what should be printed.
pub fn run(cli: &Cli) -> CliResult<String> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Train(args) => commands::train::execute(args, &config, cli.output),
        Commands::Classify(args) => commands::classify::execute(args, cli.output),
        Commands::Evaluate(args) => commands::evaluate::execute(args, &config, cli.output),
        Commands::Config(args) => commands::config::execute(args, &config, cli.output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_train_with_flags() {
        let cli = Cli::try_parse_from([
            "famr", "train", "--data", "d.json", "--model", "m.json", "--rho-a", "0.9",
            "--epochs", "2", "-o", "json",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Train(args) => {
                assert_eq!(args.params.rho_a, Some(0.9));
                assert_eq!(args.params.epochs, Some(2));
                assert_eq!(args.model, PathBuf::from("m.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn raw_host_options_are_accepted() {
        let cli = Cli::try_parse_from(["famr", "config", "--options", "-a 0.7 -i 3"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert_eq!(args.params.options.as_deref(), Some("-a 0.7 -i 3")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn run_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("famr.toml");
        std::fs::write(&path, "[famr]\nrho_ab = 0.4\n").unwrap();

        let cli = Cli::try_parse_from([
            "famr",
            "--config",
            path.to_str().unwrap(),
            "--output",
            "json",
            "config",
        ])
        .unwrap();
        let out = run(&cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rho_ab"], 0.4);
    }
}
