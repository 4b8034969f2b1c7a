//! learnstyle - learning-style prediction CLI
//!
//! Usage:
//!   learnstyle train --data students.csv          # Train and save a new version
//!   learnstyle predict --catatan 4 ... --aktif 3  # Predict from answers given as flags
//!   learnstyle ask                                # Interactive questionnaire
//!   learnstyle versions                           # List saved model versions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;
mod output;

use commands::predict::AnswerArgs;
use commands::train::TrainOptions;
use commands::{ask, predict, train, versions};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "LEARNSTYLE_LOG";

/// learnstyle - predict a learner's dominant style from questionnaire answers
#[derive(Parser)]
#[command(name = "learnstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logs)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a decision tree and save a new artifact version
    Train {
        /// Training dataset (CSV)
        #[arg(long, value_name = "CSV")]
        data: PathBuf,

        /// Directory for the versioned artifacts
        #[arg(long, value_name = "DIR", default_value = "models")]
        out_dir: PathBuf,

        /// TOML file with a [training] table
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Maximum tree depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Fraction of rows held out for evaluation
        #[arg(long)]
        test_size: Option<f64>,

        /// Random seed for the split and the tree
        #[arg(long)]
        seed: Option<u64>,

        /// Fail on constant feature columns instead of scaling them to 0
        #[arg(long)]
        strict_scaling: bool,
    },

    /// Predict from answers given as flags
    Predict {
        /// Directory holding the artifacts
        #[arg(long, value_name = "DIR", default_value = "models")]
        artifacts: PathBuf,

        /// Artifact version tag (default: latest)
        #[arg(long = "version", value_name = "TAG")]
        model_version: Option<String>,

        #[command(flatten)]
        answers: AnswerArgs,

        /// Append the prediction to this CSV log
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
    },

    /// Answer the questionnaire interactively
    Ask {
        /// Directory holding the artifacts
        #[arg(long, value_name = "DIR", default_value = "models")]
        artifacts: PathBuf,

        /// Artifact version tag (default: latest)
        #[arg(long = "version", value_name = "TAG")]
        model_version: Option<String>,

        /// Append the prediction to this CSV log
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
    },

    /// List saved artifact versions
    Versions {
        /// Directory holding the artifacts
        #[arg(long, value_name = "DIR", default_value = "models")]
        artifacts: PathBuf,
    },
}

fn init_tracing(verbose: bool, quiet: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr)))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, cli.log_json);

    let result = match cli.command {
        Commands::Train {
            data,
            out_dir,
            config,
            max_depth,
            test_size,
            seed,
            strict_scaling,
        } => train::run(
            &TrainOptions {
                data,
                out_dir,
                config,
                max_depth,
                test_size,
                seed,
                strict_scaling,
            },
            cli.json,
        ),

        Commands::Predict {
            artifacts,
            model_version,
            answers,
            log,
        } => predict::run(
            &artifacts,
            model_version.as_deref(),
            &answers,
            log.as_deref(),
            cli.json,
        ),

        Commands::Ask {
            artifacts,
            model_version,
            log,
        } => ask::run(&artifacts, model_version.as_deref(), log.as_deref(), cli.json),

        Commands::Versions { artifacts } => versions::run(&artifacts, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_version_flag_is_model_tag() {
        let cli = Cli::try_parse_from([
            "learnstyle", "predict", "--version", "20250102_030405",
            "--catatan", "4", "--diagram", "4", "--baca", "3", "--mendengarkan", "2",
            "--diskusi", "ya", "--rekaman", "1", "--praktik", "tidak", "--mencoba", "3",
            "--bosan", "2", "--hadir", "5", "--aktif", "4",
        ])
        .expect("parses");
        match cli.command {
            Commands::Predict { model_version, artifacts, .. } => {
                assert_eq!(model_version.as_deref(), Some("20250102_030405"));
                assert_eq!(artifacts, PathBuf::from("models"));
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_predict_requires_every_answer() {
        assert!(Cli::try_parse_from(["learnstyle", "predict", "--catatan", "4"]).is_err());
    }
}
