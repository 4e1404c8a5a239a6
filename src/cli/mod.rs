//! Command-line interface
//!
//! The root command compares two CREATE TABLE definitions; subcommands cover
//! AI-assisted generation and configuration management.

pub mod alter;
pub mod compare;
pub mod config;
pub mod generate;
pub mod input;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Parser)]
#[command(
    name = "sql-diff",
    version,
    about = "Compare two MySQL table definitions and generate the ALTER TABLE statements between them",
    long_about = "sql-diff parses two CREATE TABLE statements, reports their structural\n\
                  differences, and generates the ALTER TABLE statements that migrate the\n\
                  source schema toward the target. Destructive statements are emitted as\n\
                  comments only. Optional AI analysis can annotate the result."
)]
pub struct Cli {
    /// CREATE TABLE statement of the source table
    #[arg(short, long)]
    pub source: Option<String>,

    /// CREATE TABLE statement of the target table
    #[arg(short, long)]
    pub target: Option<String>,

    /// Read both statements interactively from stdin (multi-line paste)
    #[arg(short, long)]
    pub interactive: bool,

    /// Enable AI analysis regardless of the config file
    #[arg(long)]
    pub ai: bool,

    /// Configuration file path
    #[arg(long, default_value = ".sql-diff-config.yaml")]
    pub config: String,

    /// Write the generated DDL script to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a CREATE TABLE statement from a natural-language description (requires AI)
    Generate(generate::GenerateArgs),
    /// Generate ALTER TABLE statements from a description of the change (requires AI)
    Alter(alter::AlterArgs),
    /// Manage AI configuration via environment variables
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

/// Load configuration, honoring the `--ai` override
fn load_config(path: &str, force_ai: bool) -> Result<Config> {
    let mut config = Config::load(path)?;
    if force_ai {
        config.ai.enabled = true;
    }
    config.validate()?;
    Ok(config)
}

/// Entry point for the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Generate(args)) => {
            let config = load_config(&cli.config, cli.ai)?;
            generate::run(args, &config).await
        }
        Some(Commands::Alter(args)) => {
            let config = load_config(&cli.config, cli.ai)?;
            alter::run(args, &config).await
        }
        Some(Commands::Config(args)) => config::run(args),
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }
        None => {
            let config = load_config(&cli.config, cli.ai)?;

            let (source_sql, target_sql) = if cli.interactive {
                input::read_schema_pair(&config)?
            } else {
                match (cli.source, cli.target) {
                    (Some(source), Some(target)) => (source, target),
                    _ => {
                        eprintln!(
                            "{}",
                            "error: pass both -s and -t, or use -i for interactive mode".red()
                        );
                        return Err(Error::Config("missing required arguments".to_string()));
                    }
                }
            };

            compare::run(&source_sql, &target_sql, &config, cli.output.as_deref()).await
        }
    }
}

fn print_version() {
    println!(
        "{} {}",
        env!("CARGO_PKG_NAME").cyan().bold(),
        env!("CARGO_PKG_VERSION").green()
    );
}
