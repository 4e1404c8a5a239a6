//! `generate` subcommand: AI CREATE TABLE generation

use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::ai;
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Args)]
pub struct GenerateArgs {
    /// Natural-language description of the table
    #[arg(short, long)]
    pub description: String,

    /// Write the generated SQL to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs, config: &Config) -> Result<()> {
    require_ai(config)?;

    println!("{} {}", "Request:".cyan(), args.description);
    println!("{}", "Generating CREATE TABLE via AI...".cyan());

    let provider = ai::new_provider(&config.ai)?;
    let sql = provider.generate_create_table(&args.description).await?;

    println!();
    println!("{}", "Generated statement:".green().bold());
    println!();
    println!("{};", sql);
    println!();

    if let Some(path) = args.output {
        std::fs::write(&path, format!("{};\n", sql))?;
        println!("{} SQL written to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

pub(crate) fn require_ai(config: &Config) -> Result<()> {
    if config.ai.enabled {
        return Ok(());
    }

    eprintln!("{}", "error: this command requires AI to be enabled".red());
    eprintln!("enable it with --ai, the config file, or SQL_DIFF_AI_ENABLED=true");
    Err(Error::Config("AI is not enabled".to_string()))
}
