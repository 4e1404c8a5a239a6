//! `alter` subcommand: AI ALTER TABLE generation

use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::ai;
use crate::cli::{generate, input};
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Args)]
pub struct AlterArgs {
    /// CREATE TABLE statement of the existing table
    #[arg(short, long)]
    pub table: Option<String>,

    /// Natural-language description of the change
    #[arg(short, long)]
    pub description: String,

    /// Read the table definition interactively from stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the generated SQL to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: AlterArgs, config: &Config) -> Result<()> {
    generate::require_ai(config)?;

    let current_ddl = if args.interactive {
        println!("{}", "Paste the existing CREATE TABLE statement:".yellow().bold());
        println!("(finish with a line containing only END, or two blank lines)");
        let ddl = input::read_multiline()?;
        if ddl.is_empty() {
            return Err(Error::Config("table definition must not be empty".to_string()));
        }
        println!("{} read {} characters", "✓".green().bold(), ddl.len());
        ddl
    } else {
        args.table
            .ok_or_else(|| Error::Config("pass -t, or use -i to paste the table".to_string()))?
    };

    println!("{} {}", "Request:".cyan(), args.description);
    println!("{}", "Generating ALTER TABLE via AI...".cyan());

    let provider = ai::new_provider(&config.ai)?;
    let sql = provider
        .generate_alter_table(&current_ddl, &args.description)
        .await?;

    let statements: Vec<&str> = sql
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    println!();
    println!("{}", "Generated statements:".green().bold());
    println!();
    for stmt in &statements {
        println!("{};", stmt);
    }
    println!();

    if let Some(path) = args.output {
        let mut script = String::new();
        for stmt in &statements {
            script.push_str(stmt);
            script.push_str(";\n");
        }
        std::fs::write(&path, script)?;
        println!("{} SQL written to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}
