//! Interactive multi-line input

use colored::Colorize;
use std::io::BufRead;

use crate::config::Config;
use crate::error::{Error, Result};

/// Read the source and target CREATE TABLE statements interactively
pub fn read_schema_pair(config: &Config) -> Result<(String, String)> {
    if config.ai.enabled {
        println!(
            "{} AI analysis enabled (provider: {})",
            "✓".green().bold(),
            config.ai.provider
        );
    } else {
        println!("AI analysis disabled (enable with --ai or the config file)");
    }
    println!();

    println!("{}", "Paste the SOURCE table's CREATE TABLE statement:".yellow().bold());
    println!("(finish with a line containing only END, or two blank lines)");
    let source = read_multiline()?;
    if source.is_empty() {
        return Err(Error::Config("source SQL must not be empty".to_string()));
    }
    println!("{} read {} characters", "✓".green().bold(), source.len());
    println!();

    println!("{}", "Paste the TARGET table's CREATE TABLE statement:".yellow().bold());
    println!("(finish with a line containing only END, or two blank lines)");
    let target = read_multiline()?;
    if target.is_empty() {
        return Err(Error::Config("target SQL must not be empty".to_string()));
    }
    println!("{} read {} characters", "✓".green().bold(), target.len());
    println!();

    Ok((source, target))
}

/// Read lines from stdin until a lone `END` or two consecutive blank lines.
/// Single blank lines inside the SQL are preserved.
pub fn read_multiline() -> Result<String> {
    read_multiline_from(std::io::stdin().lock())
}

fn read_multiline_from(reader: impl BufRead) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_count = 0;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == "END" {
            break;
        }

        if trimmed.is_empty() {
            blank_count += 1;
            if blank_count >= 2 {
                lines.pop();
                break;
            }
        } else {
            blank_count = 0;
        }

        lines.push(line);
    }

    Ok(lines.join("\n").trim().to_string())
}
