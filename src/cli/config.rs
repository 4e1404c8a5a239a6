//! `config` subcommand: render or inspect environment configuration

use clap::Args;
use colored::Colorize;

use crate::config::{Config, ENV_VARS};
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    /// Enable or disable AI (true/false)
    #[arg(long)]
    pub ai_enabled: Option<bool>,

    /// AI provider (deepseek/openai)
    #[arg(long)]
    pub provider: Option<String>,

    /// API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show the current environment configuration
    #[arg(long)]
    pub show: bool,

    /// Print only the export lines (for shell redirection)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    if args.show {
        show_current();
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(enabled) = args.ai_enabled {
        config.ai.enabled = enabled;
    }
    if let Some(provider) = args.provider {
        config.ai.provider = provider;
    }
    if let Some(api_key) = args.api_key {
        config.ai.api_key = api_key;
    }
    if let Some(endpoint) = args.endpoint {
        config.ai.api_endpoint = endpoint;
    }
    if let Some(model) = args.model {
        config.ai.model = model;
    }
    if let Some(timeout) = args.timeout {
        config.ai.timeout = timeout;
    }

    let exports = config.save_to_env();

    if args.quiet {
        for line in exports {
            println!("{}", line);
        }
        return Ok(());
    }

    println!("{}", "Add these to your shell profile, or eval them:".cyan());
    println!();
    for line in &exports {
        println!("  {}", line);
    }
    println!();
    println!(
        "{}",
        "example: sql-diff config --ai-enabled true --api-key sk-... -q > ~/.sql-diff-env"
            .bright_black()
    );

    Ok(())
}

/// Print each recognized environment variable and its current value
fn show_current() {
    println!("{}", "Current environment configuration:".cyan().bold());
    println!();

    for name in ENV_VARS {
        match std::env::var(name) {
            Ok(value) => {
                let shown = if name.ends_with("API_KEY") {
                    mask(&value)
                } else {
                    value
                };
                println!("  {} = {}", name.bold(), shown.green());
            }
            Err(_) => println!("  {} {}", name.bold(), "(not set)".bright_black()),
        }
    }
}

/// Mask a secret, keeping a short recognizable prefix
fn mask(value: &str) -> String {
    if value.len() <= 6 {
        return "******".to_string();
    }
    format!("{}******", &value[..6])
}
