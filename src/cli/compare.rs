//! The compare workflow: parse both sides, diff, report, generate DDL

use colored::Colorize;
use std::path::Path;

use crate::ai;
use crate::config::Config;
use crate::error::Result;
use crate::schema::{parse, DdlGenerator, SchemaDiff};

const RULE: &str = "----------------------------------------";

/// Run the full comparison workflow and print a grouped, colored report
pub async fn run(
    source_sql: &str,
    target_sql: &str,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    println!("{}", RULE.cyan());
    println!("{}", "  sql-diff: table structure comparison".cyan());
    println!("{}", RULE.cyan());
    println!();

    let source = parse(source_sql)?;
    println!(
        "{} source table: {} ({} columns)",
        "✓".green().bold(),
        source.name,
        source.columns.len()
    );

    let target = parse(target_sql)?;
    println!(
        "{} target table: {} ({} columns)",
        "✓".green().bold(),
        target.name,
        target.columns.len()
    );
    println!();

    let diff = SchemaDiff::compare(&source, &target);

    if !diff.has_changes() {
        println!(
            "{}",
            "✓ the two table structures are identical, nothing to do"
                .green()
                .bold()
        );
        return Ok(());
    }

    let generator = DdlGenerator::new(&diff);
    let summary = generator.summary();

    println!("{}", "Differences:".yellow().bold());
    println!("{}", RULE.yellow());
    print!("{}", summary);
    println!();

    let ddls = generator.generate_sql(&source.name);
    print_grouped_ddl(&ddls);

    if !ddls.is_empty() {
        println!("{}", "Full script:".bold());
        println!("{}", RULE);
        for ddl in &ddls {
            println!("{};", ddl);
        }
        println!();
    }

    if config.ai.enabled {
        run_ai_analysis(source_sql, target_sql, &summary, config).await;
    }

    if let Some(path) = output {
        let mut script = String::new();
        for ddl in &ddls {
            script.push_str(ddl);
            script.push_str(";\n");
        }
        std::fs::write(path, script)?;
        println!(
            "{} DDL written to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    Ok(())
}

/// Print the generated statements grouped by category
fn print_grouped_ddl(ddls: &[String]) {
    let mut add_columns = Vec::new();
    let mut modify_columns = Vec::new();
    let mut drop_columns = Vec::new();
    let mut add_indexes = Vec::new();
    let mut drop_indexes = Vec::new();

    for ddl in ddls {
        let upper = ddl.to_uppercase();
        if upper.contains("ADD COLUMN") {
            add_columns.push(ddl);
        } else if upper.contains("MODIFY COLUMN") {
            modify_columns.push(ddl);
        } else if upper.contains("DROP COLUMN") {
            drop_columns.push(ddl);
        } else if upper.contains("ADD INDEX") || upper.contains("ADD UNIQUE") {
            add_indexes.push(ddl);
        } else if upper.contains("DROP INDEX") {
            drop_indexes.push(ddl);
        }
    }

    print_group("Added columns", &add_columns, |s| s.green());
    print_group("Modified columns", &modify_columns, |s| s.yellow());
    print_group("Removed columns (commented out)", &drop_columns, |s| s.red());
    print_group("Added indexes", &add_indexes, |s| s.cyan());
    print_group("Removed indexes (commented out)", &drop_indexes, |s| s.magenta());
}

fn print_group(
    title: &str,
    ddls: &[&String],
    paint: impl Fn(&str) -> colored::ColoredString,
) {
    if ddls.is_empty() {
        return;
    }

    println!("{}", paint(&format!("{} ({}):", title, ddls.len())).bold());
    for (i, ddl) in ddls.iter().enumerate() {
        println!("  {}. {};", i + 1, paint(ddl.as_str()));
    }
    println!();
}

/// Run AI analysis and print the result. Failures degrade to a warning and
/// never affect the comparison output.
async fn run_ai_analysis(source_sql: &str, target_sql: &str, summary: &str, config: &Config) {
    println!("{}", "Running AI analysis...".cyan());

    let provider = match ai::new_provider(&config.ai) {
        Ok(provider) => provider,
        Err(e) => {
            println!("{} AI initialization failed: {}", "⚠".yellow(), e);
            return;
        }
    };

    let result = match provider.analyze(source_sql, target_sql, summary).await {
        Ok(result) => result,
        Err(e) => {
            println!("{} AI analysis failed: {}", "⚠".yellow(), e);
            return;
        }
    };

    println!();
    println!("{}", "AI analysis:".cyan().bold());
    println!("{}", RULE.cyan());

    if !result.summary.is_empty() {
        println!();
        println!("{}", "Summary:".bold());
        println!("{}", result.summary);
    }

    print_advice("Suggestions:", &result.suggestions);
    print_advice("Risks:", &result.risks);
    print_advice("Best practices:", &result.best_practices);
}

fn print_advice(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    println!();
    println!("{}", title.bold());
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}
