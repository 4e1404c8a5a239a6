//! sql-diff: compare MySQL table definitions and generate migration DDL
//!
//! The library parses CREATE TABLE statements, computes the structural
//! difference between two tables, and renders the ALTER TABLE statements that
//! migrate the source toward the target. Destructive statements are emitted
//! as comments only.

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod schema;

// Re-export main types for easier access
pub use config::{AiConfig, Config};
pub use error::{Error, Result};
pub use schema::{parse, Column, DdlGenerator, Index, IndexKind, SchemaDiff, TableSchema};

/// Parse both statements, compare them, and return the migration DDL.
///
/// This is the non-interactive core of the tool, useful for embedding.
pub fn diff_sql(source_sql: &str, target_sql: &str) -> Result<Vec<String>> {
    let source = parse(source_sql)?;
    let target = parse(target_sql)?;
    let diff = SchemaDiff::compare(&source, &target);
    let generator = DdlGenerator::new(&diff);
    Ok(generator.generate_sql(&source.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn diff_sql_produces_alter_statements() {
        let source = "CREATE TABLE users (id INT NOT NULL)";
        let target = "CREATE TABLE users (id INT NOT NULL, email VARCHAR(255))";

        let ddls = diff_sql(source, target).unwrap();
        assert_eq!(ddls, vec!["ALTER TABLE users ADD COLUMN email VARCHAR(255)"]);
    }

    #[test]
    fn diff_sql_is_empty_for_identical_tables() {
        let sql = "CREATE TABLE users (id INT NOT NULL)";
        assert!(diff_sql(sql, sql).unwrap().is_empty());
    }
}
