//! DDL generator
//!
//! Turns a [`SchemaDiff`] into ordered `ALTER TABLE` statement bodies and a
//! textual summary. Statements carry no trailing semicolon; callers append it
//! when printing or writing a script.

use crate::schema::diff::SchemaDiff;
use crate::schema::types::{Column, IndexKind};

/// Generates migration DDL from a schema diff
pub struct DdlGenerator<'a> {
    diff: &'a SchemaDiff,
}

impl<'a> DdlGenerator<'a> {
    pub fn new(diff: &'a SchemaDiff) -> Self {
        Self { diff }
    }

    /// Generate `ALTER TABLE` statement bodies in a deterministic order:
    /// added columns, modified columns, removed columns, added indexes,
    /// removed indexes. Removals are emitted as `-- ` comments only; this
    /// tool never produces executable destructive DDL.
    pub fn generate_sql(&self, table_name: &str) -> Vec<String> {
        let mut ddls = Vec::new();

        for col in &self.diff.added_columns {
            ddls.push(format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                table_name,
                col.name,
                format_column_definition(col)
            ));
        }

        // MODIFY carries the full target definition, not a partial patch
        for col_diff in &self.diff.modified_columns {
            ddls.push(format!(
                "ALTER TABLE {} MODIFY COLUMN {} {}",
                table_name,
                col_diff.target.name,
                format_column_definition(&col_diff.target)
            ));
        }

        for col in &self.diff.removed_columns {
            ddls.push(format!(
                "-- ALTER TABLE {} DROP COLUMN {}",
                table_name, col.name
            ));
        }

        for idx in &self.diff.added_indexes {
            let ddl = if idx.kind == IndexKind::Unique {
                format!(
                    "ALTER TABLE {} ADD UNIQUE INDEX {} ({})",
                    table_name,
                    idx.name,
                    idx.columns.join(", ")
                )
            } else {
                format!(
                    "ALTER TABLE {} ADD INDEX {} ({})",
                    table_name,
                    idx.name,
                    idx.columns.join(", ")
                )
            };
            ddls.push(ddl);
        }

        for idx in &self.diff.removed_indexes {
            ddls.push(format!(
                "-- ALTER TABLE {} DROP INDEX {}",
                table_name, idx.name
            ));
        }

        ddls
    }

    /// Fixed-order, human-readable multi-line report of the diff. This text
    /// is also the hand-off artifact for AI analysis.
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        if !self.diff.added_columns.is_empty() {
            summary.push_str(&format!(
                "Added columns: {}\n",
                self.diff.added_columns.len()
            ));
            for col in &self.diff.added_columns {
                summary.push_str(&format!("  + {} {}\n", col.name, col.sql_type));
            }
        }

        if !self.diff.modified_columns.is_empty() {
            summary.push_str(&format!(
                "Modified columns: {}\n",
                self.diff.modified_columns.len()
            ));
            for col_diff in &self.diff.modified_columns {
                summary.push_str(&format!(
                    "  * {}: {}\n",
                    col_diff.name,
                    col_diff.changes.join(", ")
                ));
            }
        }

        if !self.diff.removed_columns.is_empty() {
            summary.push_str(&format!(
                "Removed columns: {}\n",
                self.diff.removed_columns.len()
            ));
            for col in &self.diff.removed_columns {
                summary.push_str(&format!("  - {}\n", col.name));
            }
        }

        if !self.diff.added_indexes.is_empty() {
            summary.push_str(&format!(
                "Added indexes: {}\n",
                self.diff.added_indexes.len()
            ));
            for idx in &self.diff.added_indexes {
                summary.push_str(&format!("  + {} ({})\n", idx.name, idx.columns.join(", ")));
            }
        }

        if !self.diff.removed_indexes.is_empty() {
            summary.push_str(&format!(
                "Removed indexes: {}\n",
                self.diff.removed_indexes.len()
            ));
            for idx in &self.diff.removed_indexes {
                summary.push_str(&format!("  - {}\n", idx.name));
            }
        }

        if summary.is_empty() {
            return "No differences found.".to_string();
        }

        summary
    }
}

/// Render a full column definition in fixed order: type, UNSIGNED, NOT NULL,
/// DEFAULT, AUTO_INCREMENT, COMMENT
pub fn format_column_definition(col: &Column) -> String {
    let mut parts = Vec::new();

    let mut type_str = col.sql_type.clone();
    if !col.length.is_empty() {
        type_str.push_str(&format!("({})", col.length));
    }
    parts.push(type_str);

    if col.unsigned {
        parts.push("UNSIGNED".to_string());
    }

    if col.not_null {
        parts.push("NOT NULL".to_string());
    }

    if !col.default_value.is_empty() {
        if needs_quotes(&col.default_value) {
            parts.push(format!("DEFAULT '{}'", col.default_value));
        } else {
            parts.push(format!("DEFAULT {}", col.default_value));
        }
    }

    if col.auto_inc {
        parts.push("AUTO_INCREMENT".to_string());
    }

    if !col.comment.is_empty() {
        parts.push(format!("COMMENT '{}'", col.comment));
    }

    parts.join(" ")
}

/// Whether a default value must be single-quoted when rendered
fn needs_quotes(value: &str) -> bool {
    if value.starts_with('\'') || value.starts_with('"') {
        return false;
    }

    let upper = value.to_uppercase();
    const KEYWORDS: [&str; 5] = ["NULL", "CURRENT_TIMESTAMP", "NOW()", "TRUE", "FALSE"];
    for kw in KEYWORDS {
        if upper == kw || upper.starts_with(kw) {
            return false;
        }
    }

    value.parse::<f64>().is_err()
}
