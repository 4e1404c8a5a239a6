//! Schema difference calculator
//!
//! Compares a source table schema against a target table schema and records
//! added, removed, and modified columns plus added and removed indexes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::types::{Column, Index, TableSchema};

/// Structural difference between two table schemas.
///
/// Fully determined by the two inputs and never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Columns present in target but not source, in target declaration order
    pub added_columns: Vec<Column>,
    /// Columns present in source but not target, in source declaration order
    pub removed_columns: Vec<Column>,
    /// Columns present on both sides whose attributes differ, in target order
    pub modified_columns: Vec<ColumnDiff>,
    /// Indexes keyed by name only; a changed column list under an unchanged
    /// name is not detected
    pub added_indexes: Vec<Index>,
    pub removed_indexes: Vec<Index>,
}

/// Attribute-level difference for a column present in both schemas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDiff {
    pub name: String,
    pub source: Column,
    pub target: Column,
    /// Human-readable change descriptions; non-empty by construction
    pub changes: Vec<String>,
}

impl SchemaDiff {
    /// Compare two schemas. Total over well-formed inputs.
    pub fn compare(source: &TableSchema, target: &TableSchema) -> Self {
        // Name-keyed lookups; on duplicate names the last declaration wins
        let source_columns: HashMap<&str, &Column> = source
            .columns
            .iter()
            .map(|col| (col.name.as_str(), col))
            .collect();
        let target_columns: HashMap<&str, &Column> = target
            .columns
            .iter()
            .map(|col| (col.name.as_str(), col))
            .collect();

        let mut added_columns = Vec::new();
        let mut modified_columns = Vec::new();

        for target_col in &target.columns {
            match source_columns.get(target_col.name.as_str()) {
                Some(source_col) => {
                    let changes = compare_columns(source_col, target_col);
                    if !changes.is_empty() {
                        modified_columns.push(ColumnDiff {
                            name: target_col.name.clone(),
                            source: (*source_col).clone(),
                            target: target_col.clone(),
                            changes,
                        });
                    }
                }
                None => added_columns.push(target_col.clone()),
            }
        }

        let removed_columns = source
            .columns
            .iter()
            .filter(|col| !target_columns.contains_key(col.name.as_str()))
            .cloned()
            .collect();

        let source_indexes: HashMap<&str, &Index> = source
            .indexes
            .iter()
            .map(|idx| (idx.name.as_str(), idx))
            .collect();
        let target_indexes: HashMap<&str, &Index> = target
            .indexes
            .iter()
            .map(|idx| (idx.name.as_str(), idx))
            .collect();

        let added_indexes = target
            .indexes
            .iter()
            .filter(|idx| !source_indexes.contains_key(idx.name.as_str()))
            .cloned()
            .collect();
        let removed_indexes = source
            .indexes
            .iter()
            .filter(|idx| !target_indexes.contains_key(idx.name.as_str()))
            .cloned()
            .collect();

        Self {
            added_columns,
            removed_columns,
            modified_columns,
            added_indexes,
            removed_indexes,
        }
    }

    /// True when at least one of the five collections is non-empty
    pub fn has_changes(&self) -> bool {
        !self.added_columns.is_empty()
            || !self.removed_columns.is_empty()
            || !self.modified_columns.is_empty()
            || !self.added_indexes.is_empty()
            || !self.removed_indexes.is_empty()
    }
}

/// Compare two columns attribute by attribute, in a fixed order
fn compare_columns(source: &Column, target: &Column) -> Vec<String> {
    let mut changes = Vec::new();

    if source.sql_type != target.sql_type {
        changes.push(format!(
            "type changed from {} to {}",
            source.sql_type, target.sql_type
        ));
    }

    if source.length != target.length {
        changes.push(format!(
            "length changed from {} to {}",
            source.length, target.length
        ));
    }

    if source.not_null != target.not_null {
        if target.not_null {
            changes.push("added NOT NULL constraint".to_string());
        } else {
            changes.push("removed NOT NULL constraint".to_string());
        }
    }

    if source.default_value != target.default_value {
        changes.push(format!(
            "default changed from {} to {}",
            source.default_value, target.default_value
        ));
    }

    if source.auto_inc != target.auto_inc {
        if target.auto_inc {
            changes.push("added AUTO_INCREMENT".to_string());
        } else {
            changes.push("removed AUTO_INCREMENT".to_string());
        }
    }

    if source.unsigned != target.unsigned {
        if target.unsigned {
            changes.push("added UNSIGNED".to_string());
        } else {
            changes.push("removed UNSIGNED".to_string());
        }
    }

    if source.comment != target.comment {
        changes.push(format!(
            "comment changed from '{}' to '{}'",
            source.comment, target.comment
        ));
    }

    changes
}
