//! Type definitions for parsed table schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents one parsed `CREATE TABLE` definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    /// Columns in declaration order. Duplicate names are preserved
    /// positionally; the differ resolves them last-wins.
    pub columns: Vec<Column>,
    /// Column names covered by the primary key, from both an explicit
    /// `PRIMARY KEY(...)` clause and inline column modifiers.
    pub primary_keys: Vec<String>,
    pub indexes: Vec<Index>,
    /// Table-level options (`ENGINE`, `CHARSET`, `COLLATE`) in the order
    /// they were found.
    pub options: IndexMap<String, String>,
}

impl TableSchema {
    /// Create a new empty schema for the given table name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
            indexes: Vec::new(),
            options: IndexMap::new(),
        }
    }
}

/// Represents one column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Uppercased base type keyword, e.g. `VARCHAR`
    pub sql_type: String,
    /// Raw parenthesized type parameters, e.g. `10,2`; empty if none
    pub length: String,
    pub not_null: bool,
    /// Default value exactly as captured from the source text, no coercion
    pub default_value: String,
    pub auto_inc: bool,
    pub unsigned: bool,
    pub comment: String,
}

impl Column {
    /// Create a new column with the given name and type keyword
    pub fn new(name: &str, sql_type: &str) -> Self {
        Self {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            length: String::new(),
            not_null: false,
            default_value: String::new(),
            auto_inc: false,
            unsigned: false,
            comment: String::new(),
        }
    }

    /// Set the parenthesized type parameters
    pub fn length(mut self, length: &str) -> Self {
        self.length = length.to_string();
        self
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    /// Set a default value for the column
    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = value.to_string();
        self
    }
}

/// Kind of an index definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    Index,
    Unique,
    Fulltext,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Index => write!(f, "INDEX"),
            IndexKind::Unique => write!(f, "UNIQUE"),
            IndexKind::Fulltext => write!(f, "FULLTEXT"),
        }
    }
}

/// Represents one index definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name; empty when the clause could not be fully parsed
    pub name: String,
    pub columns: Vec<String>,
    pub kind: IndexKind,
}

impl Index {
    pub fn new(name: &str, columns: Vec<String>, kind: IndexKind) -> Self {
        Self {
            name: name.to_string(),
            columns,
            kind,
        }
    }
}
