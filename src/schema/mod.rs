//! Schema pipeline: parse, diff, generate
//!
//! The three stages are pure functions over immutable value types; the whole
//! pipeline is stateless and re-entrant.

pub mod diff;
pub mod generator;
pub mod parser;
pub mod types;

// Re-export key types
pub use diff::{ColumnDiff, SchemaDiff};
pub use generator::DdlGenerator;
pub use parser::parse;
pub use types::{Column, Index, IndexKind, TableSchema};
