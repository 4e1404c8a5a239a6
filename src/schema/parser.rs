//! CREATE TABLE parser
//!
//! Parses a single MySQL-flavored `CREATE TABLE` statement into a
//! [`TableSchema`]. The parser is deliberately permissive: unknown tokens are
//! ignored rather than rejected, and no semantic validation is performed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::schema::types::{Column, Index, IndexKind, TableSchema};

static TABLE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?`?([a-zA-Z0-9_]+)`?").unwrap()
});

static PRIMARY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PRIMARY\s+KEY\s*\(([^)]+)\)").unwrap());

static INDEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:INDEX|KEY|UNIQUE|FULLTEXT)\s+(?:INDEX|KEY)?\s*`?([a-zA-Z0-9_]+)`?\s*\(([^)]+)\)")
        .unwrap()
});

static TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)\(([^)]+)\)").unwrap());

static DEFAULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)DEFAULT\s+('([^']*)'|"([^"]*)"|([^\s,]+))"#).unwrap());

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)COMMENT\s+'([^']*)'").unwrap());

static ENGINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ENGINE\s*=\s*([a-zA-Z0-9]+)").unwrap());

static CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:DEFAULT\s+)?CHARSET\s*=\s*([a-zA-Z0-9]+)").unwrap());

static COLLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)COLLATE\s*=\s*([a-zA-Z0-9_]+)").unwrap());

/// Parse a `CREATE TABLE` statement into a [`TableSchema`]
pub fn parse(sql: &str) -> Result<TableSchema> {
    let sql = sql.trim();

    let table_name = extract_table_name(sql)?;
    let mut schema = TableSchema::new(&table_name);

    let body = extract_body(sql)?;

    for clause in split_clauses(body) {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }

        let upper = clause.to_uppercase();

        if upper.starts_with("PRIMARY KEY") {
            schema.primary_keys.extend(extract_primary_keys(clause));
            continue;
        }

        if is_index_clause(&upper) {
            schema.indexes.push(parse_index(clause, &upper));
            continue;
        }

        if let Some(column) = parse_column(clause, &upper) {
            // An inline PRIMARY KEY modifier also contributes to the key set
            if upper.contains("PRIMARY KEY") {
                schema.primary_keys.push(column.name.clone());
            }
            schema.columns.push(column);
        }
    }

    // Table options live after the closing paren, so scan the whole text
    extract_table_options(sql, &mut schema);

    tracing::debug!(
        table = %schema.name,
        columns = schema.columns.len(),
        indexes = schema.indexes.len(),
        "parsed table definition"
    );

    Ok(schema)
}

fn extract_table_name(sql: &str) -> Result<String> {
    TABLE_NAME_RE
        .captures(sql)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::Parse("table name not found".to_string()))
}

/// Slice out the column-definition body between the first `(` and the last
/// `)`. This tolerates trailing table-option text after the closing paren.
fn extract_body(sql: &str) -> Result<&str> {
    let start = sql.find('(');
    let end = sql.rfind(')');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&sql[start + 1..end]),
        _ => Err(Error::Parse("malformed CREATE TABLE statement".to_string())),
    }
}

/// Split the body into top-level clauses at commas outside any nested
/// parentheses, so `DECIMAL(10,2)` and `INDEX idx(a,b)` stay intact.
fn split_clauses(body: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                clauses.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    clauses
}

fn extract_primary_keys(clause: &str) -> Vec<String> {
    let Some(caps) = PRIMARY_KEY_RE.captures(clause) else {
        return Vec::new();
    };

    caps[1]
        .split(',')
        .map(|key| key.trim().trim_matches('`').to_string())
        .collect()
}

fn is_index_clause(upper: &str) -> bool {
    upper.starts_with("INDEX")
        || upper.starts_with("KEY")
        || upper.starts_with("UNIQUE")
        || upper.starts_with("FULLTEXT")
}

fn parse_index(clause: &str, upper: &str) -> Index {
    let kind = if upper.starts_with("UNIQUE") {
        IndexKind::Unique
    } else if upper.starts_with("FULLTEXT") {
        IndexKind::Fulltext
    } else {
        IndexKind::Index
    };

    // Name and column list are optional; an unparsable clause still yields
    // an index entry with an empty name.
    let mut index = Index::new("", Vec::new(), kind);
    if let Some(caps) = INDEX_RE.captures(clause) {
        index.name = caps[1].to_string();
        index.columns = caps[2]
            .split(',')
            .map(|col| col.trim().trim_matches('`').to_string())
            .collect();
    }

    index
}

/// Parse one column clause. Clauses with fewer than two whitespace tokens are
/// unparsable and silently dropped.
fn parse_column(clause: &str, upper: &str) -> Option<Column> {
    let mut parts = clause.split_whitespace();
    let name = parts.next()?.trim_matches('`');
    let type_token = parts.next()?;

    let mut column = Column::new(name, "");

    if type_token.contains('(') {
        if let Some(caps) = TYPE_RE.captures(&type_token.to_uppercase()) {
            column.sql_type = caps[1].to_string();
            column.length = caps[2].to_string();
        }
    } else {
        column.sql_type = type_token.to_uppercase();
    }

    // Flag detection is order-independent substring search over the clause
    column.not_null = upper.contains("NOT NULL");
    column.auto_inc = upper.contains("AUTO_INCREMENT");
    column.unsigned = upper.contains("UNSIGNED");

    if let Some(caps) = DEFAULT_RE.captures(clause) {
        // First non-empty alternative wins: single-quoted, double-quoted,
        // then a bare token
        for group in 2..=4 {
            if let Some(value) = caps.get(group) {
                if !value.as_str().is_empty() {
                    column.default_value = value.as_str().to_string();
                    break;
                }
            }
        }
    }

    if let Some(caps) = COMMENT_RE.captures(clause) {
        column.comment = caps[1].to_string();
    }

    Some(column)
}

fn extract_table_options(sql: &str, schema: &mut TableSchema) {
    if let Some(caps) = ENGINE_RE.captures(sql) {
        schema.options.insert("ENGINE".to_string(), caps[1].to_string());
    }
    if let Some(caps) = CHARSET_RE.captures(sql) {
        schema.options.insert("CHARSET".to_string(), caps[1].to_string());
    }
    if let Some(caps) = COLLATE_RE.captures(sql) {
        schema.options.insert("COLLATE".to_string(), caps[1].to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_simple_table() {
        let sql = r#"CREATE TABLE users (
            id INT PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(255),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )"#;

        let schema = parse(sql).unwrap();

        assert_eq!(schema.name, "users");
        assert_eq!(schema.columns.len(), 4);
        assert_eq!(schema.columns[0].name, "id");
        assert_eq!(schema.columns[0].sql_type, "INT");
        assert_eq!(schema.primary_keys, vec!["id"]);
        assert!(schema.columns[1].not_null);
        assert_eq!(schema.columns[1].length, "100");
        assert_eq!(schema.columns[3].default_value, "CURRENT_TIMESTAMP");
    }

    #[test]
    fn parses_table_with_indexes() {
        let sql = r#"CREATE TABLE products (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(200) NOT NULL,
            price DECIMAL(10,2),
            INDEX idx_name (name),
            UNIQUE INDEX idx_price (price)
        )"#;

        let schema = parse(sql).unwrap();

        assert_eq!(schema.indexes.len(), 2);
        assert_eq!(schema.indexes[0].name, "idx_name");
        assert_eq!(schema.indexes[0].kind, IndexKind::Index);
        assert_eq!(schema.indexes[1].name, "idx_price");
        assert_eq!(schema.indexes[1].kind, IndexKind::Unique);
        // DECIMAL(10,2) must not be split at its inner comma
        assert_eq!(schema.columns[2].sql_type, "DECIMAL");
        assert_eq!(schema.columns[2].length, "10,2");
    }

    #[test]
    fn parses_complex_table_with_options() {
        let sql = r#"CREATE TABLE orders (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            user_id INT NOT NULL,
            total_amount DECIMAL(12,2) DEFAULT 0.00,
            status VARCHAR(20) DEFAULT 'pending' NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
            INDEX idx_user_id (user_id),
            INDEX idx_status (status),
            INDEX idx_created (created_at)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"#;

        let schema = parse(sql).unwrap();

        assert_eq!(schema.name, "orders");
        assert_eq!(schema.columns.len(), 6);
        assert_eq!(schema.indexes.len(), 3);
        assert!(schema.columns[0].unsigned);
        assert!(schema.columns[0].auto_inc);
        assert_eq!(schema.columns[3].default_value, "pending");
        assert_eq!(schema.options["ENGINE"], "InnoDB");
        assert_eq!(schema.options["CHARSET"], "utf8mb4");
        assert_eq!(schema.options["COLLATE"], "utf8mb4_unicode_ci");
    }

    #[test]
    fn parses_backticked_name_with_if_not_exists() {
        let sql = "create table if not exists `audit_log` (id INT, payload TEXT)";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.name, "audit_log");
        assert_eq!(schema.columns.len(), 2);
    }

    #[test]
    fn parses_explicit_primary_key_clause() {
        let sql = "CREATE TABLE t (a INT, b INT, PRIMARY KEY (`a`, b))";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.primary_keys, vec!["a", "b"]);
    }

    #[test]
    fn parses_column_comment() {
        let sql = "CREATE TABLE t (status TINYINT DEFAULT 1 COMMENT 'order status')";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.columns[0].comment, "order status");
        assert_eq!(schema.columns[0].default_value, "1");
    }

    #[test]
    fn parses_double_quoted_default() {
        let sql = r#"CREATE TABLE t (state VARCHAR(10) DEFAULT "open")"#;
        let schema = parse(sql).unwrap();
        assert_eq!(schema.columns[0].default_value, "open");
    }

    #[test]
    fn key_clause_is_an_index() {
        let sql = "CREATE TABLE t (a INT, KEY idx_a (a))";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.indexes.len(), 1);
        assert_eq!(schema.indexes[0].name, "idx_a");
        assert_eq!(schema.indexes[0].columns, vec!["a"]);
    }

    #[test]
    fn fulltext_index_kind() {
        let sql = "CREATE TABLE t (body TEXT, FULLTEXT idx_body (body))";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.indexes[0].kind, IndexKind::Fulltext);
    }

    #[test]
    fn drops_clauses_with_a_single_token() {
        let sql = "CREATE TABLE t (a INT, b)";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.columns.len(), 1);
    }

    #[test]
    fn duplicate_columns_are_preserved_positionally() {
        let sql = "CREATE TABLE t (a INT, a BIGINT)";
        let schema = parse(sql).unwrap();
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].sql_type, "INT");
        assert_eq!(schema.columns[1].sql_type, "BIGINT");
    }

    #[test]
    fn missing_table_name_is_an_error() {
        let err = parse("SELECT * FROM users").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_body_is_an_error() {
        let err = parse("CREATE TABLE users").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn inverted_delimiters_are_an_error() {
        let err = parse("CREATE TABLE users ) id INT (").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
