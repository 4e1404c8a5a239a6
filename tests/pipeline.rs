//! End-to-end pipeline tests: parse, diff, generate

use pretty_assertions::assert_eq;
use rstest::rstest;

use sql_diff::schema::generator::format_column_definition;
use sql_diff::{diff_sql, parse, DdlGenerator, SchemaDiff};

const USERS_V1: &str = "CREATE TABLE users (\n  id INT PRIMARY KEY,\n  name VARCHAR(100)\n)";
const USERS_V2: &str = "CREATE TABLE users (\n  id INT PRIMARY KEY,\n  name VARCHAR(100),\n  email VARCHAR(255),\n  created_at TIMESTAMP\n)";

#[test]
fn added_columns_produce_add_column_statements_only() {
    let source = parse(USERS_V1).unwrap();
    let target = parse(USERS_V2).unwrap();

    let diff = SchemaDiff::compare(&source, &target);
    assert_eq!(diff.added_columns.len(), 2);

    let ddls = DdlGenerator::new(&diff).generate_sql(&source.name);
    assert_eq!(
        ddls,
        vec![
            "ALTER TABLE users ADD COLUMN email VARCHAR(255)",
            "ALTER TABLE users ADD COLUMN created_at TIMESTAMP",
        ]
    );
}

#[test]
fn modified_column_reports_length_and_not_null() {
    let source = parse("CREATE TABLE users (id INT, name VARCHAR(100))").unwrap();
    let target =
        parse("CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(200) NOT NULL)").unwrap();

    let diff = SchemaDiff::compare(&source, &target);

    assert_eq!(diff.modified_columns.len(), 1);
    let col_diff = &diff.modified_columns[0];
    assert_eq!(col_diff.name, "name");
    assert!(col_diff
        .changes
        .iter()
        .any(|c| c == "length changed from 100 to 200"));
    assert!(col_diff
        .changes
        .iter()
        .any(|c| c == "added NOT NULL constraint"));

    let ddls = DdlGenerator::new(&diff).generate_sql("users");
    assert_eq!(
        ddls,
        vec!["ALTER TABLE users MODIFY COLUMN name VARCHAR(200) NOT NULL"]
    );
}

#[test]
fn added_index_appears_in_generated_ddl() {
    let ddls = diff_sql(
        "CREATE TABLE products (id INT, name VARCHAR(200))",
        "CREATE TABLE products (id INT, name VARCHAR(200), INDEX idx_name (name))",
    )
    .unwrap();

    assert_eq!(ddls, vec!["ALTER TABLE products ADD INDEX idx_name (name)"]);
}

#[rstest]
#[case(USERS_V1)]
#[case(USERS_V2)]
#[case("CREATE TABLE `orders` (id BIGINT UNSIGNED AUTO_INCREMENT, PRIMARY KEY (id)) ENGINE=InnoDB")]
fn comparing_a_schema_with_itself_is_a_no_op(#[case] sql: &str) {
    let schema = parse(sql).unwrap();
    let diff = SchemaDiff::compare(&schema, &schema);

    assert!(!diff.has_changes());
    assert!(DdlGenerator::new(&diff).generate_sql(&schema.name).is_empty());
    assert_eq!(DdlGenerator::new(&diff).summary(), "No differences found.");
}

#[test]
fn default_value_quoting_in_rendered_definitions() {
    let schema = parse(
        "CREATE TABLE t (\n  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n  status VARCHAR(20) DEFAULT 'pending'\n)",
    )
    .unwrap();

    assert_eq!(
        format_column_definition(&schema.columns[0]),
        "TIMESTAMP DEFAULT CURRENT_TIMESTAMP"
    );
    assert_eq!(
        format_column_definition(&schema.columns[1]),
        "VARCHAR(20) DEFAULT 'pending'"
    );
}

#[test]
fn removals_never_produce_executable_drops() {
    let ddls = diff_sql(
        "CREATE TABLE t (a INT, b INT, c VARCHAR(50), INDEX idx_c (c))",
        "CREATE TABLE t (a INT)",
    )
    .unwrap();

    assert_eq!(
        ddls,
        vec![
            "-- ALTER TABLE t DROP COLUMN b",
            "-- ALTER TABLE t DROP COLUMN c",
            "-- ALTER TABLE t DROP INDEX idx_c",
        ]
    );
}

#[test]
fn mixed_changes_keep_category_order() {
    let ddls = diff_sql(
        "CREATE TABLE t (a INT, b INT, INDEX idx_b (b))",
        "CREATE TABLE t (a BIGINT, c INT, UNIQUE INDEX uq_c (c))",
    )
    .unwrap();

    assert_eq!(
        ddls,
        vec![
            "ALTER TABLE t ADD COLUMN c INT",
            "ALTER TABLE t MODIFY COLUMN a BIGINT",
            "-- ALTER TABLE t DROP COLUMN b",
            "ALTER TABLE t ADD UNIQUE INDEX uq_c (c)",
            "-- ALTER TABLE t DROP INDEX idx_b",
        ]
    );
}

#[test]
fn parse_failure_stops_the_pipeline() {
    let result = diff_sql("not a create table", USERS_V1);
    assert!(result.is_err());
}

#[test]
fn realistic_table_evolution() {
    let source = "CREATE TABLE `orders` (
  `id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
  `user_id` INT NOT NULL,
  `status` VARCHAR(10) NOT NULL DEFAULT 'new',
  `total` DECIMAL(10,2) NOT NULL DEFAULT 0.00,
  PRIMARY KEY (`id`),
  INDEX `idx_user` (`user_id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

    let target = "CREATE TABLE `orders` (
  `id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
  `user_id` INT NOT NULL,
  `status` VARCHAR(20) NOT NULL DEFAULT 'pending' COMMENT 'order state',
  `total` DECIMAL(10,2) NOT NULL DEFAULT 0.00,
  `updated_at` TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  INDEX `idx_user` (`user_id`),
  INDEX `idx_status` (`status`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

    let ddls = diff_sql(source, target).unwrap();

    assert_eq!(
        ddls,
        vec![
            "ALTER TABLE orders ADD COLUMN updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
            "ALTER TABLE orders MODIFY COLUMN status VARCHAR(20) NOT NULL DEFAULT 'pending' COMMENT 'order state'",
            "ALTER TABLE orders ADD INDEX idx_status (status)",
        ]
    );
}
