//! Mock AI provider for tests

use async_trait::async_trait;

use crate::ai::provider::{AnalysisResult, OptimizationResult, Provider};
use crate::error::Result;

/// Deterministic provider returning canned advice, for tests and demos
pub struct MockProvider;

#[async_trait]
impl Provider for MockProvider {
    async fn analyze(&self, _: &str, _: &str, _: &str) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            summary: "mock analysis: schema changes detected".to_string(),
            suggestions: vec![
                "add an index for the new column to speed up lookups".to_string(),
                "give NOT NULL columns an explicit default".to_string(),
            ],
            risks: vec![
                "adding a column to a large table may lock it".to_string(),
                "changing a column type can lose data".to_string(),
            ],
            best_practices: vec![
                "use an online schema change tool for hot tables".to_string(),
                "verify the change in a staging environment first".to_string(),
            ],
        })
    }

    async fn optimize_sql(&self, sql: &str) -> Result<OptimizationResult> {
        Ok(OptimizationResult {
            original_sql: sql.to_string(),
            optimized_sql: format!("-- optimized:\n{}", sql),
            improvements: vec!["added a covering index".to_string()],
        })
    }

    async fn generate_create_table(&self, _: &str) -> Result<String> {
        Ok("CREATE TABLE mock (id INT PRIMARY KEY)".to_string())
    }

    async fn generate_alter_table(&self, _: &str, _: &str) -> Result<String> {
        Ok("ALTER TABLE mock ADD COLUMN note VARCHAR(255)".to_string())
    }
}
