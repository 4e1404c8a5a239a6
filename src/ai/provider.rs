//! AI provider abstraction
//!
//! Providers analyze schema diffs and generate DDL from natural-language
//! descriptions via an OpenAI-compatible chat-completions API. The schema
//! pipeline never depends on this module; AI output is presentation only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::{Error, Result};

/// AI provider interface
#[async_trait]
pub trait Provider: Send + Sync {
    /// Analyze a schema diff and return structured advice
    async fn analyze(
        &self,
        source_ddl: &str,
        target_ddl: &str,
        diff_summary: &str,
    ) -> Result<AnalysisResult>;

    /// Suggest an optimized version of a DDL statement
    async fn optimize_sql(&self, sql: &str) -> Result<OptimizationResult>;

    /// Generate a CREATE TABLE statement from a natural-language description
    async fn generate_create_table(&self, description: &str) -> Result<String>;

    /// Generate ALTER TABLE statements from an existing definition and a
    /// natural-language change description
    async fn generate_alter_table(&self, current_ddl: &str, description: &str) -> Result<String>;
}

/// Structured result of a diff analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub risks: Vec<String>,
    pub best_practices: Vec<String>,
}

/// Result of an SQL optimization request
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub original_sql: String,
    pub optimized_sql: String,
    pub improvements: Vec<String>,
}

/// Create a provider from configuration. Disabled AI yields a no-op provider
/// so callers need no special casing.
pub fn new_provider(config: &AiConfig) -> Result<Box<dyn Provider>> {
    if !config.enabled {
        return Ok(Box::new(NoOpProvider));
    }

    match config.provider.as_str() {
        // DeepSeek and OpenAI expose the same chat-completions API
        "deepseek" | "openai" => Ok(Box::new(ChatProvider::new(config)?)),
        other => Err(Error::Config(format!("unsupported AI provider: {}", other))),
    }
}

/// Provider used when AI is disabled
pub struct NoOpProvider;

#[async_trait]
impl Provider for NoOpProvider {
    async fn analyze(&self, _: &str, _: &str, _: &str) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            summary: "AI analysis is not enabled".to_string(),
            ..Default::default()
        })
    }

    async fn optimize_sql(&self, sql: &str) -> Result<OptimizationResult> {
        Ok(OptimizationResult {
            original_sql: sql.to_string(),
            optimized_sql: sql.to_string(),
            improvements: Vec::new(),
        })
    }

    async fn generate_create_table(&self, _: &str) -> Result<String> {
        Err(Error::Ai(
            "AI is not enabled; cannot generate CREATE TABLE".to_string(),
        ))
    }

    async fn generate_alter_table(&self, _: &str, _: &str) -> Result<String> {
        Err(Error::Ai(
            "AI is not enabled; cannot generate ALTER TABLE".to_string(),
        ))
    }
}

/// OpenAI-compatible chat-completions provider (DeepSeek, OpenAI)
pub struct ChatProvider {
    config: AiConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

const SYSTEM_PROMPT: &str =
    "You are a senior database architect and SQL expert specializing in table design and optimization.";

impl ChatProvider {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        };

        let endpoint = format!("{}/chat/completions", self.config.api_endpoint);
        tracing::debug!(endpoint = %endpoint, model = %self.config.model, "sending chat request");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Ai(format!("API returned {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response.json().await?;
        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Ai("API returned an empty response".to_string()))
    }
}

#[async_trait]
impl Provider for ChatProvider {
    async fn analyze(
        &self,
        source_ddl: &str,
        target_ddl: &str,
        diff_summary: &str,
    ) -> Result<AnalysisResult> {
        let prompt = format!(
            "Analyze the differences between these two MySQL table definitions \
             and provide professional advice.\n\n\
             [Source table]\n{}\n\n\
             [Target table]\n{}\n\n\
             [Detected differences]\n{}\n\n\
             Answer in Markdown using exactly these sections:\n\n\
             ## Analysis\n[brief summary of the main differences]\n\n\
             ## Suggestions\n- [suggestion]\n\n\
             ## Risks\n- [risk]\n\n\
             ## Best Practices\n- [practice]\n\n\
             Keep advice concrete and actionable.",
            source_ddl, target_ddl, diff_summary
        );

        let response = self.chat(&prompt).await?;
        Ok(parse_analysis_response(&response))
    }

    async fn optimize_sql(&self, sql: &str) -> Result<OptimizationResult> {
        let prompt = format!(
            "Optimize the following SQL DDL statement to better follow best \
             practices. Return the optimized SQL and explain the improvements.\n\n{}",
            sql
        );

        let response = self.chat(&prompt).await?;
        Ok(OptimizationResult {
            original_sql: sql.to_string(),
            optimized_sql: response,
            improvements: vec!["see the AI suggestions above".to_string()],
        })
    }

    async fn generate_create_table(&self, description: &str) -> Result<String> {
        let prompt = format!(
            "Generate a standard MySQL CREATE TABLE statement from the \
             following description.\n\n\
             Requirements:\n{}\n\n\
             Rules:\n\
             1. Return a complete, directly executable statement\n\
             2. Choose sensible column types (VARCHAR with lengths, DECIMAL for money)\n\
             3. Include primary keys, indexes, defaults and comments\n\
             4. Follow MySQL best practices (InnoDB, utf8mb4)\n\
             5. Use snake_case identifiers\n\
             6. Return only the SQL, no explanations",
            description
        );

        let response = self.chat(&prompt).await?;
        Ok(clean_sql_response(&response))
    }

    async fn generate_alter_table(&self, current_ddl: &str, description: &str) -> Result<String> {
        let prompt = format!(
            "Generate MySQL ALTER TABLE statements for the requested change.\n\n\
             [Current table]\n{}\n\n\
             [Requested change]\n{}\n\n\
             Rules:\n\
             1. Return complete, directly executable statements, one per line\n\
             2. Keep the change safe for existing data\n\
             3. Follow MySQL best practices\n\
             4. Return only the SQL, no explanations, no trailing semicolons",
            current_ddl, description
        );

        let response = self.chat(&prompt).await?;
        Ok(clean_sql_response(&response))
    }
}

/// Parse a markdown analysis reply into sections. Falls back to treating the
/// whole reply as the summary when no structure is found.
pub(crate) fn parse_analysis_response(response: &str) -> AnalysisResult {
    #[derive(PartialEq)]
    enum Section {
        None,
        Summary,
        Suggestions,
        Risks,
        BestPractices,
    }

    let mut result = AnalysisResult::default();
    let mut section = Section::None;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("##") {
            let heading = line.to_lowercase();
            section = if heading.contains("analysis") || heading.contains("summary") {
                Section::Summary
            } else if heading.contains("suggestion") {
                Section::Suggestions
            } else if heading.contains("risk") {
                Section::Risks
            } else if heading.contains("best practice") {
                Section::BestPractices
            } else {
                Section::None
            };
            continue;
        }

        let bullet = line
            .strip_prefix('-')
            .or_else(|| line.strip_prefix('*'))
            .map(str::trim);

        match section {
            Section::Summary if !line.starts_with('#') => {
                if result.summary.is_empty() {
                    result.summary = line.to_string();
                } else {
                    result.summary.push('\n');
                    result.summary.push_str(line);
                }
            }
            Section::Suggestions => {
                if let Some(item) = bullet {
                    result.suggestions.push(item.to_string());
                }
            }
            Section::Risks => {
                if let Some(item) = bullet {
                    result.risks.push(item.to_string());
                }
            }
            Section::BestPractices => {
                if let Some(item) = bullet {
                    result.best_practices.push(item.to_string());
                }
            }
            _ => {}
        }
    }

    if result.summary.is_empty() && result.suggestions.is_empty() {
        result.summary = response.to_string();
    }

    result
}

/// Strip code fences and surrounding prose from an AI SQL reply, keeping the
/// first CREATE/ALTER statement and dropping its trailing semicolon.
pub(crate) fn clean_sql_response(response: &str) -> String {
    let response = response
        .replace("```sql", "")
        .replace("```mysql", "")
        .replace("```", "");
    let response = response.trim();

    let mut sql_lines = Vec::new();
    let mut in_sql = false;

    for line in response.lines() {
        let upper = line.trim().to_uppercase();
        if upper.starts_with("CREATE TABLE") || upper.starts_with("ALTER TABLE") {
            in_sql = true;
        }
        if in_sql {
            sql_lines.push(line);
            if line.trim().ends_with(';') {
                break;
            }
        }
    }

    let sql = if sql_lines.is_empty() {
        response.to_string()
    } else {
        sql_lines.join("\n")
    };

    sql.trim().trim_end_matches(';').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_structured_analysis() {
        let response = "\
## Analysis
The target adds an email column and a covering index.

## Suggestions
- Add a NOT NULL constraint with a default
* Consider a prefix index on email

## Risks
- Adding a column to a large table can lock it

## Best Practices
- Run the change during a low-traffic window
";

        let result = parse_analysis_response(response);

        assert_eq!(
            result.summary,
            "The target adds an email column and a covering index."
        );
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[1], "Consider a prefix index on email");
        assert_eq!(result.risks, vec!["Adding a column to a large table can lock it"]);
        assert_eq!(result.best_practices.len(), 1);
    }

    #[test]
    fn unstructured_reply_becomes_summary() {
        let result = parse_analysis_response("The schemas are nearly identical.");
        assert_eq!(result.summary, "The schemas are nearly identical.");
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn multiline_summary_is_joined() {
        let response = "## Analysis\nLine one.\nLine two.\n";
        let result = parse_analysis_response(response);
        assert_eq!(result.summary, "Line one.\nLine two.");
    }

    #[test]
    fn cleans_fenced_sql_reply() {
        let response = "\
Here is the table you asked for:

```sql
CREATE TABLE users (
  id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
  name VARCHAR(100) NOT NULL
) ENGINE=InnoDB;
```

Let me know if you need anything else.";

        let sql = clean_sql_response(response);

        assert!(sql.starts_with("CREATE TABLE users"));
        assert!(sql.ends_with("ENGINE=InnoDB"));
        assert!(!sql.contains("```"));
        assert!(!sql.contains("Let me know"));
    }

    #[test]
    fn keeps_plain_sql_untouched() {
        let sql = clean_sql_response("ALTER TABLE users ADD COLUMN phone VARCHAR(20)");
        assert_eq!(sql, "ALTER TABLE users ADD COLUMN phone VARCHAR(20)");
    }

    #[tokio::test]
    async fn noop_provider_degrades_gracefully() {
        let provider = NoOpProvider;

        let analysis = provider.analyze("", "", "").await.unwrap();
        assert_eq!(analysis.summary, "AI analysis is not enabled");

        let err = provider.generate_create_table("a users table").await;
        assert!(err.is_err());
    }

    #[test]
    fn disabled_config_yields_noop() {
        let config = crate::config::AiConfig::default();
        assert!(new_provider(&config).is_ok());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = crate::config::AiConfig {
            enabled: true,
            provider: "crystal-ball".to_string(),
            ..Default::default()
        };
        assert!(new_provider(&config).is_err());
    }
}
