use super::SqlGenerator;
use async_trait::async_trait;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are a SQL expert. Reply with exactly one executable SQL \
statement and nothing else: no Markdown fences, no comments, no explanation.";

/// OpenAI-compatible chat completions client. `base_url` is configurable so
/// compatible endpoints (DeepSeek and the like) work unchanged.
pub struct OpenAiGenerator {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SqlGenerator for OpenAiGenerator {
    async fn generate(&self, question: &str, schema_context: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let prompt = format!(
            "Database schema:\n{schema_context}\n\nQuestion: \"{question}\"\n\n\
             Return only the SQL statement answering the question."
        );

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0,
        });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("chat completions API error: {}", error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("chat completions response missing content"))?;

        Ok(strip_sql_fences(text))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Models routinely wrap replies in Markdown fences despite instructions;
/// strip them before scoring.
pub fn strip_sql_fences(text: &str) -> String {
    text.trim()
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}
