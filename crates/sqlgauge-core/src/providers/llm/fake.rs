use super::SqlGenerator;
use async_trait::async_trait;
use std::collections::HashMap;

/// Canned in-memory generator for tests.
pub struct FakeGenerator {
    responses: HashMap<String, String>,
    fallback: Option<String>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fallback: None,
        }
    }

    pub fn respond(mut self, question: &str, sql: &str) -> Self {
        self.responses.insert(question.to_string(), sql.to_string());
        self
    }

    /// Returned for any question without a canned response; without one,
    /// unknown questions are generator failures.
    pub fn fallback(mut self, sql: &str) -> Self {
        self.fallback = Some(sql.to_string());
        self
    }
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SqlGenerator for FakeGenerator {
    async fn generate(&self, question: &str, _schema_context: &str) -> anyhow::Result<String> {
        if let Some(sql) = self.responses.get(question) {
            return Ok(sql.clone());
        }
        match &self.fallback {
            Some(sql) => Ok(sql.clone()),
            None => anyhow::bail!("fake generator has no response for: {question}"),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
