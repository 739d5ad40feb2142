use super::SqlGenerator;
use anyhow::Context;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Serves candidates from a recorded `{question -> sql}` JSON map, making
/// runs fully offline and deterministic. A question with no recorded
/// prediction is a generator failure and scores as non-executable.
pub struct ReplayGenerator {
    predictions: HashMap<String, String>,
}

impl ReplayGenerator {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read predictions {}", path.display()))?;
        let predictions: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse predictions {}", path.display()))?;
        Ok(Self { predictions })
    }

    pub fn from_map(predictions: HashMap<String, String>) -> Self {
        Self { predictions }
    }
}

#[async_trait]
impl SqlGenerator for ReplayGenerator {
    async fn generate(&self, question: &str, _schema_context: &str) -> anyhow::Result<String> {
        self.predictions
            .get(question)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no recorded prediction for question: {question}"))
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }
}
