use async_trait::async_trait;

/// The natural-language-to-SQL generator collaborator. Opaque to the
/// harness; may fail or time out, and failures surface in the verdict as a
/// non-executable candidate, never as a run-level error.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, question: &str, schema_context: &str) -> anyhow::Result<String>;
    fn provider_name(&self) -> &'static str;
}

pub mod fake;
pub mod openai;
pub mod replay;
