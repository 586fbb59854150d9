use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::types::KbAnswer;

/// Seam to the external retrieve-and-generate capability.
///
/// Production uses the Bedrock HTTP client; tests swap in the generated
/// mock to assert the backend is never touched on a config short-circuit.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RetrieveAndGenerate: Send + Sync {
    /// Answer one question against the given knowledge base and model
    async fn retrieve_and_generate(
        &self,
        question: &str,
        kb_id: &str,
        model_arn: &str,
    ) -> Result<KbAnswer>;
}
