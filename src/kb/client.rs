use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::RetrieveAndGenerate;
use super::types::{KbAnswer, RetrieveAndGenerateRequest, RetrieveAndGenerateResponse};
use crate::app::Config;
use crate::constants::HTTP_REQUEST_TIMEOUT_SECS;

/// HTTP client for the Bedrock agent-runtime retrieve-and-generate API.
///
/// Credential management stays with the platform: a Bedrock API key found
/// in `AWS_BEARER_TOKEN_BEDROCK` is sent as a bearer header, otherwise the
/// request goes out unauthenticated (e.g. through a gateway that signs it).
pub struct BedrockKbClient {
    client: Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl BedrockKbClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://bedrock-agent-runtime.{}.amazonaws.com",
                config.region
            )
        });

        let bearer_token = std::env::var("AWS_BEARER_TOKEN_BEDROCK").ok();

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
                .build()?,
            endpoint,
            bearer_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RetrieveAndGenerate for BedrockKbClient {
    async fn retrieve_and_generate(
        &self,
        question: &str,
        kb_id: &str,
        model_arn: &str,
    ) -> Result<KbAnswer> {
        let url = format!("{}/retrieveAndGenerate", self.endpoint);
        let body = RetrieveAndGenerateRequest::new(question, kb_id, model_arn);

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.with_context(|| {
            format!("Failed to reach Bedrock agent runtime at {}", self.endpoint)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Bedrock returned {}: {}", status, error_text);
        }

        let parsed: RetrieveAndGenerateResponse = response
            .json()
            .await
            .context("Malformed retrieve-and-generate response")?;

        debug!("KB answered with {} chars", parsed.output.text.len());

        Ok(KbAnswer {
            text: parsed.output.text,
            session_id: parsed.session_id,
        })
    }
}
