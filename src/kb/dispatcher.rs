use std::sync::Arc;
use tracing::{debug, error, warn};

use super::traits::RetrieveAndGenerate;
use crate::app::Config;
use crate::utils::QueryError;

/// Validates configuration, issues one retrieve-and-generate call and folds
/// every failure into a displayable error. Nothing escapes this boundary.
pub struct QueryDispatcher {
    backend: Arc<dyn RetrieveAndGenerate>,
    kb_id: String,
    model_arn: String,
}

impl QueryDispatcher {
    pub fn new(backend: Arc<dyn RetrieveAndGenerate>, config: &Config) -> Self {
        Self {
            backend,
            kb_id: config.kb_id.clone(),
            model_arn: config.model_arn.clone(),
        }
    }

    /// Answer one question. The `Err` values render as the user-visible
    /// error strings; the backend is not touched when an identifier is
    /// missing.
    pub async fn dispatch(&self, question: &str) -> Result<String, QueryError> {
        debug!(
            "dispatch called with kb_id={}, model_arn={}, question='{}'",
            self.kb_id, self.model_arn, question
        );

        if self.kb_id.is_empty() || self.model_arn.is_empty() {
            warn!("BEDROCK_KB_ID or MODEL_ARN not configured, refusing to dispatch");
            return Err(QueryError::MissingConfig);
        }

        match self
            .backend
            .retrieve_and_generate(question, &self.kb_id, &self.model_arn)
            .await
        {
            Ok(answer) => {
                if let Some(session_id) = &answer.session_id {
                    debug!("retrieve-and-generate session {}", session_id);
                }
                Ok(answer.text)
            }
            Err(e) => {
                error!("Error during retrieve_and_generate: {}", e);
                Err(QueryError::Service(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{KbAnswer, MockRetrieveAndGenerate};
    use pretty_assertions::assert_eq;

    fn config(kb_id: &str, model_arn: &str) -> Config {
        Config {
            kb_id: kb_id.to_string(),
            model_arn: model_arn.to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn missing_kb_id_short_circuits_without_calling_the_backend() {
        let mut backend = MockRetrieveAndGenerate::new();
        backend.expect_retrieve_and_generate().times(0);

        let dispatcher = QueryDispatcher::new(Arc::new(backend), &config("", "arn:model"));
        let err = dispatcher.dispatch("anything").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error: Missing KB_ID or MODEL_ARN. Please check your .env file."
        );
    }

    #[tokio::test]
    async fn missing_model_arn_short_circuits_without_calling_the_backend() {
        let mut backend = MockRetrieveAndGenerate::new();
        backend.expect_retrieve_and_generate().times(0);

        let dispatcher = QueryDispatcher::new(Arc::new(backend), &config("KB123", ""));
        let err = dispatcher.dispatch("anything").await.unwrap_err();

        assert_eq!(err, QueryError::MissingConfig);
    }

    #[tokio::test]
    async fn backend_errors_surface_with_their_message() {
        let mut backend = MockRetrieveAndGenerate::new();
        backend
            .expect_retrieve_and_generate()
            .returning(|_, _, _| Err(anyhow::anyhow!("timeout")));

        let dispatcher = QueryDispatcher::new(Arc::new(backend), &config("KB123", "arn:model"));
        let err = dispatcher.dispatch("q").await.unwrap_err();

        assert_eq!(err.to_string(), "Error querying KB: timeout");
    }

    #[tokio::test]
    async fn answers_pass_through_unchanged() {
        let mut backend = MockRetrieveAndGenerate::new();
        backend
            .expect_retrieve_and_generate()
            .withf(|question, kb_id, model_arn| {
                question == "What is the capital of France?"
                    && kb_id == "KB123"
                    && model_arn == "arn:model"
            })
            .returning(|_, _, _| {
                Ok(KbAnswer {
                    text: "Paris is the capital.".to_string(),
                    session_id: None,
                })
            });

        let dispatcher = QueryDispatcher::new(Arc::new(backend), &config("KB123", "arn:model"));
        let answer = dispatcher
            .dispatch("What is the capital of France?")
            .await
            .unwrap();

        assert_eq!(answer, "Paris is the capital.");
    }
}
