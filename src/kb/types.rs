use serde::{Deserialize, Serialize};

/// Request payload for the retrieve-and-generate operation.
///
/// Field names follow the Bedrock agent-runtime wire format, which is
/// camelCase with a literal `type` discriminator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateRequest {
    pub input: QueryInput,
    pub retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateConfiguration {
    #[serde(rename = "type")]
    pub config_type: String,
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfiguration {
    pub knowledge_base_id: String,
    pub model_arn: String,
}

impl RetrieveAndGenerateRequest {
    /// Build the wire request for one question against a knowledge base
    pub fn new(question: &str, kb_id: &str, model_arn: &str) -> Self {
        Self {
            input: QueryInput {
                text: question.to_string(),
            },
            retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration {
                config_type: "KNOWLEDGE_BASE".to_string(),
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: kb_id.to_string(),
                    model_arn: model_arn.to_string(),
                },
            },
        }
    }
}

/// Response payload; anything beyond the generated text is ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateResponse {
    pub output: GeneratedOutput,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedOutput {
    pub text: String,
}

/// Answer extracted from a successful retrieve-and-generate call
#[derive(Debug, Clone)]
pub struct KbAnswer {
    pub text: String,
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_serializes_to_the_bedrock_wire_shape() {
        let request = RetrieveAndGenerateRequest::new(
            "What is a Knowledge Base?",
            "KB123EXAMPLE",
            "arn:aws:bedrock:us-east-1::foundation-model/test",
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "input": { "text": "What is a Knowledge Base?" },
                "retrieveAndGenerateConfiguration": {
                    "type": "KNOWLEDGE_BASE",
                    "knowledgeBaseConfiguration": {
                        "knowledgeBaseId": "KB123EXAMPLE",
                        "modelArn": "arn:aws:bedrock:us-east-1::foundation-model/test"
                    }
                }
            })
        );
    }

    #[test]
    fn response_yields_the_generated_text() {
        let raw = r#"{
            "output": { "text": "Paris is the capital." },
            "sessionId": "session-1",
            "citations": []
        }"#;

        let response: RetrieveAndGenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.output.text, "Paris is the capital.");
        assert_eq!(response.session_id.as_deref(), Some("session-1"));
    }

    #[test]
    fn response_without_session_id_still_parses() {
        let raw = r#"{ "output": { "text": "hello" } }"#;

        let response: RetrieveAndGenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.output.text, "hello");
        assert_eq!(response.session_id, None);
    }
}
