//! Hugging Face Inference API adapter (secondary tier)
//!
//! Single POST with a bearer token; the prompt is wrapped in the
//! instruction markers the hosted Mistral model expects.

use super::{status_error, transport_error};
use crate::config::ApiKey;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use studybuddy_application::{ProviderError, TextGateway};
use studybuddy_domain::core::text::take_chars;
use studybuddy_domain::{GeneratedText, GenerationRequest, HuggingFaceProviderConfig};

pub(crate) const PROVIDER: &str = "huggingface";

pub struct HuggingFaceGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    max_new_tokens: u32,
    temperature: f64,
}

impl HuggingFaceGateway {
    pub fn new(
        client: reqwest::Client,
        config: &HuggingFaceProviderConfig,
        api_key: ApiKey,
    ) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        }
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "inputs": format!("[INST] {} [/INST]", prompt),
            "parameters": {
                "max_new_tokens": self.max_new_tokens,
                "temperature": self.temperature,
                "return_full_text": false,
            }
        })
    }
}

#[async_trait]
impl TextGateway for HuggingFaceGateway {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedText, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&self.payload(&request.prompt))
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        if status != StatusCode::OK {
            return Err(status_error(PROVIDER, status, &body));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("invalid JSON: {}", e)))?;
        let text = generated_text(&payload)?;
        Ok(GeneratedText::new(text, PROVIDER).with_raw_payload(payload))
    }
}

/// `[{"generated_text": ..}]` or `{"generated_text": ..}`
fn generated_text(payload: &Value) -> Result<String, ProviderError> {
    let item = match payload {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| ProviderError::malformed(PROVIDER, "empty result list"))?,
        other => other,
    };

    item.get("generated_text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::malformed(
                PROVIDER,
                format!("no generated_text in {}", take_chars(&item.to_string(), 100)),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HuggingFaceGateway {
        HuggingFaceGateway::new(
            reqwest::Client::new(),
            &HuggingFaceProviderConfig::default(),
            ApiKey::new("hf"),
        )
    }

    #[test]
    fn test_payload_wraps_instruction() {
        let payload = gateway().payload("Explain DNA");
        assert_eq!(payload["inputs"], "[INST] Explain DNA [/INST]");
        assert_eq!(payload["parameters"]["max_new_tokens"], 1000);
        assert_eq!(payload["parameters"]["temperature"], 0.7);
        assert_eq!(payload["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_generated_text_shapes() {
        assert_eq!(
            generated_text(&json!([{"generated_text": "from list"}])).unwrap(),
            "from list"
        );
        assert_eq!(
            generated_text(&json!({"generated_text": "from object"})).unwrap(),
            "from object"
        );
    }

    #[test]
    fn test_generated_text_rejects_other_shapes() {
        assert!(matches!(
            generated_text(&json!([])),
            Err(ProviderError::MalformedResponse { .. })
        ));
        assert!(matches!(
            generated_text(&json!({"error": "Model is loading"})),
            Err(ProviderError::MalformedResponse { .. })
        ));
    }

    // ==================== HTTP round trips ====================

    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_at(server: &MockServer) -> HuggingFaceGateway {
        let config = HuggingFaceProviderConfig {
            endpoint: server.uri(),
            ..HuggingFaceProviderConfig::default()
        };
        HuggingFaceGateway::new(reqwest::Client::new(), &config, ApiKey::new("hf-token"))
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_wrapped_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer hf-token"))
            .and(body_partial_json(json!({"inputs": "[INST] Explain DNA [/INST]"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"generated_text": "DNA is..."}])),
            )
            .mount(&server)
            .await;

        let generated = gateway_at(&server)
            .generate(&GenerationRequest::text("Explain DNA"))
            .await
            .unwrap();
        assert_eq!(generated.text, "DNA is...");
        assert_eq!(generated.provider, "huggingface");
    }

    #[tokio::test]
    async fn test_non_200_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Model is loading"))
            .mount(&server)
            .await;

        let err = gateway_at(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::unavailable("huggingface", "HTTP 503: Model is loading")
        );
    }

    #[tokio::test]
    async fn test_non_200_success_status_fails_tier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!([{"generated_text": "queued"}])),
            )
            .mount(&server)
            .await;

        let err = gateway_at(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert!(err.message().starts_with("HTTP 202"));
    }
}
