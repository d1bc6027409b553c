//! Pollinations adapter (tertiary tier)
//!
//! Credential-free chat endpoint. The raw response body is the answer.

use super::{status_error, transport_error};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use studybuddy_application::{ProviderError, TextGateway};
use studybuddy_domain::{GeneratedText, GenerationRequest, PollinationsProviderConfig};

pub(crate) const PROVIDER: &str = "pollinations";

pub struct PollinationsGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl PollinationsGateway {
    /// `client` should carry the configured request timeout.
    pub fn new(client: reqwest::Client, config: &PollinationsProviderConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }
}

fn payload(prompt: &str) -> Value {
    json!({ "messages": [{ "role": "user", "content": prompt }] })
}

#[async_trait]
impl TextGateway for PollinationsGateway {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedText, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload(&request.prompt))
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

        Ok(GeneratedText::new(body.clone(), PROVIDER).with_raw_payload(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let body = payload("hello");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_at(server: &MockServer) -> PollinationsGateway {
        let config = PollinationsProviderConfig {
            endpoint: server.uri(),
            ..PollinationsProviderConfig::default()
        };
        PollinationsGateway::new(reqwest::Client::new(), &config)
    }

    #[tokio::test]
    async fn test_body_is_the_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(payload("What is ATP?")))
            .respond_with(ResponseTemplate::new(200).set_body_string("ATP stores energy."))
            .mount(&server)
            .await;

        let generated = gateway_at(&server)
            .generate(&GenerationRequest::text("What is ATP?"))
            .await
            .unwrap();
        assert_eq!(generated.text, "ATP stores energy.");
        assert_eq!(generated.raw_payload, Value::String("ATP stores energy.".to_string()));
    }

    #[tokio::test]
    async fn test_error_status_fails_tier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = gateway_at(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert_eq!(err.message(), "HTTP 500: boom");
    }

    #[tokio::test]
    async fn test_no_content_fails_tier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = gateway_at(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert_eq!(err.message(), "HTTP 204: ");
    }
}
