//! Gemini REST adapter (primary tier)
//!
//! - `GET  {base}/v1beta/models` lists the catalog (paged)
//! - `POST {base}/v1beta/{model}:generateContent` generates
//!
//! Structured requests set `responseMimeType: application/json`.

use super::{status_error, transport_error};
use crate::config::ApiKey;
use async_trait::async_trait;
use serde_json::{Value, json};
use studybuddy_application::{ModelGateway, ProviderError};
use studybuddy_domain::{CatalogModel, GeminiProviderConfig, GeneratedText, GenerationRequest};
use std::collections::HashSet;
use tracing::{debug, warn};

pub(crate) const PROVIDER: &str = "gemini";

const API_VERSION: &str = "v1beta";
const PAGE_SIZE: u32 = 1000;
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Upper bound on `models.list` pages fetched per catalog call
const MAX_CATALOG_PAGES: usize = 50;

pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl GeminiGateway {
    pub fn new(client: reqwest::Client, config: &GeminiProviderConfig, api_key: ApiKey) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        if !status.is_success() {
            return Err(status_error(PROVIDER, status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("invalid JSON: {}", e)))
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn list_models(&self) -> Result<Vec<CatalogModel>, ProviderError> {
        let url = format!("{}/{}/models", self.base_url, API_VERSION);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        for _ in 0..MAX_CATALOG_PAGES {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page = self.get_json(&url, &query).await?;
            let (mut listed, next) = parse_catalog_page(&page)?;
            models.append(&mut listed);

            match next {
                Some(token) if seen_tokens.insert(token.clone()) => page_token = Some(token),
                Some(token) => {
                    warn!("Gemini catalog repeated page token {}, stopping", token);
                    page_token = None;
                    break;
                }
                None => {
                    page_token = None;
                    break;
                }
            }
        }
        if page_token.is_some() {
            warn!(
                "Gemini catalog still paging after {} pages, using what was listed",
                MAX_CATALOG_PAGES
            );
        }

        debug!("Listed {} Gemini models", models.len());
        Ok(models)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedText, ProviderError> {
        let url = format!(
            "{}/{}/{}:generateContent",
            self.base_url,
            API_VERSION,
            model_path(model)
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let payload = Self::read_json(response).await?;
        let text = extract_text(&payload)?;
        Ok(GeneratedText::new(text, PROVIDER).with_raw_payload(payload))
    }
}

/// Catalog names already carry the `models/` prefix; bare names get it.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

fn request_body(request: &GenerationRequest) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
    });
    if request.structured_output {
        body["generationConfig"] = json!({ "responseMimeType": "application/json" });
    }
    body
}

/// One page of `models.list`: entries plus the next page token.
fn parse_catalog_page(page: &Value) -> Result<(Vec<CatalogModel>, Option<String>), ProviderError> {
    let entries: &[Value] = match page.get("models") {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(_) => {
            return Err(ProviderError::malformed(PROVIDER, "`models` is not a list"));
        }
        // An empty catalog page omits the field
        None => &[],
    };

    let models = entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?;
            let methods: Vec<&str> = entry
                .get("supportedGenerationMethods")
                .and_then(Value::as_array)
                .map(|methods| methods.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            Some(CatalogModel::new(name, &methods))
        })
        .collect();

    let next = page
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    Ok((models, next))
}

/// Concatenated text parts of the first candidate.
///
/// A response without candidates or parts (e.g. blocked by a safety
/// filter) yields empty text rather than an error.
fn extract_text(payload: &Value) -> Result<String, ProviderError> {
    if let Some(error) = payload.get("error") {
        return Err(ProviderError::unavailable(PROVIDER, error.to_string()));
    }

    let parts = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array);

    Ok(parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default())
}
