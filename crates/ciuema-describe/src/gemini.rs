use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use ciuema_core::config::DescribeConfig;
use ciuema_core::error::CiuemaError;

use crate::{prompt, DescriptionGenerator};

/// Generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_url: url::Url,
    model: String,
}

impl GeminiGenerator {
    pub fn new(config: &DescribeConfig, api_key: String) -> Result<Self, CiuemaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let key = HeaderValue::from_str(&api_key).map_err(|e| CiuemaError::CredentialError {
            message: format!("API key is not a valid header value: {e}"),
        })?;
        headers.insert("x-goog-api-key", key);
        headers.insert(header::USER_AGENT, HeaderValue::from_static("ciuema/0.1.0"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CiuemaError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }

    fn url(&self) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Joined, trimmed text of the first candidate.
fn response_text(resp: GenerateResponse) -> Result<String, CiuemaError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(CiuemaError::ApiError {
            status: 200,
            message: "response contained no text".into(),
        });
    }
    Ok(text.to_string())
}

#[async_trait]
impl DescriptionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        common_name: &str,
        scientific_name: &str,
    ) -> Result<String, CiuemaError> {
        let prompt = prompt(common_name, scientific_name);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        tracing::debug!(model = %self.model, "requesting description");
        let resp = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| CiuemaError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CiuemaError::ApiError {
                status,
                message: body,
            });
        }

        let parsed: GenerateResponse = resp.json().await.map_err(|e| CiuemaError::ApiError {
            status: 0,
            message: format!("JSON parse error: {e}"),
        })?;
        response_text(parsed)
    }
}
