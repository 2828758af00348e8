use crate::domain::ports::GenerativeClient;
use crate::utils::error::{Result, WidgetError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Single-shot client for the generative-language `generateContent` call.
/// No retry and no timeout: a failed request is reported and left to the user.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_url(&self, api_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        if api_key.trim().is_empty() {
            return Err(WidgetError::MissingApiKey);
        }

        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            "Sending generateContent request to {} ({} prompt chars)",
            self.endpoint,
            prompt.chars().count()
        );
        let response = self
            .client
            .post(self.request_url(api_key)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("generateContent response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .map(|b| b.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(WidgetError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        extract_reply(&text)
    }
}

/// Concatenated text parts of the first candidate.
pub fn extract_reply(body: &str) -> Result<String> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| WidgetError::ResponseShape {
            message: format!("response is not valid JSON: {}", e),
        })?;

    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| WidgetError::ResponseShape {
            message: "no candidates in response".to_string(),
        })?;

    let reply: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if reply.is_empty() {
        return Err(WidgetError::ResponseShape {
            message: "first candidate carries no text".to_string(),
        });
    }
    Ok(reply)
}
