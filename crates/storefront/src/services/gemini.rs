//! Gemini API client for generated product copy.
//!
//! Thin transport wrapper around the Generative Language `generateContent`
//! endpoint. Prompt wording and fallback policy live in the insight service;
//! this client only knows how to send a prompt and pull text back out.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::GeminiConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors that can occur when interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response carried no text candidates.
    #[error("empty response")]
    Empty,
}

/// Source of generated product text.
///
/// Seam for the insight service so caching policy can be tested without a
/// network; the production implementation is [`GeminiClient`].
pub trait GenerativeProvider: Send + Sync + 'static {
    /// One short sentence about a product.
    fn short_fact(
        &self,
        product_name: &str,
    ) -> impl Future<Output = Result<String, GeminiError>> + Send;

    /// Catalog names likely matching a free-form search intent.
    fn matching_names(
        &self,
        query: &str,
        catalog_names: &[String],
    ) -> impl Future<Output = Result<Vec<String>, GeminiError>> + Send;
}

/// Client for the Gemini Generative Language API.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(api_key: &SecretString, config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key.expose_secret())
                .map_err(|e| GeminiError::Parse(format!("invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
            }),
        })
    }

    /// Send a prompt and return the first candidate's text.
    #[instrument(skip(self, prompt, generation_config), fields(model = %self.inner.model))]
    async fn generate(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{GEMINI_API_BASE}/models/{}:generateContent",
            self.inner.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config,
        };

        let response = self.inner.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        body.first_text().ok_or(GeminiError::Empty)
    }
}

impl GenerativeProvider for GeminiClient {
    async fn short_fact(&self, product_name: &str) -> Result<String, GeminiError> {
        let prompt = format!(
            "Provide a very short, one-sentence fun nutritional fact or tip \
             for a {product_name}. Keep it professional but engaging."
        );
        self.generate(&prompt, None).await
    }

    async fn matching_names(
        &self,
        query: &str,
        catalog_names: &[String],
    ) -> Result<Vec<String>, GeminiError> {
        let prompt = format!(
            "The user is searching for \"{query}\" in a fruit market. Return \
             a JSON array of fruit names that might match this intent from \
             our catalog ({}).",
            catalog_names.join(", ")
        );
        let text = self
            .generate(
                &prompt,
                Some(GenerationConfig {
                    response_mime_type: Some("application/json".to_owned()),
                }),
            )
            .await?;

        serde_json::from_str(&text).map_err(|e| GeminiError::Parse(e.to_string()))
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// A text part within a turn.
#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Generation options.
#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

/// Response body for `generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate part, if any.
    fn first_text(&self) -> Option<String> {
        let part = self.candidates.first()?.content.parts.first()?;
        if part.text.is_empty() {
            None
        } else {
            Some(part.text.clone())
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
