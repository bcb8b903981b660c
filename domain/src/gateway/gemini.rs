//! Gemini API client for text generation.
//!
//! This module provides an HTTP client for the Google Gemini generateContent
//! endpoint, used to turn normalized meeting transcripts into structured
//! summaries. The call is a single non-streaming request; no retry logic and
//! no timeout beyond the transport default.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::summary::extractor::TextGeneration;
use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// A single content block in a generation request
#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A text part within a content block
#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// Builds a single-turn request from one prompt string
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Response from the generateContent endpoint.
///
/// Depending on API version and transport, the generated text arrives either
/// as a top-level `text` field or nested under
/// `candidates[0].content.parts[*].text`. Both shapes must be handled.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

/// One generation candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

/// Content block of a candidate
#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// Text part of a candidate content block
#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

impl GenerateContentResponse {
    /// Extracts the generated text from whichever response shape is present.
    pub fn extract_text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }

        self.candidates.as_ref().and_then(|candidates| {
            candidates.first().map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
        })
    }
}

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client from application config
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.gemini_api_key().ok_or_else(|| {
            warn!("Failed to get Gemini API key from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url().to_string(),
            model: config.gemini_model().to_string(),
            api_key,
        })
    }

    /// Generate text from a single prompt, non-streaming.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, Error> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!("Calling Gemini model {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Gemini API: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let body: GenerateContentResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Gemini response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Gemini".to_string(),
                    )),
                }
            })?;

            body.extract_text().ok_or_else(|| {
                warn!("Gemini response contained no extractable text");
                Error {
                    source: None,
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Unexpected Gemini response format".to_string(),
                    )),
                }
            })
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API returned {}: {}", status, error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.generate_content(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn create_config_with_mock(server_url: &str) -> Config {
        env::set_var("GEMINI_API_KEY", "test_gemini_key");
        env::set_var("GEMINI_BASE_URL", server_url);
        Config::default()
    }

    #[test]
    fn test_extract_text_prefers_top_level_text() {
        let response = GenerateContentResponse {
            text: Some("direct".to_string()),
            candidates: Some(vec![Candidate {
                content: CandidateContent {
                    parts: vec![CandidatePart {
                        text: "nested".to_string(),
                    }],
                },
            }]),
        };
        assert_eq!(response.extract_text(), Some("direct".to_string()));
    }

    #[test]
    fn test_extract_text_falls_back_to_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello "}, {"text": "world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.extract_text(), Some("hello world".to_string()));
    }

    #[test]
    fn test_extract_text_with_neither_shape_is_none() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.extract_text(), None);
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_content_candidates_shape() {
        let mut server = mockito::Server::new_async().await;
        let config = create_config_with_mock(&server.url());

        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".to_string(),
                "test_gemini_key".to_string(),
            ))
            .with_status(200)
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "a summary"}]}}]}"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(&config).unwrap();
        let text = client.generate_content("summarize this").await.unwrap();
        assert_eq!(text, "a summary");
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_content_error_status_propagates() {
        let mut server = mockito::Server::new_async().await;
        let config = create_config_with_mock(&server.url());

        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(429)
            .with_body(r#"{"error": "quota exceeded"}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config).unwrap();
        let result = client.generate_content("summarize this").await;

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(matches!(
                e.error_kind,
                DomainErrorKind::External(ExternalErrorKind::Other(_))
            ));
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_client_creation_fails_without_api_key() {
        env::remove_var("GEMINI_API_KEY");
        env::set_var("GEMINI_BASE_URL", service::config::DEFAULT_GEMINI_BASE_URL);
        let config = Config::default();

        let result = GeminiClient::new(&config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(
                e.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::Config)
            );
        }
    }
}
