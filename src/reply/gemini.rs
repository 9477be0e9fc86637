//! Google Gemini `generateContent` reply client

use super::{ReplyClient, ReplyError};
use crate::conversation::{Conversation, Role};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Upstream bodies quoted in error messages are cut to this many characters
const MAX_ERROR_BODY_CHARS: usize = 512;

fn truncate_body(body: &str) -> String {
    let mut chars = body.chars();
    let mut kept: String = chars.by_ref().take(MAX_ERROR_BODY_CHARS).collect();
    if chars.next().is_some() {
        kept.push_str("...");
    }
    kept
}

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

/// Gemini reply client
///
/// Sends the whole conversation on every call. The HTTP client keeps its
/// default timeout behaviour and nothing is retried.
pub struct GeminiReplyClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model_id: String,
}

impl GeminiReplyClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            endpoint,
            model_id: config.model.clone(),
        }
    }

    fn translate_request<'a>(
        conversation: &'a Conversation,
        instructions: &'a str,
    ) -> GeminiRequest<'a> {
        let contents = conversation
            .iter()
            .map(|msg| GeminiContent {
                role: match msg.role() {
                    Role::User => "user",
                    Role::Assistant => "model",
                },
                parts: vec![GeminiPart { text: msg.text() }],
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart { text: instructions }],
            },
        }
    }

    /// Pull the first text part of the first candidate out of the envelope.
    fn extract_reply(resp: GeminiResponse) -> Result<String, ReplyError> {
        let Some(candidate) = resp.candidates.into_iter().next() else {
            let reason = resp
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map_or_else(String::new, |r| format!(" (prompt blocked: {r})"));
            return Err(ReplyError::malformed(format!(
                "No candidates in response{reason}"
            )));
        };

        let finish = candidate
            .finish_reason
            .map_or_else(String::new, |r| format!(" (finish reason: {r})"));

        let content = candidate
            .content
            .ok_or_else(|| ReplyError::malformed(format!("Candidate has no content{finish}")))?;

        let part = content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| ReplyError::malformed(format!("Candidate has no parts{finish}")))?;

        part.text
            .ok_or_else(|| ReplyError::malformed("First part carries no text"))
    }
}

#[async_trait]
impl ReplyClient for GeminiReplyClient {
    async fn request_reply(
        &self,
        conversation: &Conversation,
        instructions: &str,
    ) -> Result<String, ReplyError> {
        let gemini_request = Self::translate_request(conversation, instructions);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                if e.is_timeout() {
                    ReplyError::transport(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    ReplyError::transport(format!("Connection failed: {e}"))
                } else {
                    ReplyError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ReplyError::transport(format!("Failed to read response: {}", e.without_url()))
                .with_status(status.as_u16())
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map_or(body, |error_resp| error_resp.error.message);
            return Err(
                ReplyError::transport(format!("HTTP {status}: {}", truncate_body(&detail)))
                    .with_status(status.as_u16()),
            );
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            ReplyError::malformed(format!(
                "Failed to parse response: {e} - body: {}",
                truncate_body(&body)
            ))
        })?;

        Self::extract_reply(gemini_response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiSystemInstruction<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
