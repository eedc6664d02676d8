use serde::{Deserialize, Serialize};

use crate::errors::{GenResult, GenerationError};

// ========================================
// generateContent request/response wire types
// ========================================

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f32 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

pub const BLOCK_MEDIUM_AND_ABOVE: &str = "BLOCK_MEDIUM_AND_ABOVE";

pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl GenerateRequest {
    /// Single-turn request carrying `prompt` with the fixed sampling and safety settings.
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|c| SafetySetting {
                    category: c.to_string(),
                    threshold: BLOCK_MEDIUM_AND_ABOVE.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Decode a response body into the generated text.
///
/// Bodies that are not JSON, or whose fields have the wrong types, are
/// `MalformedResponse`. A well-typed envelope without a non-empty
/// `candidates[0].content.parts[0].text` is `EmptyResponse`.
pub fn decode_response(body: &str) -> GenResult<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let first = parsed.candidates.first();
    let text = first
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
        .filter(|t| !t.is_empty());

    match text {
        Some(t) => Ok(t.to_string()),
        None => {
            let reason = parsed
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .or_else(|| first.and_then(|c| c.finish_reason.clone()));
            Err(GenerationError::EmptyResponse { reason })
        }
    }
}
