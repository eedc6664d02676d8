use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    #[error("no API key configured (set GEMINI_API_KEY or api_key in the config file)")]
    MissingCredential,

    #[error("generation service returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response from generation service: {0}")]
    MalformedResponse(String),

    #[error("generation service returned no text{}", reason_suffix(.reason))]
    EmptyResponse { reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default()
}

pub type GenResult<T> = std::result::Result<T, GenerationError>;
