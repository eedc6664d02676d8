use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{ContentRequester, Transport};
use crate::config::{ApiKey, Config};
use crate::errors::{GenResult, GenerationError};
use crate::prompt::{GenerationRequest, ProductDetails};
use crate::wire::{self, GenerateRequest};

pub struct GeminiRequester {
    transport: Arc<dyn Transport>,
    api_key: ApiKey,
    model: String,
    api_base: String,
}

impl GeminiRequester {
    pub fn new(transport: Arc<dyn Transport>, api_key: ApiKey, cfg: &Config) -> Self {
        info!(model = %cfg.model, api_base = %cfg.api_base, "gemini requester initialized");
        Self {
            transport,
            api_key,
            model: cfg.model.clone(),
            api_base: cfg.api_base.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// The exact body sent for `details`.
    pub fn request_body(details: &ProductDetails) -> GenResult<GenerateRequest> {
        let request = GenerationRequest::new(details)?;
        Ok(GenerateRequest::for_prompt(request.prompt()))
    }
}

#[async_trait]
impl ContentRequester for GeminiRequester {
    async fn request_description(&self, details: &ProductDetails) -> GenResult<String> {
        let body = Self::request_body(details)?;
        let endpoint = self.endpoint();
        let url = format!("{endpoint}?key={}", self.api_key.expose());

        info!(model = %self.model, "requesting product description");
        debug!(url = %endpoint, "POST");

        let reply = self.transport.post_json(&url, &body).await?;
        debug!(status = reply.status, body = %reply.body, "raw response");

        if !reply.is_success() {
            warn!(status = reply.status, "generation service returned an error status");
            return Err(GenerationError::Transport {
                status: reply.status,
                body: reply.body,
            });
        }

        let text = wire::decode_response(&reply.body)?;
        info!(response_len = text.len(), "product description received");
        Ok(text)
    }
}
