use async_trait::async_trait;
use reqwest::Client;

use crate::errors::{GenResult, GenerationError};
use crate::prompt::ProductDetails;
use crate::wire::GenerateRequest;

pub mod gemini;

pub use gemini::GeminiRequester;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single outbound POST the requester performs.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &GenerateRequest) -> GenResult<HttpReply>;
}

/// Turns product details into generated description text.
#[async_trait]
pub trait ContentRequester: Send + Sync {
    async fn request_description(&self, details: &ProductDetails) -> GenResult<String>;
}

/// `reqwest` transport with the client's default timeouts.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &GenerateRequest) -> GenResult<HttpReply> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.without_url().to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.without_url().to_string()))?;

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::time::Duration;

    /// In-memory transport returning a canned reply and recording every call.
    pub struct FakeTransport {
        reply: GenResult<HttpReply>,
        delay: Option<Duration>,
        pub calls: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        pub fn replying(status: u16, body: impl Into<String>) -> Self {
            Self {
                reply: Ok(HttpReply { status, body: body.into() }),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(GenerationError::Network(message.into())),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn post_json(&self, url: &str, body: &GenerateRequest) -> GenResult<HttpReply> {
            let body = serde_json::to_value(body).unwrap();
            self.calls.lock().push((url.to_string(), body));
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            match &self.reply {
                Ok(r) => Ok(r.clone()),
                Err(GenerationError::Network(m)) => Err(GenerationError::Network(m.clone())),
                Err(e) => Err(GenerationError::Network(e.to_string())),
            }
        }
    }
}
