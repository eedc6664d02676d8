//! Product description generator.
//!
//! [`provider::ContentRequester::request_description`] turns product details
//! into model text with one call to the Gemini `generateContent` API, and
//! [`format::format`] turns that text into display blocks.

pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod log;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod ux;
pub mod wire;

pub use errors::GenerationError;
pub use format::{format, DisplayBlock};
pub use prompt::ProductDetails;
pub use provider::ContentRequester;
