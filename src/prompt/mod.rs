use serde::{Deserialize, Serialize};

use crate::errors::{GenResult, GenerationError};

/// The four product attributes collected from the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub features: String,
    pub benefits: String,
    pub target_audience: String,
}

impl ProductDetails {
    /// Fails on the first empty field, in form order.
    pub fn validate(&self) -> GenResult<()> {
        let fields = [
            ("name", &self.name),
            ("features", &self.features),
            ("benefits", &self.benefits),
            ("target_audience", &self.target_audience),
        ];
        match fields.iter().find(|(_, v)| v.is_empty()) {
            Some((field, _)) => Err(GenerationError::Validation { field: *field }),
            None => Ok(()),
        }
    }
}

/// A prompt ready to send. Only constructible from validated details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    pub fn new(details: &ProductDetails) -> GenResult<Self> {
        details.validate()?;
        Ok(Self { prompt: description_prompt(details) })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

fn description_prompt(d: &ProductDetails) -> String {
    format!(
r##"Write a compelling, persuasive product description for the following product.

Product Name: {name}
Key Features: {features}
Benefits: {benefits}
Target Audience: {audience}

Guidelines:
- Start with a catchy headline on its own line, prefixed with "#".
- Follow with a short engaging introduction that speaks directly to the target audience.
- Highlight the key features and explain how each one benefits the customer.
- Use a few relevant emojis to make the text lively, but keep it professional.
- Separate sections with a blank line.
- Finish with a clear call to action."##,
        name = d.name,
        features = d.features,
        benefits = d.benefits,
        audience = d.target_audience,
    )
}
