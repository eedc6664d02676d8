use clap::Parser;

use crate::config::Config;
use crate::prompt::ProductDetails;

#[derive(Parser, Debug)]
#[command(name = "copygen", version, about = "Generate product descriptions with the Gemini API")]
pub struct Args {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Key features of the product
    #[arg(long)]
    pub features: Option<String>,

    /// Benefits for the customer
    #[arg(long)]
    pub benefits: Option<String>,

    /// Who the product is for
    #[arg(long)]
    pub audience: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<String>,

    /// Write the copy-ready description to this file
    #[arg(long)]
    pub output: Option<String>,

    /// Print the unformatted model text
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    pub raw: bool,

    /// Print the display blocks as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Flags take precedence over the config file.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(m) = &self.model {
            cfg.model = m.clone();
        }
        if let Some(b) = &self.api_base {
            cfg.api_base = b.clone();
        }
    }

    /// Product fields from flags, asking `prompt` for each one not given.
    pub fn product_details(&self, mut prompt: impl FnMut(&str) -> String) -> ProductDetails {
        let mut field = |given: &Option<String>, label: &str| match given {
            Some(v) => v.clone(),
            None => prompt(label),
        };
        ProductDetails {
            name: field(&self.name, "Product name"),
            features: field(&self.features, "Key features"),
            benefits: field(&self.benefits, "Benefits"),
            target_audience: field(&self.audience, "Target audience"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["copygen", "--model", "gemini-1.5-pro"]);
        let mut cfg = Config::default();
        args.apply_to(&mut cfg);
        assert_eq!(cfg.model, "gemini-1.5-pro");
        assert_eq!(cfg.api_base, Config::default().api_base);
    }

    #[test]
    fn raw_and_json_are_exclusive() {
        let err = Args::try_parse_from(["copygen", "--raw", "--json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(Args::try_parse_from(["copygen", "--json"]).is_ok());
    }

    #[test]
    fn missing_fields_are_prompted() {
        let args = Args::parse_from(["copygen", "--name", "Kettle", "--audience", "Tea lovers"]);
        let mut asked = Vec::new();
        let details = args.product_details(|label| {
            asked.push(label.to_string());
            format!("{label} answer")
        });
        assert_eq!(asked, ["Key features", "Benefits"]);
        assert_eq!(details.name, "Kettle");
        assert_eq!(details.features, "Key features answer");
        assert_eq!(details.target_audience, "Tea lovers");
    }
}
