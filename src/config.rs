use serde::Deserialize;
use snafu::ResultExt;
use strum::EnumString;

use crate::error::{ConfigSnafu, Error};

/// How a message body should be decoded after any notification unwrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(from = "String")]
pub enum BodyFormat {
    #[default]
    Plain,
    Json,
}

// Unrecognized format identifiers fall back to Plain rather than erroring.
impl From<String> for BodyFormat {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub unwrap_sns: Option<bool>,
    pub body_format: Option<BodyFormat>,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        envy::prefixed("MILLRACE_")
            .from_env::<Self>()
            .context(ConfigSnafu)
    }

    pub fn unwrap_sns(&self) -> bool {
        self.unwrap_sns.unwrap_or(false)
    }

    pub fn body_format(&self) -> BodyFormat {
        self.body_format.unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unwrap_sns: None,
            body_format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_format_from_string() {
        let test_cases = vec![
            ("plain", BodyFormat::Plain),
            ("json", BodyFormat::Json),
            ("JSON", BodyFormat::Json),
            ("yaml", BodyFormat::Plain),
            ("", BodyFormat::Plain),
        ];

        for (input, expected) in test_cases {
            assert_eq!(
                BodyFormat::from(input.to_owned()),
                expected,
                "Format mismatch for input: {}",
                input
            );
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(!config.unwrap_sns());
        assert_eq!(config.body_format(), BodyFormat::Plain);
    }
}
