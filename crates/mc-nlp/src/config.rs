//! Interpreter configuration.

use serde::Deserialize;

/// Settings for the natural-language interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NlpConfig {
    /// Fail on any missing required field instead of substituting the
    /// documented default.
    #[serde(default)]
    pub strict_mode: bool,
}

impl NlpConfig {
    /// Load config from a TOML file containing an `[nlp]` table or bare keys.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct Wrapper {
            nlp: Option<NlpConfig>,
            #[serde(flatten)]
            bare: NlpConfig,
        }

        let wrapper: Wrapper = toml::from_str(contents)?;
        Ok(wrapper.nlp.unwrap_or(wrapper.bare))
    }
}
