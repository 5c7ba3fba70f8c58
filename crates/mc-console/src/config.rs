//! Console configuration, loadable from TOML with environment overrides.

use serde::Deserialize;

use mc_nlp::NlpConfig;

/// Top-level configuration for the console.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    /// Interpreter settings.
    #[serde(default)]
    pub nlp: NlpConfig,
    /// Pretty-print each JSON report instead of one report per line.
    #[serde(default)]
    pub pretty: bool,
}

impl ConsoleConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// File config if a path is given, defaults otherwise; then environment
    /// overrides.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// `MC_STRICT_MODE` (`true`/`1` or `false`/`0`) overrides the file.
    pub fn apply_env_overrides(&mut self) {
        if let Some(strict) = parse_flag(std::env::var("MC_STRICT_MODE").ok().as_deref()) {
            self.nlp.strict_mode = strict;
        }
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim() {
        v if v.eq_ignore_ascii_case("true") || v == "1" => Some(true),
        v if v.eq_ignore_ascii_case("false") || v == "0" => Some(false),
        other => {
            tracing::warn!(value = other, "ignoring unrecognized MC_STRICT_MODE value");
            None
        }
    }
}
