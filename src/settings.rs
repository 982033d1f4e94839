use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "DOCASM";

pub const DEFAULT_OUTPUT: &str = "README.md";
pub const DEFAULT_TITLE: &str = "Go Best Practices";

/// Run settings. Defaults reproduce the hardcoded behaviour; `DOCASM_*`
/// environment variables override them and CLI flags override both.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub output: String,
    pub title: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub strict_titles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: DEFAULT_OUTPUT.to_string(),
            title: DEFAULT_TITLE.to_string(),
            intro: None,
            strict_titles: false,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Apply command-line overrides on top of loaded settings.
    pub fn with_overrides(
        mut self,
        output: Option<String>,
        title: Option<String>,
        intro: Option<String>,
        strict: bool,
    ) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if intro.is_some() {
            self.intro = intro;
        }
        self.strict_titles |= strict;
        self
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("output", DEFAULT_OUTPUT)?
        .set_default("title", DEFAULT_TITLE)?
        .set_default("strict_titles", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default_impl() {
        let settings: Settings = defaults().unwrap().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output, "README.md");
        assert!(settings.intro.is_none());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let settings = Settings::default().with_overrides(
            Some("DOCS.md".into()),
            None,
            Some("See the [recording](https://example.com/video).".into()),
            false,
        );
        assert_eq!(settings.output, "DOCS.md");
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(
            settings.intro.as_deref(),
            Some("See the [recording](https://example.com/video).")
        );
        assert!(!settings.strict_titles);
    }

    #[test]
    fn strict_flag_cannot_turn_strict_off() {
        let base = Settings {
            strict_titles: true,
            ..Settings::default()
        };
        let settings = base.with_overrides(None, None, None, false);
        assert!(settings.strict_titles);
    }
}
