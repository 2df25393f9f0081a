use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::ResolvedConfig;

/// Authoring formats accepted by [`load_input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// Format implied by a file extension, if it is one we read
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Parse expanded configuration text into a raw input
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid in this format
    pub fn parse(self, text: &str) -> anyhow::Result<Value> {
        let value = match self {
            Self::Toml => toml::from_str(text).context("failed to parse TOML configuration")?,
            Self::Json => serde_json::from_str(text).context("failed to parse JSON configuration")?,
        };
        Ok(value)
    }
}

/// Read a configuration file into a raw, partial input
///
/// Expands `{{ env.VAR }}` placeholders before parsing.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, references an unset variable, or fails to parse
pub fn load_input(path: &Path) -> anyhow::Result<Value> {
    let format = InputFormat::from_path(path).with_context(|| {
        format!(
            "unsupported config file extension for {}, expected .toml or .json",
            path.display()
        )
    })?;

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let expanded = crate::env::expand_env(&raw).context("config variable expansion failed")?;
    let input = format.parse(&expanded)?;

    tracing::info!(path = %path.display(), ?format, "loaded configuration input");
    Ok(input)
}

impl ResolvedConfig {
    /// Load and resolve a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or does not resolve
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let input = load_input(path)?;
        let config = crate::resolve(&input)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;

    use super::*;
    use crate::{Gateway, ResolveError};

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("chat.config.toml")), Some(InputFormat::Toml));
        assert_eq!(InputFormat::from_path(Path::new("chat.config.JSON")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("chat.config.ts")), None);
        assert_eq!(InputFormat::from_path(Path::new("chat")), None);
    }

    #[test]
    fn loads_toml_with_env_placeholders() {
        let file = write_config(
            ".toml",
            indoc! {r#"
                appName = "{{ env.CHATJS_LOADER_NAME }}"
                # appUrl = "{{ env.CHATJS_LOADER_UNSET }}"

                [ai]
                gateway = "openai"

                [anonymous]
                credits = {{ env.CHATJS_LOADER_CREDITS | default("10") }}
                availableTools = []

                [anonymous.rateLimit]
                requestsPerMinute = 5
                requestsPerMonth = 10
            "#},
        );

        temp_env::with_vars(
            [
                ("CHATJS_LOADER_NAME", Some("Acme Chat")),
                ("CHATJS_LOADER_CREDITS", None),
                ("CHATJS_LOADER_UNSET", None),
            ],
            || {
                let config = ResolvedConfig::load(file.path()).unwrap();
                assert_eq!(config.app_name, "Acme Chat");
                assert_eq!(config.ai.gateway(), Gateway::Openai);
                assert_eq!(config.anonymous.credits, 10);
            },
        );
    }

    #[test]
    fn loads_json() {
        let file = write_config(
            ".json",
            indoc! {r#"
                {
                  "appPrefix": "acme",
                  "ai": { "gateway": "openrouter", "workflows": { "title": "openai/gpt-5-mini" } }
                }
            "#},
        );

        let config = ResolvedConfig::load(file.path()).unwrap();
        assert_eq!(config.app_prefix, "acme");
        assert_eq!(config.ai.settings().workflows.title, "openai/gpt-5-mini");
        assert_eq!(config.ai.settings().workflows.chat, "openai/gpt-5-mini");
    }

    #[test]
    fn unsupported_extension() {
        let file = write_config(".yaml", "appName: x\n");
        let err = load_input(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config file extension"));
    }

    #[test]
    fn missing_file() {
        let err = load_input(Path::new("/nonexistent/chat.config.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn resolution_errors_keep_their_type() {
        let file = write_config(".json", r#"{ "ai": { "gateway": "bedrock" } }"#);

        let err = ResolvedConfig::load(file.path()).unwrap_err();
        let resolve_error = err.downcast_ref::<ResolveError>().unwrap();
        assert!(matches!(resolve_error, ResolveError::UnknownGateway { .. }));
    }
}
