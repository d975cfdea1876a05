use std::path::{Path, PathBuf};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{CONFIG_ENV_VAR, DEFAULT_PROMPT};
use crate::{LoxfrontError, LoxfrontResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Settings for the `loxfront` command line driver.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// prompt = "lox> "
/// max_source_bytes = 1048576
/// emit = "tokens"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, TypedBuilder, PartialEq, Getters, CopyGetters)]
#[serde(default)]
pub struct DriverConfig {
    /// The prompt printed before each REPL line.
    #[builder(default = DEFAULT_PROMPT.to_string(), setter(transform = |prompt: impl AsRef<str>| prompt.as_ref().to_string()))]
    #[getset(get = "pub with_prefix")]
    pub(super) prompt: String,

    /// Sources larger than this many bytes are rejected before scanning.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    #[getset(get_copy = "pub with_prefix")]
    pub(super) max_source_bytes: Option<usize>,

    /// What to print for each source.
    #[builder(default)]
    #[getset(get_copy = "pub with_prefix")]
    pub(super) emit: Emit,
}

/// What the driver prints after a successful scan or parse.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// One token per line
    Tokens,

    /// The parsed program, printed back as source
    #[default]
    Ast,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DriverConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> LoxfrontResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads the configuration from `path`, or from the file named by `LOXFRONT_CONFIG`.
    ///
    /// Falls back to the defaults when neither is given.
    pub async fn load(path: Option<&Path>) -> LoxfrontResult<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        };

        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        tracing::debug!(path = %path.display(), "loading config");
        let text = tokio::fs::read_to_string(&path).await?;
        Self::from_toml(&text)
    }

    /// Replaces the emit mode when `emit` is given.
    pub fn with_emit(mut self, emit: Option<Emit>) -> Self {
        if let Some(emit) = emit {
            self.emit = emit;
        }
        self
    }

    /// Checks `source` against the configured size limit.
    pub fn check_source_size(&self, source: &str) -> LoxfrontResult<()> {
        match self.max_source_bytes {
            Some(limit) if source.len() > limit => Err(LoxfrontError::SourceTooLarge {
                size: source.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for DriverConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.get_prompt(), DEFAULT_PROMPT);
        assert_eq!(config.get_max_source_bytes(), None);
        assert_eq!(config.get_emit(), Emit::Ast);
    }

    #[test]
    fn test_from_toml() -> anyhow::Result<()> {
        let config = DriverConfig::from_toml(
            r#"
            prompt = "lox> "
            max_source_bytes = 16
            emit = "tokens"
            "#,
        )?;

        assert_eq!(
            config,
            DriverConfig::builder()
                .prompt("lox> ")
                .max_source_bytes(16)
                .emit(Emit::Tokens)
                .build()
        );

        let partial = DriverConfig::from_toml("emit = \"ast\"")?;
        assert_eq!(partial, DriverConfig::default());

        Ok(())
    }

    #[test]
    fn test_from_toml_rejects_unknown_emit() {
        let error = DriverConfig::from_toml("emit = \"bytecode\"").unwrap_err();
        assert!(matches!(error, LoxfrontError::Config(_)));
    }

    #[test]
    fn test_with_emit_override() {
        let config = DriverConfig::default().with_emit(Some(Emit::Tokens));
        assert_eq!(config.get_emit(), Emit::Tokens);

        let config = config.with_emit(None);
        assert_eq!(config.get_emit(), Emit::Tokens);
    }

    #[test]
    fn test_check_source_size() {
        let config = DriverConfig::builder().max_source_bytes(4).build();
        assert!(config.check_source_size("1234").is_ok());
        assert!(matches!(
            config.check_source_size("12345"),
            Err(LoxfrontError::SourceTooLarge { size: 5, limit: 4 })
        ));
        assert!(DriverConfig::default().check_source_size("anything").is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn test_load_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("loxfront.toml");
        tokio::fs::write(&path, "prompt = \">> \"\n").await?;

        let config = DriverConfig::load(Some(path.as_path())).await?;
        assert_eq!(config.get_prompt(), ">> ");
        assert_eq!(config.get_emit(), Emit::Ast);

        Ok(())
    }
}
