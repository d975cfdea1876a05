use thiserror::Error;

use crate::compiler::Diagnostics;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a loxfront-related operation.
pub type LoxfrontResult<T> = Result<T, LoxfrontError>;

/// An error that occurred while reading, scanning or parsing Lox source.
#[derive(pretty_error_debug::Debug, Error)]
pub enum LoxfrontError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The source had lexical or parse errors.
    #[error("{0}")]
    Syntax(Diagnostics),

    /// The source is larger than the configured limit.
    #[error("source is {size} bytes, larger than the limit of {limit} bytes")]
    SourceTooLarge {
        /// Size of the source in bytes
        size: usize,

        /// The configured limit in bytes
        limit: usize,
    },
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LoxfrontError {
    /// Returns the diagnostics if this is a syntax error.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            LoxfrontError::Syntax(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_only_for_syntax_errors() {
        let error = LoxfrontError::Syntax(Diagnostics::default());
        assert!(error.diagnostics().is_some_and(Diagnostics::is_empty));

        let error = LoxfrontError::Io(std::io::Error::other("boom"));
        assert!(error.diagnostics().is_none());
        assert_eq!(error.to_string(), "io error: boom");
    }

    #[test]
    fn test_source_too_large_display() {
        let error = LoxfrontError::SourceTooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            error.to_string(),
            "source is 2048 bytes, larger than the limit of 1024 bytes"
        );
    }
}
