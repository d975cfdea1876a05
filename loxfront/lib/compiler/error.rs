use std::fmt::{self, Display};

use thiserror::Error;

use super::{Token, TokenKind};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An error found while scanning source text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error: {kind}")]
pub struct LexError {
    /// The 1-based line the error was found on
    pub line: usize,

    /// What went wrong
    pub kind: LexErrorKind,
}

/// The kinds of lexical errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),

    /// A string literal still open at the end of input
    #[error("Unterminated string.")]
    UnterminatedString,

    /// A number literal that does not fit in a finite `f64`
    #[error("Number literal too large.")]
    NumberTooLarge,
}

/// An error found while parsing a token stream.
///
/// The token is the one the parser was looking at when the grammar rule failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error{}: {message}", .token.line, location(.token))]
pub struct ParseError {
    /// The offending token
    pub token: Token,

    /// A human readable description of the problem
    pub message: String,
}

/// Every lexical and parse error reported for one source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    /// Errors reported by the lexer
    pub lex: Vec<LexError>,

    /// Errors reported by the parser
    pub parse: Vec<ParseError>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LexError {
    pub(crate) fn new(line: usize, kind: LexErrorKind) -> Self {
        Self { line, kind }
    }
}

impl ParseError {
    /// Creates a new parse error located at `token`.
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    /// The line of the offending token.
    pub fn line(&self) -> usize {
        self.token.line
    }

    /// The lexeme of the offending token. Empty at end of input.
    pub fn lexeme(&self) -> &str {
        &self.token.lexeme
    }
}

impl Diagnostics {
    /// Returns `true` if no errors were reported on either channel.
    pub fn is_empty(&self) -> bool {
        self.lex.is_empty() && self.parse.is_empty()
    }

    /// Total number of errors reported.
    pub fn len(&self) -> usize {
        self.lex.len() + self.parse.len()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn location(token: &Token) -> String {
    if token.is(TokenKind::Eof) {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lex = self.lex.iter().map(|e| e as &dyn Display);
        let parse = self.parse.iter().map(|e| e as &dyn Display);
        for (i, error) in lex.chain(parse).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let error = LexError::new(3, LexErrorKind::UnexpectedCharacter('@'));
        assert_eq!(error.to_string(), "[line 3] Error: Unexpected character '@'.");

        let error = LexError::new(1, LexErrorKind::UnterminatedString);
        assert_eq!(error.to_string(), "[line 1] Error: Unterminated string.");
    }

    #[test]
    fn test_parse_error_display() {
        let token = Token::new(TokenKind::Semicolon, ";", None, 2);
        let error = ParseError::new(token, "Expect expression.");
        assert_eq!(error.to_string(), "[line 2] Error at ';': Expect expression.");
        assert_eq!(error.line(), 2);
        assert_eq!(error.lexeme(), ";");

        let error = ParseError::new(Token::eof(5), "Expect ';' after value.");
        assert_eq!(error.to_string(), "[line 5] Error at end: Expect ';' after value.");
        assert_eq!(error.lexeme(), "");
    }

    #[test]
    fn test_diagnostics_display_joins_both_channels() {
        let diagnostics = Diagnostics {
            lex: vec![LexError::new(1, LexErrorKind::UnterminatedString)],
            parse: vec![ParseError::new(Token::eof(1), "Expect expression.")],
        };

        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics.is_empty());
        assert_eq!(
            diagnostics.to_string(),
            "[line 1] Error: Unterminated string.\n[line 1] Error at end: Expect expression."
        );
        assert!(Diagnostics::default().is_empty());
    }
}
