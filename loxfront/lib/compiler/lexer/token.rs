use std::fmt::{self, Display};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A token produced by the lexer.
///
/// Tokens own their lexeme so that syntax trees built from them never borrow from the source
/// text they were scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of this token
    pub kind: TokenKind,

    /// The exact source text that produced this token
    pub lexeme: String,

    /// The literal value carried by string and number tokens
    pub literal: Option<Literal>,

    /// The 1-based line the token started on
    pub line: usize,
}

/// The literal value attached to a `String` or `Number` token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Contents of a string literal, without the surrounding quotes
    String(String),
    /// A number literal; all Lox numbers are double precision floats
    Number(f64),
}

/// Represents the different types of tokens that can appear in Lox source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens
    /// Opening parenthesis: `(`
    LeftParen,
    /// Closing parenthesis: `)`
    RightParen,
    /// Opening curly brace: `{`
    LeftBrace,
    /// Closing curly brace: `}`
    RightBrace,
    /// Comma: `,`
    Comma,
    /// Dot: `.`
    Dot,
    /// Minus: `-`
    Minus,
    /// Plus: `+`
    Plus,
    /// Statement terminator: `;`
    Semicolon,
    /// Division: `/`
    Slash,
    /// Multiplication: `*`
    Star,

    // One or two character tokens
    /// Logical NOT: `!`
    Bang,
    /// Inequality: `!=`
    BangEqual,
    /// Assignment: `=`
    Equal,
    /// Equality: `==`
    EqualEqual,
    /// Greater than: `>`
    Greater,
    /// Greater than or equal: `>=`
    GreaterEqual,
    /// Less than: `<`
    Less,
    /// Less than or equal: `<=`
    LessEqual,

    // Literals
    /// Identifiers: `name`, `_count`
    Identifier,
    /// String literals: `"hello"`
    String,
    /// Number literals: `42`, `3.14`
    Number,

    // Keywords
    /// `and`
    And,
    /// `class`
    Class,
    /// `else`
    Else,
    /// `false`
    False,
    /// `fun`
    Fun,
    /// `for`
    For,
    /// `if`
    If,
    /// `nil`
    Nil,
    /// `or`
    Or,
    /// `print`
    Print,
    /// `return`
    Return,
    /// `super`
    Super,
    /// `this`
    This,
    /// `true`
    True,
    /// `var`
    Var,
    /// `while`
    While,

    /// End of file marker
    Eof,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Token {
    /// Creates a new token.
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// Creates the end of file token for the given line.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", None, line)
    }

    /// Returns `true` if this token is of the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl TokenKind {
    /// Looks up the keyword spelled exactly as `text`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use loxfront::compiler::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("class"), Some(TokenKind::Class));
    /// assert_eq!(TokenKind::keyword("classic"), None);
    /// ```
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        };

        Some(kind)
    }

    /// Returns `true` for tokens that start a declaration or statement.
    ///
    /// The parser resumes at these tokens after recovering from an error.
    pub fn begins_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, " {}", literal),
            None => write!(f, " nil"),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(value) => write!(f, "{}", value),
            Literal::Number(value) => write!(f, "{}", value),
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
    fn test_keyword_lookup_requires_exact_match() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::keyword("whiles"), None);
        assert_eq!(TokenKind::keyword("Class"), None);
        assert_eq!(TokenKind::keyword(""), None);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Number, "1.5", Some(Literal::Number(1.5)), 1);
        assert_eq!(token.to_string(), "Number 1.5 1.5");

        let token = Token::new(TokenKind::Semicolon, ";", None, 3);
        assert_eq!(token.to_string(), "Semicolon ; nil");

        assert_eq!(Token::eof(7).to_string(), "Eof  nil");
    }
}
