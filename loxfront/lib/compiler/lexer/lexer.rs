use super::token::{Literal, Token, TokenKind};
use crate::compiler::{LexError, LexErrorKind};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A lexical analyzer (lexer) that converts Lox source code into a sequence of tokens.
///
/// The lexer makes a single forward pass over the source, one character at a time. It handles:
/// - Punctuation and one or two character operators
/// - Keywords and identifiers
/// - Number and string literals
/// - Line comments and whitespace
///
/// Errors do not stop the scan. They are collected so that every lexical problem in the source
/// is reported at once.
///
/// ## Fields
///
/// * `source` - The input source code being lexed
/// * `start` - Starting position of the current lexeme (in bytes)
/// * `pos` - Current position in the source text (in bytes)
/// * `line` - Current line number (1-based)
/// * `start_line` - Line the current lexeme started on
///
/// ## Examples
///
/// ```
/// use loxfront::compiler::{Lexer, TokenKind};
///
/// let scanned = Lexer::new("var x = 42;").scan_tokens();
/// assert!(scanned.errors.is_empty());
/// assert_eq!(scanned.tokens[0].kind, TokenKind::Var);
/// ```
pub struct Lexer<'a> {
    /// Source code being lexed
    source: &'a str,

    /// Start of current lexeme (in bytes)
    start: usize,

    /// Current position in source (in bytes)
    pos: usize,

    /// Current line number (1-based)
    line: usize,

    /// Line the current lexeme started on
    start_line: usize,

    /// Tokens scanned so far
    tokens: Vec<Token>,

    /// Errors collected so far
    errors: Vec<LexError>,
}

/// The output of a full scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    /// The tokens, always terminated by exactly one `Eof` token
    pub tokens: Vec<Token>,

    /// Lexical errors in source order. Empty on success.
    pub errors: Vec<LexError>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            pos: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source and returns the tokens together with any lexical errors.
    ///
    /// ## Examples
    ///
    /// ```
    /// use loxfront::compiler::{Lexer, TokenKind};
    ///
    /// let scanned = Lexer::new("1 + 2 * 3").scan_tokens();
    /// let kinds: Vec<_> = scanned.tokens.iter().map(|t| t.kind).collect();
    /// assert_eq!(
    ///     kinds,
    ///     vec![
    ///         TokenKind::Number,
    ///         TokenKind::Plus,
    ///         TokenKind::Number,
    ///         TokenKind::Star,
    ///         TokenKind::Number,
    ///         TokenKind::Eof,
    ///     ]
    /// );
    /// ```
    pub fn scan_tokens(mut self) -> Scanned {
        while !self.is_at_end() {
            self.start = self.pos;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));

        tracing::trace!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "finished scanning source"
        );

        Scanned {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Single character tokens
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            // One or two character tokens
            '!' => self.operator_with_equal(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.operator_with_equal(TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.operator_with_equal(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.operator_with_equal(TokenKind::GreaterEqual, TokenKind::Greater),

            // Comments or division
            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            // Whitespace. Newlines are counted in `advance`.
            ' ' | '\t' | '\r' | '\n' => {}

            '"' => self.string(),
            '0'..='9' => self.number(),
            c if is_identifier_start(c) => self.identifier(),

            c => self.error(LexErrorKind::UnexpectedCharacter(c)),
        }
    }

    /// Emits `matched` if the next character is `=`, otherwise `single`.
    fn operator_with_equal(&mut self, matched: TokenKind, single: TokenKind) {
        if self.match_char('=') {
            self.add_token(matched);
        } else {
            self.add_token(single);
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Handles string literals. Lox strings have no escape sequences and may span lines.
    fn string(&mut self) {
        loop {
            match self.peek() {
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
                None => {
                    self.error(LexErrorKind::UnterminatedString);
                    return;
                }
            }
        }

        self.advance(); // Consume closing quote

        let value = &self.source[self.start + 1..self.pos - 1];
        self.add_literal_token(TokenKind::String, Literal::String(value.to_string()));
    }

    /// Handles number literals: an integer part and an optional fractional part.
    ///
    /// The `.` is only consumed when a digit follows it, so `3.` scans as a number and a dot.
    /// Literals that overflow to infinity are reported and dropped from the token stream.
    fn number(&mut self) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // Consume .
            self.consume_digits();
        }

        match self.source[self.start..self.pos].parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.add_literal_token(TokenKind::Number, Literal::Number(value))
            }
            _ => self.error(LexErrorKind::NumberTooLarge),
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Handles identifiers and keywords.
    fn identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }

        let text = &self.source[self.start..self.pos];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    /// Get the next character without advancing
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Get character at offset without advancing
    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(offset)
    }

    /// Advance the lexer position
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Advance only if the next character is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = &self.source[self.start..self.pos];
        self.tokens.push(Token::new(kind, lexeme, None, self.start_line));
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = &self.source[self.start..self.pos];
        let token = Token::new(kind, lexeme, Some(literal), self.start_line);
        self.tokens.push(token);
    }

    fn error(&mut self, kind: LexErrorKind) {
        tracing::debug!(line = self.start_line, %kind, "lexical error");
        self.errors.push(LexError::new(self.start_line, kind));
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Scans `source` into tokens.
///
/// This is shorthand for `Lexer::new(source).scan_tokens()`.
pub fn scan(source: &str) -> Scanned {
    Lexer::new(source).scan_tokens()
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
