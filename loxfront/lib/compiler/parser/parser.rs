use crate::compiler::{ParseError, Stmt, Token, TokenKind};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The maximum number of arguments in a call, and of parameters in a function declaration.
pub const MAX_ARGUMENTS: usize = 255;

/// The maximum depth of nested expressions, statements and function bodies.
///
/// Recursive descent uses the native stack, so deeper input is reported as an error instead of
/// being followed. The first such error ends the parse.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Stack size of the thread a parse runs on, enough for [`MAX_NESTING_DEPTH`] levels of the
/// deepest rule chain in unoptimized builds.
const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a single grammar rule.
pub(super) type ParseResult<T> = Result<T, ParseError>;

/// A recursive descent parser that turns a token stream into a list of statements.
///
/// The parser walks the tokens with a single cursor and never backtracks. When a grammar rule
/// fails, the error is recorded and the parser skips ahead to the next statement boundary, so
/// one pass reports every independent error in the source.
///
/// ## Examples
///
/// ```
/// use loxfront::compiler::{scan, Parser};
///
/// let scanned = scan("var answer = 42;");
/// let parsed = Parser::new(&scanned.tokens).parse();
/// assert!(parsed.errors.is_empty());
/// assert_eq!(parsed.statements.len(), 1);
/// ```
pub struct Parser<'a> {
    /// The tokens being parsed. Read only.
    tokens: &'a [Token],

    /// Index of the next token to be consumed
    current: usize,

    /// Current nesting depth of expressions and statements
    depth: usize,

    /// Set when the nesting limit was hit
    too_deep: bool,

    /// Set once the parse was stopped. No further errors are recorded after that.
    halted: bool,

    /// Stands in for a missing `Eof` at the end of `tokens`
    eof: Token,

    /// Errors collected so far
    pub(super) errors: Vec<ParseError>,
}

/// The output of a full parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Top level statements. Not safe to evaluate unless `errors` is empty.
    pub statements: Vec<Stmt>,

    /// Parse errors in source order. Empty on success.
    pub errors: Vec<ParseError>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`, which should end with an `Eof` token.
    pub fn new(tokens: &'a [Token]) -> Self {
        let line = tokens.last().map_or(1, |token| token.line);
        Self {
            tokens,
            current: 0,
            depth: 0,
            too_deep: false,
            halted: false,
            eof: Token::eof(line),
            errors: Vec::new(),
        }
    }

    /// Parses the whole token stream.
    ///
    /// Statements that failed to parse are left out of the result; their errors are returned
    /// alongside the statements that did parse.
    ///
    /// The parse runs on a scoped thread with a stack sized for [`MAX_NESTING_DEPTH`], so the
    /// nesting limit does not depend on the caller's stack.
    pub fn parse(self) -> Parsed {
        let tokens = self.tokens;
        std::thread::scope(|scope| {
            let spawned = std::thread::Builder::new()
                .name("loxfront-parser".to_string())
                .stack_size(PARSER_STACK_SIZE)
                .spawn_scoped(scope, move || self.parse_program());

            match spawned {
                Ok(handle) => match handle.join() {
                    Ok(parsed) => parsed,
                    Err(panic) => std::panic::resume_unwind(panic),
                },
                Err(error) => {
                    tracing::warn!(%error, "could not spawn parser thread, parsing in place");
                    Parser::new(tokens).parse_program()
                }
            }
        })
    }

    fn parse_program(mut self) -> Parsed {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        tracing::trace!(
            statements = statements.len(),
            errors = self.errors.len(),
            "finished parsing"
        );

        Parsed {
            statements,
            errors: self.errors,
        }
    }

    /// Records an error without interrupting the current rule.
    pub(super) fn report(&mut self, error: ParseError) {
        if self.halted {
            return;
        }

        tracing::debug!(line = error.line(), message = %error.message, "parse error");
        self.errors.push(error);
    }

    /// Recovers from a failed declaration.
    ///
    /// After a nesting error the remaining tokens cannot be matched up reliably, so the parser
    /// records that one error and skips to the end of input.
    pub(super) fn recover(&mut self, error: ParseError) {
        self.report(error);

        if self.too_deep {
            self.halted = true;
            self.current = self.tokens.len();
            tracing::debug!("nesting limit reached, parse stopped");
        } else {
            self.synchronize();
        }
    }

    /// Skips tokens until the start of the next statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().is(TokenKind::Semicolon) || self.peek().kind.begins_statement() {
                break;
            }
            self.advance();
        }

        tracing::trace!(line = self.peek().line, "synchronized after parse error");
    }

    /// Runs `rule` one level deeper, failing once the nesting limit is reached.
    pub(super) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.keeping_depth(|parser| {
            parser.descend()?;
            rule(parser)
        })
    }

    /// Runs `rule` and returns to the current depth afterwards, however deep `rule` went.
    pub(super) fn keeping_depth<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let depth = self.depth;
        let result = rule(self);
        self.depth = depth;
        result
    }

    /// Goes one level deeper, failing once the nesting limit is reached.
    ///
    /// Only valid inside [`Parser::keeping_depth`], which undoes it.
    pub(super) fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.too_deep = true;
            return Err(self.error_at_current("Too much nesting."));
        }

        self.depth += 1;
        Ok(())
    }

    /// Consumes the current token if it is any of `kinds`.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is of `kind`.
    pub(super) fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.match_any(&[kind])
    }

    /// Consumes a token of `kind` or fails with `message`.
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Returns `true` if the current token is of `kind`. Never matches at end of input.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().is(kind)
    }

    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    pub(super) fn previous(&self) -> &Token {
        match self.current.checked_sub(1) {
            Some(index) => self.tokens.get(index).unwrap_or(&self.eof),
            None => self.peek(),
        }
    }

    /// Builds an error located at the current token.
    pub(super) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError::new(self.peek().clone(), message)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parses `tokens` into a list of statements.
///
/// This is shorthand for `Parser::new(tokens).parse()`.
pub fn parse(tokens: &[Token]) -> Parsed {
    Parser::new(tokens).parse()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{scan, Expr, LiteralValue};

    fn parse_str(source: &str) -> Parsed {
        let scanned = scan(source);
        assert!(scanned.errors.is_empty(), "lex errors: {:?}", scanned.errors);
        parse(&scanned.tokens)
    }

    fn messages(parsed: &Parsed) -> Vec<&str> {
        parsed.errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_empty_program() {
        let parsed = parse_str("");
        assert!(parsed.statements.is_empty());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_missing_eof_is_tolerated() {
        let mut tokens = scan("print 1;").tokens;
        tokens.pop();

        let parsed = parse(&tokens);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.statements.len(), 1);

        let parsed = parse(&[]);
        assert!(parsed.statements.is_empty());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_synchronizes_after_missing_initializer() {
        let parsed = parse_str("var x = ;\nprint 1;");

        assert_eq!(messages(&parsed), vec!["Expect expression."]);
        assert_eq!(parsed.errors[0].line(), 1);
        assert_eq!(parsed.errors[0].lexeme(), ";");
        assert_eq!(parsed.statements.len(), 1);
        assert!(matches!(parsed.statements[0], Stmt::Print(_)));
    }

    #[test]
    fn test_reports_independent_errors_in_one_pass() {
        let parsed = parse_str("print ;\nvar = 2;\nprint (1;\nvar ok = true;");

        assert_eq!(
            messages(&parsed),
            vec![
                "Expect expression.",
                "Expect variable name.",
                "Expect ')' after expression.",
            ]
        );
        let lines: Vec<usize> = parsed.errors.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert_eq!(parsed.statements.len(), 1);
    }

    #[test]
    fn test_synchronize_stops_before_statement_keyword() {
        // No semicolon before `print`; recovery resumes at the keyword
        let parsed = parse_str("1 + + 2 print 3;");

        assert_eq!(messages(&parsed), vec!["Expect expression."]);
        assert_eq!(parsed.statements.len(), 1);
        assert!(matches!(parsed.statements[0], Stmt::Print(_)));
    }

    #[test]
    fn test_error_at_end() {
        let parsed = parse_str("print 1");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(
            parsed.errors[0].to_string(),
            "[line 1] Error at end: Expect ';' after value."
        );
    }

    #[test]
    fn test_deep_nesting_within_limit() {
        let depth = 50;
        let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
        let parsed = parse_str(&source);
        assert!(parsed.errors.is_empty());

        let Stmt::Expression(stmt) = &parsed.statements[0] else {
            panic!("expected expression statement");
        };

        let mut expr = &stmt.expression;
        let mut groupings = 0;
        while let Expr::Grouping(grouping) = expr {
            groupings += 1;
            expr = &grouping.expression;
        }
        assert_eq!(groupings, depth);
        assert!(matches!(expr, Expr::Literal(l) if l.value == LiteralValue::Number(1.0)));
    }

    #[test]
    fn test_excessive_nesting_is_an_error() {
        let depth = 10_000;
        let source = format!("{}1{};\nprint 2;", "(".repeat(depth), ")".repeat(depth));
        let parsed = parse_str(&source);

        // The parse stops at the first nesting error, without follow-up errors
        assert_eq!(messages(&parsed), vec!["Too much nesting."]);
        assert!(parsed.statements.is_empty());

        let source = format!("{}x;", "-".repeat(depth));
        let parsed = parse_str(&source);
        assert_eq!(messages(&parsed), vec!["Too much nesting."]);
    }

    #[test]
    fn test_deeply_nested_blocks_terminate() {
        let depth = 1_000;
        let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let parsed = parse_str(&source);

        assert_eq!(messages(&parsed), vec!["Too much nesting."]);
    }

    #[test]
    fn test_deeply_nested_functions_terminate() {
        let depth = 20_000;
        let source = format!("{}{}", "fun f() {".repeat(depth), "}".repeat(depth));
        let parsed = parse_str(&source);

        assert_eq!(messages(&parsed), vec!["Too much nesting."]);

        let source = format!("{}{}", "class A { m() {".repeat(depth), "} }".repeat(depth));
        let parsed = parse_str(&source);
        assert_eq!(messages(&parsed), vec!["Too much nesting."]);
    }

    #[test]
    fn test_nested_blocks_within_limit() {
        let depth = 100;
        let source = format!("{}print 1;{}", "{ ".repeat(depth), " }".repeat(depth));
        let parsed = parse_str(&source);
        assert!(parsed.errors.is_empty(), "{:?}", messages(&parsed));

        let mut statement = &parsed.statements[0];
        let mut blocks = 0;
        while let Stmt::Block(block) = statement {
            blocks += 1;
            statement = &block.statements[0];
        }
        assert_eq!(blocks, depth);
        assert!(matches!(statement, Stmt::Print(_)));
    }

    #[test]
    fn test_long_else_if_chain() {
        let links = 100;
        let mut source = String::from("if (x == 0) print 0;");
        for i in 1..links {
            source.push_str(&format!(" else if (x == {i}) print {i};"));
        }
        source.push_str(" else print -1;");

        let parsed = parse_str(&source);
        assert!(parsed.errors.is_empty(), "{:?}", messages(&parsed));
        assert_eq!(parsed.statements.len(), 1);

        let mut statement = &parsed.statements[0];
        let mut ifs = 0;
        while let Stmt::If(stmt) = statement {
            ifs += 1;
            assert!(matches!(stmt.then_branch.as_ref(), Stmt::Print(_)));
            match stmt.else_branch.as_deref() {
                Some(else_branch) => statement = else_branch,
                None => panic!("every link has an else branch"),
            }
        }
        assert_eq!(ifs, links);
        assert!(matches!(statement, Stmt::Print(_)));
    }

    #[test]
    fn test_else_binds_to_nearest_if_in_chain() {
        let parsed = parse_str("if (a) print 1; else if (b) if (c) print 2; else print 3;");
        assert!(parsed.errors.is_empty());

        let Stmt::If(outer) = &parsed.statements[0] else {
            panic!("expected an if statement");
        };
        let Some(Stmt::If(link)) = outer.else_branch.as_deref() else {
            panic!("expected an else if link");
        };
        assert!(link.else_branch.is_none());
        assert!(matches!(
            link.then_branch.as_ref(),
            Stmt::If(inner) if inner.else_branch.is_some()
        ));
    }
}
