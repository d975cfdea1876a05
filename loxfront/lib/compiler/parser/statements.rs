use super::parser::{ParseResult, Parser, MAX_ARGUMENTS};
use crate::compiler::{ClassStmt, Expr, FunctionStmt, LiteralValue, Stmt, TokenKind, VariableExpr};

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Parser<'_> {
    /// Parses a declaration, recovering from any error inside it.
    ///
    /// Returns `None` when the declaration failed; the error has been recorded and the parser
    /// has moved on to the next statement boundary.
    pub(super) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_kind(TokenKind::Class) {
            self.class_declaration()
        } else if self.match_kind(TokenKind::Fun) {
            self.function("function").map(Stmt::Function)
        } else if self.match_kind(TokenKind::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.recover(error);
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?;

        let superclass = if self.match_kind(TokenKind::Less) {
            let name = self.consume(TokenKind::Identifier, "Expect superclass name.")?;
            Some(VariableExpr { name })
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassStmt {
            name,
            superclass,
            methods,
        }))
    }

    /// Parses the part of a function or method declaration after `fun`.
    ///
    /// Each function body counts as one level of nesting.
    fn function(&mut self, kind: &str) -> ParseResult<FunctionStmt> {
        self.nested(|parser| parser.function_body(kind))
    }

    fn function_body(&mut self, kind: &str) -> ParseResult<FunctionStmt> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name."))?;
        self.consume(
            TokenKind::LeftParen,
            &format!("Expect '(' after {kind} name."),
        )?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARGUMENTS {
                    let error = self.error_at_current("Can't have more than 255 parameters.");
                    self.report(error);
                }

                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?);

                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(
            TokenKind::LeftBrace,
            &format!("Expect '{{' before {kind} body."),
        )?;

        let body = self.block()?;

        Ok(FunctionStmt { name, params, body })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.match_kind(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::var(name, initializer))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        self.nested(|parser| {
            if parser.match_kind(TokenKind::For) {
                parser.for_statement()
            } else if parser.match_kind(TokenKind::If) {
                parser.if_statement()
            } else if parser.match_kind(TokenKind::Print) {
                parser.print_statement()
            } else if parser.match_kind(TokenKind::Return) {
                parser.return_statement()
            } else if parser.match_kind(TokenKind::While) {
                parser.while_statement()
            } else if parser.match_kind(TokenKind::LeftBrace) {
                Ok(Stmt::block(parser.block()?))
            } else {
                parser.expression_statement()
            }
        })
    }

    /// Parses a `for` loop into the equivalent block and `while` loop.
    ///
    /// `for (init; cond; incr) body` becomes `{ init; while (cond) { body; incr; } }`, with the
    /// condition defaulting to `true` and the wrappers left out when a clause is missing.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.match_kind(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::block(vec![body, Stmt::expression(increment)]);
        }

        let condition = condition.unwrap_or_else(|| Expr::literal(LiteralValue::Bool(true)));
        body = Stmt::while_(condition, body);

        if let Some(initializer) = initializer {
            body = Stmt::block(vec![initializer, body]);
        }

        Ok(body)
    }

    /// Parses an `if` statement together with any `else if` links that follow it.
    ///
    /// The links are parsed in a loop rather than by recursion, then folded into nested `If`
    /// nodes. Each link still counts as one level of nesting in the resulting tree.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.keeping_depth(Self::if_chain)
    }

    fn if_chain(&mut self) -> ParseResult<Stmt> {
        let (condition, then_branch) = self.if_branch()?;

        let mut links = Vec::new();
        let mut else_branch = None;
        while self.match_kind(TokenKind::Else) {
            if !self.match_kind(TokenKind::If) {
                else_branch = Some(self.statement()?);
                break;
            }

            self.descend()?;
            links.push(self.if_branch()?);
        }

        for (condition, then_branch) in links.into_iter().rev() {
            else_branch = Some(Stmt::if_(condition, then_branch, else_branch));
        }

        Ok(Stmt::if_(condition, then_branch, else_branch))
    }

    /// Parses `(condition) statement`, the part of an `if` after the keyword.
    fn if_branch(&mut self) -> ParseResult<(Expr, Stmt)> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = self.statement()?;
        Ok((condition, then_branch))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::print(value))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::return_(keyword, value))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;

        let body = self.statement()?;
        Ok(Stmt::while_(condition, body))
    }

    /// Parses the declarations of a block whose `{` was already consumed.
    ///
    /// Errors inside the block are recovered from declaration by declaration. Only a missing
    /// closing brace fails the block itself.
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::expression(expr))
    }
}
