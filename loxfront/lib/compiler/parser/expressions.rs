use super::parser::{ParseResult, Parser, MAX_ARGUMENTS};
use crate::compiler::{Expr, LiteralValue, ParseError, Token, TokenKind};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A grammar rule producing an expression.
type Rule<'a> = fn(&mut Parser<'a>) -> ParseResult<Expr>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> Parser<'a> {
    /// Parses an expression, starting from the loosest binding rule.
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(Self::assignment)
    }

    /// Parses an assignment or anything that binds tighter.
    ///
    /// The target is parsed as an ordinary expression first and only converted once an `=`
    /// shows up, so `a.b.c = value` needs no extra lookahead.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if !self.match_kind(TokenKind::Equal) {
            return Ok(expr);
        }

        let equals = self.previous().clone();
        let value = self.nested(Self::assignment)?;

        match expr {
            Expr::Variable(variable) => Ok(Expr::assign(variable.name, value)),
            Expr::Get(get) => Ok(Expr::set(*get.object, get.name, value)),
            expr => {
                // Reported, not thrown: the parser is not confused about where it is
                self.report(ParseError::new(equals, "Invalid assignment target."));
                Ok(expr)
            }
        }
    }

    fn or(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[TokenKind::Or], Self::and, Expr::logical)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[TokenKind::And], Self::equality, Expr::logical)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.left_associative(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
            Expr::binary,
        )
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_associative(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
            Expr::binary,
        )
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.left_associative(
            &[TokenKind::Minus, TokenKind::Plus],
            Self::factor,
            Expr::binary,
        )
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.left_associative(
            &[TokenKind::Slash, TokenKind::Star],
            Self::unary,
            Expr::binary,
        )
    }

    /// Parses `operand (op operand)*`, folding each step into the expression on the left.
    ///
    /// `operand` must be a tighter rule than the caller.
    fn left_associative(
        &mut self,
        operators: &[TokenKind],
        operand: Rule<'a>,
        build: fn(Expr, Token, Expr) -> Expr,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = build(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, right));
        }

        self.call()
    }

    /// Parses a primary expression followed by any chain of calls and property accesses.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.match_kind(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_kind(TokenKind::Dot) {
                let name =
                    self.consume(TokenKind::Identifier, "Expect property name after '.'.")?;
                expr = Expr::get(expr, name);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses the argument list of a call whose `(` was already consumed.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGUMENTS {
                    let error = self.error_at_current("Can't have more than 255 arguments.");
                    self.report(error);
                }

                arguments.push(self.expression()?);

                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::call(callee, paren, arguments))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_kind(TokenKind::False) {
            return Ok(Expr::literal(false));
        }

        if self.match_kind(TokenKind::True) {
            return Ok(Expr::literal(true));
        }

        if self.match_kind(TokenKind::Nil) {
            return Ok(Expr::literal(LiteralValue::Nil));
        }

        if self.match_any(&[TokenKind::Number, TokenKind::String]) {
            let value = match self.previous().literal.clone() {
                Some(literal) => LiteralValue::from(literal),
                None => LiteralValue::Nil,
            };
            return Ok(Expr::literal(value));
        }

        if self.match_kind(TokenKind::Super) {
            let keyword = self.previous().clone();
            self.consume(TokenKind::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(TokenKind::Identifier, "Expect superclass method name.")?;
            return Ok(Expr::super_(keyword, method));
        }

        if self.match_kind(TokenKind::This) {
            return Ok(Expr::this(self.previous().clone()));
        }

        if self.match_kind(TokenKind::Identifier) {
            return Ok(Expr::variable(self.previous().clone()));
        }

        if self.match_kind(TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(expr));
        }

        Err(self.error_at_current("Expect expression."))
    }
}
