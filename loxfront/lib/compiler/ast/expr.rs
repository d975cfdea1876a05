use std::fmt::{self, Display};

use crate::compiler::{Literal, Token};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An expression node.
///
/// The set of variants is closed and mirrors the expression grammar. Each variant wraps its own
/// node type so that visitors receive fully typed nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Variable assignment: `name = value`
    Assign(AssignExpr),
    /// Arithmetic, comparison and equality: `left op right`
    Binary(BinaryExpr),
    /// Function or method invocation: `callee(args...)`
    Call(CallExpr),
    /// Property access: `object.name`
    Get(GetExpr),
    /// Parenthesized expression: `(expression)`
    Grouping(GroupingExpr),
    /// Constant value
    Literal(LiteralExpr),
    /// Short-circuiting `and` / `or`
    Logical(LogicalExpr),
    /// Property assignment: `object.name = value`
    Set(SetExpr),
    /// Superclass method reference: `super.method`
    Super(SuperExpr),
    /// Current instance reference: `this`
    This(ThisExpr),
    /// Negation or logical not: `-right`, `!right`
    Unary(UnaryExpr),
    /// Identifier reference
    Variable(VariableExpr),
}

/// Variable assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    /// The variable being assigned
    pub name: Token,
    /// The assigned value
    pub value: Box<Expr>,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand
    pub left: Box<Expr>,
    /// The operator token
    pub operator: Token,
    /// Right operand
    pub right: Box<Expr>,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// The expression being called
    pub callee: Box<Expr>,
    /// The closing parenthesis, kept to locate runtime errors
    pub paren: Token,
    /// Arguments in source order
    pub arguments: Vec<Expr>,
}

/// Property access.
#[derive(Debug, Clone, PartialEq)]
pub struct GetExpr {
    /// The object whose property is read
    pub object: Box<Expr>,
    /// The property name
    pub name: Token,
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    /// The inner expression
    pub expression: Box<Expr>,
}

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    /// The constant value
    pub value: LiteralValue,
}

/// A short-circuiting logical operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    /// Left operand
    pub left: Box<Expr>,
    /// The `and` or `or` token
    pub operator: Token,
    /// Right operand
    pub right: Box<Expr>,
}

/// Property assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    /// The object whose property is written
    pub object: Box<Expr>,
    /// The property name
    pub name: Token,
    /// The assigned value
    pub value: Box<Expr>,
}

/// A superclass method reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperExpr {
    /// The `super` token
    pub keyword: Token,
    /// The method name
    pub method: Token,
}

/// A reference to the current instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpr {
    /// The `this` token
    pub keyword: Token,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// The `!` or `-` token
    pub operator: Token,
    /// The operand
    pub right: Box<Expr>,
}

/// A variable reference.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    /// The variable name
    pub name: Token,
}

/// The value of a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `nil`
    Nil,
    /// `true` or `false`
    Bool(bool),
    /// A number
    Number(f64),
    /// A string, without quotes
    String(String),
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// An operation defined over every expression variant.
///
/// Implementors get one method per node type and are dispatched to through [`Expr::accept`].
pub trait ExprVisitor<R> {
    /// Visit an assignment
    fn visit_assign_expr(&mut self, expr: &AssignExpr) -> R;

    /// Visit a binary operation
    fn visit_binary_expr(&mut self, expr: &BinaryExpr) -> R;

    /// Visit a call
    fn visit_call_expr(&mut self, expr: &CallExpr) -> R;

    /// Visit a property access
    fn visit_get_expr(&mut self, expr: &GetExpr) -> R;

    /// Visit a parenthesized expression
    fn visit_grouping_expr(&mut self, expr: &GroupingExpr) -> R;

    /// Visit a literal
    fn visit_literal_expr(&mut self, expr: &LiteralExpr) -> R;

    /// Visit a logical operation
    fn visit_logical_expr(&mut self, expr: &LogicalExpr) -> R;

    /// Visit a property assignment
    fn visit_set_expr(&mut self, expr: &SetExpr) -> R;

    /// Visit a superclass method reference
    fn visit_super_expr(&mut self, expr: &SuperExpr) -> R;

    /// Visit a `this` reference
    fn visit_this_expr(&mut self, expr: &ThisExpr) -> R;

    /// Visit a unary operation
    fn visit_unary_expr(&mut self, expr: &UnaryExpr) -> R;

    /// Visit a variable reference
    fn visit_variable_expr(&mut self, expr: &VariableExpr) -> R;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Expr {
    /// Dispatches to the visitor method for this variant.
    pub fn accept<R, V>(&self, visitor: &mut V) -> R
    where
        V: ExprVisitor<R> + ?Sized,
    {
        match self {
            Expr::Assign(expr) => visitor.visit_assign_expr(expr),
            Expr::Binary(expr) => visitor.visit_binary_expr(expr),
            Expr::Call(expr) => visitor.visit_call_expr(expr),
            Expr::Get(expr) => visitor.visit_get_expr(expr),
            Expr::Grouping(expr) => visitor.visit_grouping_expr(expr),
            Expr::Literal(expr) => visitor.visit_literal_expr(expr),
            Expr::Logical(expr) => visitor.visit_logical_expr(expr),
            Expr::Set(expr) => visitor.visit_set_expr(expr),
            Expr::Super(expr) => visitor.visit_super_expr(expr),
            Expr::This(expr) => visitor.visit_this_expr(expr),
            Expr::Unary(expr) => visitor.visit_unary_expr(expr),
            Expr::Variable(expr) => visitor.visit_variable_expr(expr),
        }
    }

    /// Creates an assignment.
    pub fn assign(name: Token, value: Expr) -> Self {
        Expr::Assign(AssignExpr {
            name,
            value: Box::new(value),
        })
    }

    /// Creates a binary operation.
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Creates a call.
    pub fn call(callee: Expr, paren: Token, arguments: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    /// Creates a property access.
    pub fn get(object: Expr, name: Token) -> Self {
        Expr::Get(GetExpr {
            object: Box::new(object),
            name,
        })
    }

    /// Creates a parenthesized expression.
    pub fn grouping(expression: Expr) -> Self {
        Expr::Grouping(GroupingExpr {
            expression: Box::new(expression),
        })
    }

    /// Creates a literal.
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Expr::Literal(LiteralExpr {
            value: value.into(),
        })
    }

    /// Creates a logical operation.
    pub fn logical(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Logical(LogicalExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Creates a property assignment.
    pub fn set(object: Expr, name: Token, value: Expr) -> Self {
        Expr::Set(SetExpr {
            object: Box::new(object),
            name,
            value: Box::new(value),
        })
    }

    /// Creates a superclass method reference.
    pub fn super_(keyword: Token, method: Token) -> Self {
        Expr::Super(SuperExpr { keyword, method })
    }

    /// Creates a `this` reference.
    pub fn this(keyword: Token) -> Self {
        Expr::This(ThisExpr { keyword })
    }

    /// Creates a unary operation.
    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator,
            right: Box::new(right),
        })
    }

    /// Creates a variable reference.
    pub fn variable(name: Token) -> Self {
        Expr::Variable(VariableExpr { name })
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<Literal> for LiteralValue {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::String(value) => LiteralValue::String(value),
            Literal::Number(value) => LiteralValue::Number(value),
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => write!(f, "nil"),
            LiteralValue::Bool(value) => write!(f, "{}", value),
            LiteralValue::Number(value) => write!(f, "{}", value),
            LiteralValue::String(value) => write!(f, "{}", value),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::TokenKind;

    /// Counts nodes, to check that `accept` reaches every child through the visitor.
    struct NodeCounter;

    impl ExprVisitor<usize> for NodeCounter {
        fn visit_assign_expr(&mut self, expr: &AssignExpr) -> usize {
            1 + expr.value.accept(self)
        }

        fn visit_binary_expr(&mut self, expr: &BinaryExpr) -> usize {
            1 + expr.left.accept(self) + expr.right.accept(self)
        }

        fn visit_call_expr(&mut self, expr: &CallExpr) -> usize {
            1 + expr.callee.accept(self)
                + expr.arguments.iter().map(|a| a.accept(self)).sum::<usize>()
        }

        fn visit_get_expr(&mut self, expr: &GetExpr) -> usize {
            1 + expr.object.accept(self)
        }

        fn visit_grouping_expr(&mut self, expr: &GroupingExpr) -> usize {
            1 + expr.expression.accept(self)
        }

        fn visit_literal_expr(&mut self, _: &LiteralExpr) -> usize {
            1
        }

        fn visit_logical_expr(&mut self, expr: &LogicalExpr) -> usize {
            1 + expr.left.accept(self) + expr.right.accept(self)
        }

        fn visit_set_expr(&mut self, expr: &SetExpr) -> usize {
            1 + expr.object.accept(self) + expr.value.accept(self)
        }

        fn visit_super_expr(&mut self, _: &SuperExpr) -> usize {
            1
        }

        fn visit_this_expr(&mut self, _: &ThisExpr) -> usize {
            1
        }

        fn visit_unary_expr(&mut self, expr: &UnaryExpr) -> usize {
            1 + expr.right.accept(self)
        }

        fn visit_variable_expr(&mut self, _: &VariableExpr) -> usize {
            1
        }
    }

    #[test]
    fn test_accept_dispatches_per_variant() {
        let plus = Token::new(TokenKind::Plus, "+", None, 1);
        let paren = Token::new(TokenKind::RightParen, ")", None, 1);
        let f = Token::new(TokenKind::Identifier, "f", None, 1);

        // f(1 + 2, (nil))
        let expr = Expr::call(
            Expr::variable(f),
            paren,
            vec![
                Expr::binary(Expr::literal(1.0), plus, Expr::literal(2.0)),
                Expr::grouping(Expr::literal(LiteralValue::Nil)),
            ],
        );

        assert_eq!(expr.accept(&mut NodeCounter), 7);
    }

    #[test]
    fn test_literal_value_conversions() {
        assert_eq!(
            LiteralValue::from(Literal::Number(2.5)),
            LiteralValue::Number(2.5)
        );
        assert_eq!(
            LiteralValue::from(Literal::String("hi".into())),
            LiteralValue::String("hi".into())
        );
        assert_eq!(LiteralValue::from(true).to_string(), "true");
        assert_eq!(LiteralValue::Nil.to_string(), "nil");
        assert_eq!(LiteralValue::from(3.0).to_string(), "3");
    }
}
