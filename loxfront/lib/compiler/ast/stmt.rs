use crate::compiler::{Expr, Token, VariableExpr};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A statement node.
///
/// There is no `for` variant: `for` loops are desugared by the parser into blocks and `while`
/// loops.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ statements... }`
    Block(BlockStmt),
    /// `class Name < Super { methods... }`
    Class(ClassStmt),
    /// An expression evaluated for its side effects
    Expression(ExpressionStmt),
    /// `fun name(params...) { body... }`
    Function(FunctionStmt),
    /// `if (condition) then else otherwise`
    If(IfStmt),
    /// `print expression;`
    Print(PrintStmt),
    /// `return value;`
    Return(ReturnStmt),
    /// `var name = initializer;`
    Var(VarStmt),
    /// `while (condition) body`
    While(WhileStmt),
}

/// A block of statements with its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    /// Statements in source order
    pub statements: Vec<Stmt>,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStmt {
    /// The class name
    pub name: Token,
    /// The superclass, if any
    pub superclass: Option<VariableExpr>,
    /// Method declarations in source order
    pub methods: Vec<FunctionStmt>,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    /// The expression
    pub expression: Expr,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    /// The function name
    pub name: Token,
    /// Parameter names in order
    pub params: Vec<Token>,
    /// The function body
    pub body: Vec<Stmt>,
}

/// A conditional.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    /// The condition
    pub condition: Expr,
    /// Runs when the condition is truthy
    pub then_branch: Box<Stmt>,
    /// Runs otherwise, if present
    pub else_branch: Option<Box<Stmt>>,
}

/// A print statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    /// The printed expression
    pub expression: Expr,
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    /// The `return` token, kept to locate errors
    pub keyword: Token,
    /// The returned value, if any
    pub value: Option<Expr>,
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    /// The variable name
    pub name: Token,
    /// The initial value, if any
    pub initializer: Option<Expr>,
}

/// A `while` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    /// The loop condition
    pub condition: Expr,
    /// The loop body
    pub body: Box<Stmt>,
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// An operation defined over every statement variant.
pub trait StmtVisitor<R> {
    /// Visit a block
    fn visit_block_stmt(&mut self, stmt: &BlockStmt) -> R;

    /// Visit a class declaration
    fn visit_class_stmt(&mut self, stmt: &ClassStmt) -> R;

    /// Visit an expression statement
    fn visit_expression_stmt(&mut self, stmt: &ExpressionStmt) -> R;

    /// Visit a function declaration
    fn visit_function_stmt(&mut self, stmt: &FunctionStmt) -> R;

    /// Visit a conditional
    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> R;

    /// Visit a print statement
    fn visit_print_stmt(&mut self, stmt: &PrintStmt) -> R;

    /// Visit a return statement
    fn visit_return_stmt(&mut self, stmt: &ReturnStmt) -> R;

    /// Visit a variable declaration
    fn visit_var_stmt(&mut self, stmt: &VarStmt) -> R;

    /// Visit a `while` loop
    fn visit_while_stmt(&mut self, stmt: &WhileStmt) -> R;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Stmt {
    /// Dispatches to the visitor method for this variant.
    pub fn accept<R, V>(&self, visitor: &mut V) -> R
    where
        V: StmtVisitor<R> + ?Sized,
    {
        match self {
            Stmt::Block(stmt) => visitor.visit_block_stmt(stmt),
            Stmt::Class(stmt) => visitor.visit_class_stmt(stmt),
            Stmt::Expression(stmt) => visitor.visit_expression_stmt(stmt),
            Stmt::Function(stmt) => visitor.visit_function_stmt(stmt),
            Stmt::If(stmt) => visitor.visit_if_stmt(stmt),
            Stmt::Print(stmt) => visitor.visit_print_stmt(stmt),
            Stmt::Return(stmt) => visitor.visit_return_stmt(stmt),
            Stmt::Var(stmt) => visitor.visit_var_stmt(stmt),
            Stmt::While(stmt) => visitor.visit_while_stmt(stmt),
        }
    }

    /// Creates a block.
    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::Block(BlockStmt { statements })
    }

    /// Creates an expression statement.
    pub fn expression(expression: Expr) -> Self {
        Stmt::Expression(ExpressionStmt { expression })
    }

    /// Creates a conditional.
    pub fn if_(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If(IfStmt {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    /// Creates a print statement.
    pub fn print(expression: Expr) -> Self {
        Stmt::Print(PrintStmt { expression })
    }

    /// Creates a return statement.
    pub fn return_(keyword: Token, value: Option<Expr>) -> Self {
        Stmt::Return(ReturnStmt { keyword, value })
    }

    /// Creates a variable declaration.
    pub fn var(name: Token, initializer: Option<Expr>) -> Self {
        Stmt::Var(VarStmt { name, initializer })
    }

    /// Creates a `while` loop.
    pub fn while_(condition: Expr, body: Stmt) -> Self {
        Stmt::While(WhileStmt {
            condition,
            body: Box::new(body),
        })
    }
}
