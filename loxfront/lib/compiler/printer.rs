use crate::compiler::{
    AssignExpr, BinaryExpr, BlockStmt, CallExpr, ClassStmt, Expr, ExprVisitor, ExpressionStmt,
    FunctionStmt, GetExpr, GroupingExpr, IfStmt, LiteralExpr, LiteralValue, LogicalExpr,
    PrintStmt, ReturnStmt, SetExpr, Stmt, StmtVisitor, SuperExpr, ThisExpr, Token, UnaryExpr,
    VarStmt, VariableExpr, WhileStmt,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Renders a syntax tree back into Lox source text.
///
/// Every binary, logical and assignment expression is wrapped in parentheses, so the output
/// shows exactly how the parser grouped the input. Explicit groupings are not doubled up. The
/// output parses back to a tree that prints identically.
///
/// ## Examples
///
/// ```
/// use loxfront::compiler::{self, AstPrinter};
///
/// let program = compiler::parse_source("a = b or c and d;").unwrap();
/// let printed = AstPrinter::new().print_program(&program);
/// assert_eq!(printed, "(a = (b or (c and d)));");
/// ```
#[derive(Debug, Default)]
pub struct AstPrinter;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AstPrinter {
    /// Creates a new printer.
    pub fn new() -> Self {
        Self
    }

    /// Prints a whole program, one top level statement per line.
    pub fn print_program(&mut self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|statement| self.print_stmt(statement))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints a single statement.
    pub fn print_stmt(&mut self, statement: &Stmt) -> String {
        statement.accept(self)
    }

    /// Prints a single expression.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        format!(
            "({} {} {})",
            left.accept(self),
            operator.lexeme,
            right.accept(self)
        )
    }

    fn block(&mut self, statements: &[Stmt]) -> String {
        if statements.is_empty() {
            return "{ }".to_string();
        }

        let body: Vec<String> = statements.iter().map(|s| s.accept(self)).collect();
        format!("{{ {} }}", body.join(" "))
    }

    fn function(&mut self, function: &FunctionStmt) -> String {
        let params: Vec<&str> = function.params.iter().map(|p| p.lexeme.as_str()).collect();
        format!(
            "{}({}) {}",
            function.name.lexeme,
            params.join(", "),
            self.block(&function.body)
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign_expr(&mut self, expr: &AssignExpr) -> String {
        format!("({} = {})", expr.name.lexeme, expr.value.accept(self))
    }

    fn visit_binary_expr(&mut self, expr: &BinaryExpr) -> String {
        self.parenthesize(&expr.left, &expr.operator, &expr.right)
    }

    fn visit_call_expr(&mut self, expr: &CallExpr) -> String {
        let callee = expr.callee.accept(self);
        let arguments: Vec<String> = expr.arguments.iter().map(|a| a.accept(self)).collect();
        format!("{}({})", callee, arguments.join(", "))
    }

    fn visit_get_expr(&mut self, expr: &GetExpr) -> String {
        format!("{}.{}", expr.object.accept(self), expr.name.lexeme)
    }

    fn visit_grouping_expr(&mut self, expr: &GroupingExpr) -> String {
        // Operators already print their own parentheses
        match expr.expression.as_ref() {
            Expr::Assign(_) | Expr::Binary(_) | Expr::Logical(_) | Expr::Set(_) => {
                expr.expression.accept(self)
            }
            inner => format!("({})", inner.accept(self)),
        }
    }

    fn visit_literal_expr(&mut self, expr: &LiteralExpr) -> String {
        match &expr.value {
            LiteralValue::String(value) => format!("\"{}\"", value),
            value => value.to_string(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &LogicalExpr) -> String {
        self.parenthesize(&expr.left, &expr.operator, &expr.right)
    }

    fn visit_set_expr(&mut self, expr: &SetExpr) -> String {
        format!(
            "({}.{} = {})",
            expr.object.accept(self),
            expr.name.lexeme,
            expr.value.accept(self)
        )
    }

    fn visit_super_expr(&mut self, expr: &SuperExpr) -> String {
        format!("super.{}", expr.method.lexeme)
    }

    fn visit_this_expr(&mut self, _: &ThisExpr) -> String {
        "this".to_string()
    }

    fn visit_unary_expr(&mut self, expr: &UnaryExpr) -> String {
        format!("{}{}", expr.operator.lexeme, expr.right.accept(self))
    }

    fn visit_variable_expr(&mut self, expr: &VariableExpr) -> String {
        expr.name.lexeme.clone()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_block_stmt(&mut self, stmt: &BlockStmt) -> String {
        self.block(&stmt.statements)
    }

    fn visit_class_stmt(&mut self, stmt: &ClassStmt) -> String {
        let mut out = format!("class {}", stmt.name.lexeme);
        if let Some(superclass) = &stmt.superclass {
            out.push_str(&format!(" < {}", superclass.name.lexeme));
        }

        let methods: Vec<String> = stmt.methods.iter().map(|m| self.function(m)).collect();
        if methods.is_empty() {
            out.push_str(" { }");
        } else {
            out.push_str(&format!(" {{ {} }}", methods.join(" ")));
        }

        out
    }

    fn visit_expression_stmt(&mut self, stmt: &ExpressionStmt) -> String {
        format!("{};", stmt.expression.accept(self))
    }

    fn visit_function_stmt(&mut self, stmt: &FunctionStmt) -> String {
        format!("fun {}", self.function(stmt))
    }

    fn visit_if_stmt(&mut self, stmt: &IfStmt) -> String {
        let mut out = format!(
            "if ({}) {}",
            stmt.condition.accept(self),
            stmt.then_branch.accept(self)
        );
        if let Some(else_branch) = &stmt.else_branch {
            out.push_str(&format!(" else {}", else_branch.accept(self)));
        }

        out
    }

    fn visit_print_stmt(&mut self, stmt: &PrintStmt) -> String {
        format!("print {};", stmt.expression.accept(self))
    }

    fn visit_return_stmt(&mut self, stmt: &ReturnStmt) -> String {
        match &stmt.value {
            Some(value) => format!("return {};", value.accept(self)),
            None => "return;".to_string(),
        }
    }

    fn visit_var_stmt(&mut self, stmt: &VarStmt) -> String {
        match &stmt.initializer {
            Some(initializer) => format!("var {} = {};", stmt.name.lexeme, initializer.accept(self)),
            None => format!("var {};", stmt.name.lexeme),
        }
    }

    fn visit_while_stmt(&mut self, stmt: &WhileStmt) -> String {
        format!(
            "while ({}) {}",
            stmt.condition.accept(self),
            stmt.body.accept(self)
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parse_source;

    fn print(source: &str) -> String {
        let program = parse_source(source).unwrap();
        AstPrinter::new().print_program(&program)
    }

    #[test]
    fn test_print_expressions() {
        assert_eq!(print("1 + 2 * 3;"), "(1 + (2 * 3));");
        assert_eq!(print("(1 + 2) * 3;"), "((1 + 2) * 3);");
        assert_eq!(print("-(-x);"), "-(-x);");
        assert_eq!(print("!!ok;"), "!!ok;");
        assert_eq!(print("a.b(1, \"two\").c = nil;"), "(a.b(1, \"two\").c = nil);");
        assert_eq!(print("super.init(this);"), "super.init(this);");
        assert_eq!(print("print 2.5 >= 1;"), "print (2.5 >= 1);");
    }

    #[test]
    fn test_print_statements() {
        assert_eq!(print("var a;"), "var a;");
        assert_eq!(print("{ var a = 1; print a; }"), "{ var a = 1; print a; }");
        assert_eq!(print("{}"), "{ }");
        assert_eq!(
            print("if (a) print 1; else print 2;"),
            "if (a) print 1; else print 2;"
        );
        assert_eq!(
            print("fun add(a, b) { return a + b; }"),
            "fun add(a, b) { return (a + b); }"
        );
        assert_eq!(
            print("class B < A { init() { return; } }"),
            "class B < A { init() { return; } }"
        );
        assert_eq!(print("class Empty {}"), "class Empty { }");
    }

    #[test]
    fn test_print_desugared_for() {
        assert_eq!(
            print("for (var i = 0; i < 3; i = i + 1) print i;"),
            "{ var i = 0; while ((i < 3)) { print i; (i = (i + 1)); } }"
        );
        assert_eq!(print("for (;;) {}"), "while (true) { }");
    }
}
