//! Compiler front end for the Lox language.
//!
//! This module turns source text into a syntax tree. It includes:
//!
//! - A lexer that tokenizes source code
//! - A parser that builds an AST from tokens
//! - The AST node model and its visitor traits
//! - A printer that renders an AST back into Lox source
//!
//! ## Examples
//!
//! ```
//! use loxfront::compiler::{self, AstPrinter};
//!
//! let program = compiler::parse_source("print 1 + 2 * 3;").unwrap();
//! assert_eq!(AstPrinter::new().print_program(&program), "print (1 + (2 * 3));");
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
mod printer;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use ast::*;
pub use error::*;
pub use lexer::*;
pub use parser::*;
pub use printer::*;

use crate::{LoxfrontError, LoxfrontResult};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Scans and parses `source` into a program that is safe to evaluate.
///
/// The source is always parsed, even when scanning reported errors, so that every problem is
/// surfaced in a single pass. If either channel reported anything the partial tree is dropped
/// and all errors are returned in a [`LoxfrontError::Syntax`].
pub fn parse_source(source: &str) -> LoxfrontResult<Vec<Stmt>> {
    let scanned = scan(source);
    let parsed = parse(&scanned.tokens);

    let diagnostics = Diagnostics {
        lex: scanned.errors,
        parse: parsed.errors,
    };

    if !diagnostics.is_empty() {
        return Err(LoxfrontError::Syntax(diagnostics));
    }

    Ok(parsed.statements)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
