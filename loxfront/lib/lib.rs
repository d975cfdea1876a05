//! `loxfront` is the front end of a Lox implementation: it turns source text into a syntax tree.
//!
//! # Overview
//!
//! The crate has two stages, run in order:
//!
//! - **Lexer**: scans the whole source once and produces tokens
//! - **Parser**: a recursive descent parser that builds statements from those tokens
//!
//! Both stages collect their errors instead of stopping at the first one, so a single pass
//! reports every problem in the source. A program with any error must not be evaluated.
//!
//! # Usage Example
//!
//! ```
//! use loxfront::compiler::{self, Expr, Stmt};
//!
//! let program = compiler::parse_source("print 1 + 2 * 3;").unwrap();
//! let Stmt::Print(print) = &program[0] else { panic!() };
//! assert!(matches!(print.expression, Expr::Binary(_)));
//! ```
//!
//! Errors are reported per line:
//!
//! ```
//! use loxfront::compiler;
//!
//! let error = compiler::parse_source("var x = ;").unwrap_err();
//! assert_eq!(error.to_string(), "[line 1] Error at ';': Expect expression.");
//! ```
//!
//! # Modules
//!
//! - [`compiler`] - Lexer, parser, syntax tree and printer
//! - [`config`] - Driver configuration
//! - [`cli`] - Command-line interface and argument parsing

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod driver;
mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod cli;
pub mod compiler;
pub mod config;

pub use driver::*;
pub use error::*;
