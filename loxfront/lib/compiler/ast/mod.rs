//! Syntax tree produced by the parser.
//!
//! Every node owns its children. Tokens are stored by value, so a tree stays valid after the
//! source text it was parsed from is dropped.

mod expr;
mod stmt;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use expr::*;
pub use stmt::*;
