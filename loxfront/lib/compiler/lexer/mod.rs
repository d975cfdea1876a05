mod lexer;
mod token;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use lexer::*;
pub use token::*;
