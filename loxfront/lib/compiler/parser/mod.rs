mod expressions;
mod parser;
mod statements;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use parser::*;
