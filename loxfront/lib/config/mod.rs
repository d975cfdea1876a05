//! Configuration for the `loxfront` driver.

mod defaults;
mod driver;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use defaults::*;
pub use driver::*;
