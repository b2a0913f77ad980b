//! Writing scripts back out as scratchblocks text.

mod formatter;
mod syntax;

pub use formatter::*;
pub use syntax::*;
