//! Parser for the scratchblocks notation, turning lines of block
//! pseudo-code into typed scripts.

#[macro_use]
mod regex;

pub mod database;
pub mod formatting;
pub mod language;
pub mod parsing;
pub mod rendering;
