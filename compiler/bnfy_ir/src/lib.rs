//! bnfy IR - data shared by every stage of the parser generator.
//!
//! - [`Position`]: byte index, line and column of a character in a source
//! - [`Token`]: a classified lexeme with its start position
//! - [`TokenTable`]: the declarative description of a language's terminals
//! - [`Node`] / [`Value`]: the untyped, tagged AST produced by both the
//!   hand-written grammar parser and every generated parser
//!
//! Everything here is plain data. Token kinds are the strings a table
//! declares, so the same types serve the bootstrap grammar language and any
//! language compiled from it.

mod node;
mod position;
mod table;
mod token;

pub use node::{Node, Value};
pub use position::Position;
pub use table::{
    BaseTypes, ClassTable, ReservedTypes, Skip, SpecialTypes, Spelling, StraySpelling,
    TerminalClass, TokenTable,
};
pub use token::Token;
