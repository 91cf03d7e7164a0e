//! Parsing for bnfy.
//!
//! - [`Cursor`]: two-token lookahead over a [`Lexer`](bnfy_lexer::Lexer)
//!   with `eat`/`expect` primitives and speculative [`Cursor::try_parse`]
//! - [`bootstrap`]: the token table and grammar text of the BNF description
//!   language itself
//! - [`GrammarParser`]: a hand-written recursive descent parser for that
//!   language, producing the grammar AST the interpreter compiles
//!
//! Generated parsers reuse [`Cursor`] as their execution context.

pub mod bootstrap;
mod cursor;
mod grammar;

pub use cursor::{Cursor, Snapshot};
pub use grammar::GrammarParser;
