//! Table-driven lexer.
//!
//! The lexer knows nothing about any particular language: a [`Lexicon`]
//! (a [`TokenTable`](bnfy_ir::TokenTable) plus its reverse compound maps)
//! decides which characters start which class of token, and how the
//! accumulated text of a token resolves to a kind name.
//!
//! Tokens are produced on demand by [`Lexer::next_token`]; the lexer is
//! `Clone`, so a parser can snapshot it together with its lookahead.

mod builder;
mod lexer;
mod lexicon;

pub use lexer::Lexer;
pub use lexicon::{CharClass, Lexicon};
