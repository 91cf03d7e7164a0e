//! Grammar compilation and generated-parser execution.
//!
//! The pipeline from a grammar AST to a working parser:
//!
//! 1. [`lower`] turns the untyped `grammar` node into typed [`Declaration`]s
//! 2. [`DeclTable`] collects the properties each rule's node carries
//! 3. [`first_of`] computes the lookahead [`Guard`] of every optional,
//!    repeated or alternative piece of syntax
//! 4. [`generate`] turns a declaration into its rule [`Logic`], a small
//!    imperative program of `eat`/`expect`/call statements
//! 5. [`Interpreter`] validates the whole grammar and assembles the
//!    [`ParserSchema`], which parses source text by running rule logic
//!    against a [`Cursor`](bnfy_parse::Cursor)

mod codegen;
mod decl_table;
mod guard;
mod interpreter;
mod logic;
mod lower;
mod machine;
mod schema;
mod syntax;

pub use codegen::generate;
pub use decl_table::{DeclTable, Origin, Property, RESERVED_NAMES};
pub use guard::{first_of, Guard};
pub use interpreter::Interpreter;
pub use logic::{Bind, Logic, Stmt};
pub use lower::lower;
pub use schema::{ParserSchema, Rule};
pub use syntax::{Declaration, PropertyAssign, Repeat, Syntax};
