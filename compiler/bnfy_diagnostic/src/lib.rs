//! Error reporting for every stage of the parser generator.
//!
//! - [`ErrorCode`]: stable, searchable code per error kind
//! - [`Error`]: the single error type returned by the lexer, the parsers,
//!   and the interpreter
//! - [`Diagnostic`]: a human-readable report built from an [`Error`]
//!
//! Every error is fatal to the call that produced it. The only error that
//! may be handled locally is an unexpected token during speculative
//! parsing, see [`Error::is_unexpected_token`].

mod diagnostic;
mod error;
mod error_code;

pub use diagnostic::{Diagnostic, Report};
pub use error::{Error, Result};
pub use error_code::ErrorCode;
