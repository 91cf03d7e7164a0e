//! bnfy - a self-hosting BNF parser generator.
//!
//! A grammar written in the BNF description language, together with a
//! [`TokenTable`] describing the terminals of the target language, compiles
//! into a [`ParserSchema`]: a ready-to-run recursive descent parser that
//! turns source text into a tagged [`Node`] tree.
//!
//! ```
//! use bnfyc::{compile, ClassTable, TerminalClass, TokenTable};
//!
//! let table = TokenTable::new(ClassTable {
//!     number: "0123456789".to_owned(),
//!     alpha: String::new(),
//!     operator: "+".to_owned(),
//!     delimiter: String::new(),
//!     literal: String::new(),
//! })
//! .with_compound(TerminalClass::Operator, "PLUS", "+");
//!
//! let schema = compile(
//!     "entry sum ::= <INTEGER_CONST: left> (<PLUS> {sum: right})^;",
//!     table,
//! )?;
//! let tree = schema.parse("1 + 2 + 3")?;
//! assert_eq!(tree.as_node().map(|node| node.tag.as_str()), Some("sum"));
//! # Ok::<(), bnfyc::Error>(())
//! ```
//!
//! The description language is itself defined by a grammar,
//! [`bootstrap::GRAMMAR`], which [`GrammarParser`] implements by hand.
//! Compiling that grammar yields a parser equivalent to [`GrammarParser`].

use std::sync::Once;

use tracing::debug;

pub use bnfy_diagnostic::{Diagnostic, Error, ErrorCode, Result};
pub use bnfy_eval::{Interpreter, ParserSchema, Rule};
pub use bnfy_ir::{
    ClassTable, Node, Position, Spelling, TerminalClass, Token, TokenTable, Value,
};
pub use bnfy_lexer::{Lexer, Lexicon};
pub use bnfy_parse::{bootstrap, GrammarParser};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call multiple times.
/// Enable with e.g. `RUST_LOG=bnfy_eval=trace`.
///
/// ```
/// bnfyc::init_tracing();
/// bnfyc::init_tracing();
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host application.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Compile `grammar` into a parser for the language `table` describes.
///
/// # Errors
///
/// Lexer and parser errors in the grammar text itself, or any of the
/// interpreter errors described on [`Interpreter::interpret`].
pub fn compile(grammar: &str, table: TokenTable) -> Result<ParserSchema> {
    let ast = GrammarParser::default().parse(grammar)?;
    let schema = Interpreter::new(table).interpret(&ast)?;
    debug!(entry = %schema.entry_point(), rules = schema.rules().len(), "compiled grammar");
    Ok(schema)
}
