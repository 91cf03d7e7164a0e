//! Tokens produced by the lexer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Position;

/// A classified lexeme.
///
/// `kind` is one of the names declared by the token table: a base kind
/// (`alpha`, `operator`, ...), a compound kind (`PLUS`, `ASSIGN`, ...) or a
/// reserved kind (`INTEGER_CONST`, `REAL_CONST`, `EOF`). `value` holds the
/// source text of the lexeme and is absent only for the end-of-input token.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: String,
    pub start: Position,
    pub value: Option<String>,
}

impl Token {
    #[inline]
    pub fn new(kind: impl Into<String>, start: Position, value: Option<String>) -> Self {
        Token {
            kind: kind.into(),
            start,
            value,
        }
    }

    /// The lexeme text, or `""` for tokens without a value.
    #[inline]
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// True if this token's kind is one of `kinds`.
    pub fn is_any<S: AsRef<str>>(&self, kinds: &[S]) -> bool {
        kinds.iter().any(|kind| kind.as_ref() == self.kind)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => f.write_str(value),
            None => write!(f, "<Token: {}>", self.kind),
        }
    }
}
