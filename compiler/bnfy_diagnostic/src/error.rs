//! The error type shared by every stage.

use bnfy_ir::{Position, Token};

use crate::{Diagnostic, ErrorCode};

pub type Result<T> = std::result::Result<T, Error>;

/// A fatal lexing, parsing or grammar-compilation failure.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The character belongs to no terminal class of the table.
    #[error("invalid character `{ch}` at {position}")]
    IllegalCharacter { ch: char, position: Position },

    /// The accumulated lexeme fails its class's validity check.
    #[error("unknown or illegal token `{value}` at {position}: {detail}")]
    TokenError {
        value: String,
        position: Position,
        detail: String,
    },

    /// `eat`/`expect` found a token outside the allowed set.
    #[error(
        "unexpected token `{found}` ({}) at {}, expected one of: {}",
        .found.kind,
        .found.start,
        .expected.join(", ")
    )]
    UnexpectedToken { found: Token, expected: Vec<String> },

    #[error("interpreter called on invalid AST structure: {detail}")]
    MalformedAst { detail: String },

    #[error("no entry point for parser declared in bnf source")]
    NoEntryPoint,

    #[error("duplicate identifier declaration `{token}` at {}: {detail}", .token.start)]
    DuplicateIdentifier { token: Token, detail: String },

    #[error("identifier not found `{token}` at {}: {detail}", .token.start)]
    IdentifierNotFound { token: Token, detail: String },

    #[error("reserved name `{token}` at {}", .token.start)]
    ReservedName { token: Token },
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::IllegalCharacter { .. } => ErrorCode::E0001,
            Error::TokenError { .. } => ErrorCode::E0002,
            Error::UnexpectedToken { .. } => ErrorCode::E1001,
            Error::MalformedAst { .. } => ErrorCode::E2001,
            Error::NoEntryPoint => ErrorCode::E2002,
            Error::DuplicateIdentifier { .. } => ErrorCode::E2003,
            Error::IdentifierNotFound { .. } => ErrorCode::E2004,
            Error::ReservedName { .. } => ErrorCode::E2005,
        }
    }

    /// Where in the source text the error occurred, if it has a location.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::IllegalCharacter { position, .. } | Error::TokenError { position, .. } => {
                Some(*position)
            }
            Error::UnexpectedToken { found: token, .. }
            | Error::DuplicateIdentifier { token, .. }
            | Error::IdentifierNotFound { token, .. }
            | Error::ReservedName { token } => Some(token.start),
            Error::MalformedAst { .. } | Error::NoEntryPoint => None,
        }
    }

    /// True for the one failure speculative parsing is allowed to swallow.
    pub fn is_unexpected_token(&self) -> bool {
        matches!(self, Error::UnexpectedToken { .. })
    }

    pub fn unexpected<S: AsRef<str>>(found: Token, expected: &[S]) -> Self {
        Error::UnexpectedToken {
            found,
            expected: expected.iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Error::MalformedAst {
            detail: detail.into(),
        }
    }

    pub fn duplicate(token: Token, detail: impl Into<String>) -> Self {
        Error::DuplicateIdentifier {
            token,
            detail: detail.into(),
        }
    }

    pub fn not_found(token: Token, detail: impl Into<String>) -> Self {
        Error::IdentifierNotFound {
            token,
            detail: detail.into(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let mut diagnostic = Diagnostic::error(code).with_message(self.to_string());
        if let Some(position) = self.position() {
            diagnostic = diagnostic.at(position);
        }
        match self {
            Error::UnexpectedToken { found, expected } => diagnostic
                .with_note(format!("found token of kind `{}`", found.kind))
                .with_note(format!("expected one of: {}", expected.join(", "))),
            Error::TokenError { detail, .. }
            | Error::DuplicateIdentifier { detail, .. }
            | Error::IdentifierNotFound { detail, .. } => diagnostic.with_note(detail.clone()),
            Error::NoEntryPoint => {
                diagnostic.with_note("mark exactly one rule with the `entry` modifier")
            }
            Error::IllegalCharacter { .. } | Error::MalformedAst { .. } | Error::ReservedName { .. } => {
                diagnostic
            }
        }
    }
}
