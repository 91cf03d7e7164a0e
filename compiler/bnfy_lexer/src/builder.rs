//! Per-class token building rules.
//!
//! Once the first character has picked a class, a [`Builder`] decides which
//! following characters still belong to the token and, at the end, checks
//! the accumulated text and resolves its kind.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::{Position, TerminalClass, Token};

use crate::Lexicon;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Builder {
    /// Digits and `.`; the kind depends on whether a `.` was seen.
    Number,
    /// Alpha followed by alpha or number characters.
    Word,
    /// Longest run that is still a prefix of a compound operator.
    Operator,
    /// Longest run that is still a prefix of a compound delimiter.
    Delimiter,
    /// Everything from a quote up to and including the matching quote.
    Literal,
}

impl Builder {
    pub(crate) fn for_class(class: TerminalClass) -> Self {
        match class {
            TerminalClass::Number => Builder::Number,
            TerminalClass::Alpha => Builder::Word,
            TerminalClass::Operator => Builder::Operator,
            TerminalClass::Delimiter => Builder::Delimiter,
            TerminalClass::Literal => Builder::Literal,
        }
    }

    /// Whether `ch` extends a token whose text so far is `value`.
    pub(crate) fn include(self, lexicon: &Lexicon, value: &str, ch: char) -> bool {
        match self {
            Builder::Number => ch == '.' || lexicon.is_terminal(TerminalClass::Number, ch),
            Builder::Word => {
                lexicon.is_terminal(TerminalClass::Alpha, ch)
                    || lexicon.is_terminal(TerminalClass::Number, ch)
            }
            Builder::Operator => extends_prefix(lexicon, TerminalClass::Operator, value, ch),
            Builder::Delimiter => extends_prefix(lexicon, TerminalClass::Delimiter, value, ch),
            Builder::Literal => !is_closed_literal(value),
        }
    }

    /// Validate the accumulated text and produce the token.
    pub(crate) fn finish(self, lexicon: &Lexicon, value: String, start: Position) -> Result<Token> {
        let kind = match self {
            Builder::Number => {
                let reserved = &lexicon.table().reserved_types;
                match value.matches('.').count() {
                    0 => reserved.integer_const.clone(),
                    1 => reserved.real_const.clone(),
                    _ => {
                        return Err(token_error(
                            value,
                            start,
                            "number literal with more than one decimal point",
                        ))
                    }
                }
            }
            Builder::Word => lexicon
                .compound(TerminalClass::Alpha, &value)
                .unwrap_or_else(|| lexicon.base_kind(TerminalClass::Alpha))
                .to_owned(),
            Builder::Operator => match lexicon.compound(TerminalClass::Operator, &value) {
                Some(kind) => kind.to_owned(),
                None => return Err(token_error(value, start, "unknown operator sequence")),
            },
            Builder::Delimiter => match lexicon.compound(TerminalClass::Delimiter, &value) {
                Some(kind) => kind.to_owned(),
                None if value.chars().count() == 1 => {
                    lexicon.base_kind(TerminalClass::Delimiter).to_owned()
                }
                None => return Err(token_error(value, start, "unknown delimiter sequence")),
            },
            Builder::Literal => {
                if !is_closed_literal(&value) {
                    return Err(token_error(value, start, "unterminated literal"));
                }
                lexicon.base_kind(TerminalClass::Literal).to_owned()
            }
        };
        Ok(Token::new(kind, start, Some(value)))
    }
}

/// The first character always belongs to the token; later ones only while
/// the text stays a prefix of some compound spelling.
fn extends_prefix(lexicon: &Lexicon, class: TerminalClass, value: &str, ch: char) -> bool {
    if value.is_empty() {
        return true;
    }
    let mut candidate = String::with_capacity(value.len() + ch.len_utf8());
    candidate.push_str(value);
    candidate.push(ch);
    lexicon.is_compound_prefix(class, &candidate)
}

/// At least two characters, first and last the same quote.
fn is_closed_literal(value: &str) -> bool {
    let mut chars = value.chars();
    matches!((chars.next(), chars.next_back()), (Some(open), Some(close)) if open == close)
}

fn token_error(value: String, position: Position, detail: &str) -> Error {
    Error::TokenError {
        value,
        position,
        detail: detail.to_owned(),
    }
}
