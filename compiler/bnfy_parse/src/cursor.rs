//! Two-token lookahead over a lexer.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::Token;
use bnfy_lexer::{Lexer, Lexicon};
use tracing::trace;

/// The current and next token of a source, with the lexer positioned after
/// the next one.
///
/// Tokens are lexed on demand, so lexer errors surface when the cursor
/// advances onto the offending text.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    next: Token,
}

/// Saved cursor state for speculative parsing.
#[derive(Clone, Debug)]
pub struct Snapshot<'a>(Cursor<'a>);

impl<'a> Cursor<'a> {
    /// Start a cursor at the beginning of `source`.
    pub fn new(source: &'a str, lexicon: &'a Lexicon) -> Result<Self> {
        let mut lexer = Lexer::new(source, lexicon);
        let current = lexer.next_token()?;
        let next = lexer.next_token()?;
        Ok(Cursor {
            lexer,
            current,
            next,
        })
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn peek_next(&self) -> &Token {
        &self.next
    }

    #[inline]
    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexer.lexicon()
    }

    /// True if the current token's kind is one of `kinds`.
    #[inline]
    pub fn check<S: AsRef<str>>(&self, kinds: &[S]) -> bool {
        self.current.is_any(kinds)
    }

    /// Assert the current token's kind is one of `kinds` without consuming it.
    pub fn expect<S: AsRef<str>>(&self, kinds: &[S]) -> Result<()> {
        if self.check(kinds) {
            Ok(())
        } else {
            Err(Error::unexpected(self.current.clone(), kinds))
        }
    }

    /// Consume the current token if its kind is one of `kinds`.
    pub fn eat<S: AsRef<str>>(&mut self, kinds: &[S]) -> Result<Token> {
        self.expect(kinds)?;
        self.advance()
    }

    /// Consume the current token unconditionally.
    pub fn advance(&mut self) -> Result<Token> {
        let upcoming = self.lexer.next_token()?;
        let next = std::mem::replace(&mut self.next, upcoming);
        let token = std::mem::replace(&mut self.current, next);
        trace!(kind = %token.kind, start = %token.start, "advance");
        Ok(token)
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot<'a> {
        Snapshot(self.clone())
    }

    #[inline]
    pub fn restore(&mut self, snapshot: Snapshot<'a>) {
        *self = snapshot.0;
    }

    /// Run `f`, rolling the cursor back if it fails with an unexpected token.
    ///
    /// Returns `Ok(None)` after rolling back. Every other error propagates
    /// unchanged, so speculation never hides a real failure.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<Option<T>> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_unexpected_token() => {
                trace!(%err, "try_parse rolled back");
                self.restore(snapshot);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
