//! On-demand tokenizer over a source string.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::{Position, Token};
use tracing::trace;

use crate::builder::Builder;
use crate::{CharClass, Lexicon};

/// Produces tokens one at a time from `source`.
///
/// After the last token the lexer keeps returning the end-of-input token.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    lexicon: &'a Lexicon,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, lexicon: &'a Lexicon) -> Self {
        Lexer {
            source,
            lexicon,
            position: Position::START,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.source.get(self.position.index..).unwrap_or_default()
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    fn bump(&mut self) {
        if let Some(ch) = self.current() {
            self.position.advance(Some(ch));
        }
    }

    fn bump_str(&mut self, text: &str) {
        for _ in text.chars() {
            self.bump();
        }
    }

    /// Scan the next token, skipping whitespace and comments.
    pub fn next_token(&mut self) -> Result<Token> {
        let lexicon = self.lexicon;
        let special = &lexicon.table().special_types;

        while let Some(ch) = self.current() {
            let rest = self.rest();
            if starts_with_marker(rest, &special.comment_start) {
                self.skip_comment(&special.comment_start, &special.comment_end);
            } else if starts_with_marker(rest, &special.comment_inline) {
                self.skip_comment(&special.comment_inline, "\n");
            } else {
                match lexicon.classify(ch) {
                    Some(CharClass::Whitespace) => self.bump(),
                    Some(CharClass::Terminal(class)) => {
                        return self.build(Builder::for_class(class));
                    }
                    None => {
                        return Err(Error::IllegalCharacter {
                            ch,
                            position: self.position,
                        });
                    }
                }
            }
        }

        let eof = &lexicon.table().reserved_types.eof;
        trace!(kind = %eof, start = %self.position, "token");
        Ok(Token::new(eof.as_str(), self.position, None))
    }

    /// Collect every token up to and including end of input.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let lexicon = self.lexicon;
        let eof = &lexicon.table().reserved_types.eof;
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == *eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn build(&mut self, builder: Builder) -> Result<Token> {
        let start = self.position;
        let mut value = String::new();
        while let Some(ch) = self.current() {
            if !builder.include(self.lexicon, &value, ch) {
                break;
            }
            value.push(ch);
            self.bump();
        }

        let token = builder.finish(self.lexicon, value, start)?;
        trace!(kind = %token.kind, value = token.text(), start = %start, "token");
        Ok(token)
    }

    /// Skip past `open`, then up to and including `close` (or to the end of
    /// input if the comment never closes).
    fn skip_comment(&mut self, open: &str, close: &str) {
        self.bump_str(open);
        while self.current().is_some() && !self.rest().starts_with(close) {
            self.bump();
        }
        self.bump_str(close);
    }
}

#[inline]
fn starts_with_marker(rest: &str, marker: &str) -> bool {
    !marker.is_empty() && rest.starts_with(marker)
}
