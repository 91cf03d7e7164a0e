//! Source positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte index, line and column of a character in a source text.
///
/// Lines and columns are 1-based. A `Position` is a value: the lexer keeps
/// one running position and copies it into every token it starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The position of the first character of any source.
    pub const START: Position = Position {
        index: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub fn new(index: usize, line: u32, column: u32) -> Self {
        Position {
            index,
            line,
            column,
        }
    }

    /// Step past `consumed` and return the new byte index.
    ///
    /// The index always moves (by the UTF-8 width of `consumed`, or by one
    /// when nothing is known about the character). A newline starts the
    /// next line at column 1; anything else moves one column right.
    pub fn advance(&mut self, consumed: Option<char>) -> usize {
        self.index += consumed.map_or(1, char::len_utf8);
        if consumed == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.index
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
