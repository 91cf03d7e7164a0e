use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Interpreter (grammar compilation) errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Character belongs to no terminal class
    E0001,
    /// Accumulated lexeme fails its class's validity check
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,

    // Interpreter Errors (E2xxx)
    /// Grammar AST has an unexpected shape
    E2001,
    /// No rule carries the `entry` modifier
    E2002,
    /// Entry point, rule, or `main` property declared twice
    E2003,
    /// Reference to an undeclared terminal kind or rule
    E2004,
    /// Name reserved by the execution environment
    E2005,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
        }
    }

    /// One-line description used as the diagnostic title.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid character.",
            ErrorCode::E0002 => "unknown or illegal token.",
            ErrorCode::E1001 => "unexpected token.",
            ErrorCode::E2001 => "interpreter called on invalid AST structure.",
            ErrorCode::E2002 => "no entry point for parser declared in bnf source.",
            ErrorCode::E2003 => "duplicate identifier declaration.",
            ErrorCode::E2004 => "identifier not found.",
            ErrorCode::E2005 => "reserved name.",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002)
    }

    pub fn is_parser_error(&self) -> bool {
        matches!(self, ErrorCode::E1001)
    }

    pub fn is_interpreter_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
