//! Human-readable error reports.
//!
//! A [`Diagnostic`] is the presentation side of an [`Error`](crate::Error):
//! code, message, location and notes. [`Diagnostic::render`] lays them out
//! in the familiar compiler style, quoting the offending source line with a
//! caret under the reported column.

use std::fmt::{self, Write};

use bnfy_ir::Position;

use crate::ErrorCode;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub position: Option<Position>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// An error diagnostic titled with the code's description.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: code.description().to_owned(),
            position: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render against the text the error was reported for.
    pub fn render(&self, source: &str) -> String {
        self.report(source).to_string()
    }

    /// The rendered report as a [`Display`](fmt::Display) value, for writing
    /// straight into another formatter.
    pub fn report<'a>(&'a self, source: &'a str) -> Report<'a> {
        Report {
            diagnostic: self,
            source,
        }
    }

    fn render_into(&self, out: &mut impl Write, source: Option<&str>) -> fmt::Result {
        writeln!(out, "error[{}]: {}", self.code, self.message)?;

        let quoted = self.position.and_then(|pos| {
            let line = source?.lines().nth(pos.line.checked_sub(1)? as usize)?;
            Some((pos, line))
        });
        let gutter = self.position.map_or(0, |pos| pos.line.to_string().len());

        if let Some(pos) = self.position {
            writeln!(out, "{:gutter$}--> {pos}", "")?;
        }
        if let Some((pos, line)) = quoted {
            writeln!(out, "{:gutter$} |", "")?;
            writeln!(out, "{} | {line}", pos.line)?;
            // Keep tabs so the caret lines up under tab-indented text.
            let pad: String = line
                .chars()
                .take(pos.column.saturating_sub(1) as usize)
                .map(|ch| if ch == '\t' { '\t' } else { ' ' })
                .collect();
            writeln!(out, "{:gutter$} | {pad}^", "")?;
        }
        for note in &self.notes {
            writeln!(out, "{:gutter$} = note: {note}", "")?;
        }
        Ok(())
    }
}

/// A diagnostic paired with the source it quotes.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.diagnostic.render_into(f, Some(self.source))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_into(f, None)
    }
}
