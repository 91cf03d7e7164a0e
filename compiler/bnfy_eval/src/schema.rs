//! Compiled parsers.

use std::fmt;

use bnfy_diagnostic::Result;
use bnfy_ir::{Node, Token, TokenTable, Value};
use bnfy_lexer::Lexicon;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use crate::decl_table::DeclTable;
use crate::logic::Logic;
use crate::machine::Machine;

/// One compiled rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    name: Token,
    source: Node,
    properties: DeclTable,
    logic: Logic,
    literal: String,
}

impl Rule {
    pub(crate) fn new(name: Token, source: Node, properties: DeclTable, logic: Logic) -> Self {
        let literal = logic.to_string();
        Rule {
            name,
            source,
            properties,
            logic,
            literal,
        }
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn name_token(&self) -> &Token {
        &self.name
    }

    /// The declaration node the rule was compiled from.
    pub fn source(&self) -> &Node {
        &self.source
    }

    pub fn properties(&self) -> &DeclTable {
        &self.properties
    }

    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    /// The rule logic in readable form.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// A parser for the language of one grammar and token table.
///
/// Immutable once built; any number of threads may parse with the same
/// schema at once.
#[derive(Clone, Debug, PartialEq)]
pub struct ParserSchema {
    entry_point: Token,
    rules: Vec<Rule>,
    index: FxHashMap<String, usize>,
    lexicon: Lexicon,
}

impl ParserSchema {
    pub(crate) fn new(entry_point: Token, rules: Vec<Rule>, lexicon: Lexicon) -> Self {
        let index = rules
            .iter()
            .enumerate()
            .map(|(position, rule)| (rule.name().to_owned(), position))
            .collect();
        ParserSchema {
            entry_point,
            rules,
            index,
            lexicon,
        }
    }

    /// Parse `source`, starting at the entry rule.
    ///
    /// The result is the entry rule's node, or whatever stands in for it:
    /// a passed-through call or a `main` property.
    #[instrument(level = "debug", skip_all, fields(entry = %self.entry_point, len = source.len()))]
    pub fn parse(&self, source: &str) -> Result<Value> {
        let value = Machine::run(self, source)?;
        debug!("parsed");
        Ok(value)
    }

    /// The name token of the entry rule.
    pub fn entry_point(&self) -> &Token {
        &self.entry_point
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&position| &self.rules[position])
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn table(&self) -> &TokenTable {
        self.lexicon.table()
    }

    pub(crate) fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

/// Every rule literal, the entry rule marked.
impl fmt::Display for ParserSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, rule) in self.rules.iter().enumerate() {
            if position > 0 {
                f.write_str("\n\n")?;
            }
            if rule.name == self.entry_point {
                f.write_str("entry ")?;
            }
            f.write_str(rule.literal())?;
        }
        Ok(())
    }
}
