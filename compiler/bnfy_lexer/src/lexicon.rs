//! A token table prepared for lexing.

use std::collections::BTreeMap;
use std::ops::Bound;

use bnfy_ir::{ClassTable, TerminalClass, TokenTable};
use tracing::warn;

/// What a single character means to the lexer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CharClass {
    Whitespace,
    Terminal(TerminalClass),
}

/// A [`TokenTable`] with per-class reverse maps from spelling to kind.
///
/// The maps are ordered so prefix queries (used by operators and
/// delimiters for longest match) are a single range lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lexicon {
    table: TokenTable,
    spellings: ClassTable<BTreeMap<String, String>>,
}

impl Lexicon {
    pub fn new(table: TokenTable) -> Self {
        for stray in table.stray_spellings() {
            warn!(
                class = stray.class.name(),
                kind = %stray.kind,
                spelling = %stray.spelling,
                character = %stray.character,
                "compound spelling uses a character outside its class and can never be lexed"
            );
        }

        let spellings = table.compound_types.map(|_, kinds| {
            let mut reverse = BTreeMap::new();
            for (kind, spelling) in kinds {
                for text in spelling.iter() {
                    reverse.insert(text.to_owned(), kind.clone());
                }
            }
            reverse
        });

        Lexicon { table, spellings }
    }

    #[inline]
    pub fn table(&self) -> &TokenTable {
        &self.table
    }

    /// Classify a character. Whitespace wins over every terminal class, and
    /// terminal classes are tested in [`TerminalClass::ALL`] order.
    pub fn classify(&self, ch: char) -> Option<CharClass> {
        if self.table.skip.whitespace.contains(ch) {
            return Some(CharClass::Whitespace);
        }
        self.table
            .terminals
            .iter()
            .find(|(_, chars)| chars.contains(ch))
            .map(|(class, _)| CharClass::Terminal(class))
    }

    /// The compound kind spelled exactly `text` in `class`.
    pub fn compound(&self, class: TerminalClass, text: &str) -> Option<&str> {
        self.spellings.get(class).get(text).map(String::as_str)
    }

    /// True if some compound spelling of `class` starts with `prefix`.
    pub fn is_compound_prefix(&self, class: TerminalClass, prefix: &str) -> bool {
        self.spellings
            .get(class)
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()
            .is_some_and(|(spelling, _)| spelling.starts_with(prefix))
    }

    #[inline]
    pub fn is_terminal(&self, class: TerminalClass, ch: char) -> bool {
        self.table.terminals.get(class).contains(ch)
    }

    #[inline]
    pub fn base_kind(&self, class: TerminalClass) -> &str {
        self.table.base_types.get(class)
    }
}

impl From<TokenTable> for Lexicon {
    fn from(table: TokenTable) -> Self {
        Lexicon::new(table)
    }
}
