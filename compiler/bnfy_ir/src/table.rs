//! Token tables: the declarative lexical description of a language.
//!
//! A table names five terminal character classes and, per class, the
//! compound kinds spelled with those characters (keywords for `alpha`,
//! multi-character symbols for `operator`, brackets for `delimiter`, ...).
//! The lexer classifies each token by the class of its first character and
//! then resolves the accumulated text against the compound spellings.
//!
//! Tables are plain data. They derive serde so an embedding application may
//! keep them in JSON next to its grammar text.
//!
//! # Invariant
//!
//! Every compound spelling must be made of characters from its own class
//! (alpha spellings may also use number characters after the first one).
//! The lexer cannot produce a token for a spelling that violates this;
//! [`TokenTable::stray_spellings`] reports such entries.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The five terminal character classes, in classification priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalClass {
    Number,
    Alpha,
    Operator,
    Delimiter,
    Literal,
}

impl TerminalClass {
    /// All classes, in the order the lexer tests them.
    pub const ALL: [TerminalClass; 5] = [
        TerminalClass::Number,
        TerminalClass::Alpha,
        TerminalClass::Operator,
        TerminalClass::Delimiter,
        TerminalClass::Literal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TerminalClass::Number => "number",
            TerminalClass::Alpha => "alpha",
            TerminalClass::Operator => "operator",
            TerminalClass::Delimiter => "delimiter",
            TerminalClass::Literal => "literal",
        }
    }
}

/// One value per terminal class.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClassTable<T> {
    pub number: T,
    pub alpha: T,
    pub operator: T,
    pub delimiter: T,
    pub literal: T,
}

impl<T> ClassTable<T> {
    pub fn get(&self, class: TerminalClass) -> &T {
        match class {
            TerminalClass::Number => &self.number,
            TerminalClass::Alpha => &self.alpha,
            TerminalClass::Operator => &self.operator,
            TerminalClass::Delimiter => &self.delimiter,
            TerminalClass::Literal => &self.literal,
        }
    }

    pub fn get_mut(&mut self, class: TerminalClass) -> &mut T {
        match class {
            TerminalClass::Number => &mut self.number,
            TerminalClass::Alpha => &mut self.alpha,
            TerminalClass::Operator => &mut self.operator,
            TerminalClass::Delimiter => &mut self.delimiter,
            TerminalClass::Literal => &mut self.literal,
        }
    }

    /// Build a new table by applying `f` to every class entry.
    pub fn map<U>(&self, mut f: impl FnMut(TerminalClass, &T) -> U) -> ClassTable<U> {
        ClassTable {
            number: f(TerminalClass::Number, &self.number),
            alpha: f(TerminalClass::Alpha, &self.alpha),
            operator: f(TerminalClass::Operator, &self.operator),
            delimiter: f(TerminalClass::Delimiter, &self.delimiter),
            literal: f(TerminalClass::Literal, &self.literal),
        }
    }

    /// Entries in classification priority order.
    pub fn iter(&self) -> impl Iterator<Item = (TerminalClass, &T)> {
        TerminalClass::ALL.into_iter().map(move |class| (class, self.get(class)))
    }
}

/// Characters ignored between tokens.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Skip {
    pub whitespace: String,
}

/// Kind names the lexer assigns on its own.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReservedTypes {
    pub real_const: String,
    pub integer_const: String,
    pub eof: String,
}

/// Fallback kind name per class, used when no compound spelling matches.
pub type BaseTypes = ClassTable<String>;

/// Comment delimiters. An empty string disables that comment form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpecialTypes {
    pub comment_start: String,
    pub comment_end: String,
    pub comment_inline: String,
}

/// The spelling(s) of one compound kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spelling {
    One(String),
    Many(Vec<String>),
}

impl Spelling {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let spellings: &[String] = match self {
            Spelling::One(one) => std::slice::from_ref(one),
            Spelling::Many(many) => many,
        };
        spellings.iter().map(String::as_str)
    }
}

impl From<&str> for Spelling {
    fn from(spelling: &str) -> Self {
        Spelling::One(spelling.to_owned())
    }
}

impl From<String> for Spelling {
    fn from(spelling: String) -> Self {
        Spelling::One(spelling)
    }
}

impl<const N: usize> From<[&str; N]> for Spelling {
    fn from(spellings: [&str; N]) -> Self {
        Spelling::Many(spellings.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// A compound spelling that uses a character outside its terminal class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StraySpelling {
    pub class: TerminalClass,
    pub kind: String,
    pub spelling: String,
    pub character: char,
}

/// The lexical description of a language.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenTable {
    /// Characters that start (and continue) each class of token.
    pub terminals: ClassTable<String>,
    pub skip: Skip,
    pub reserved_types: ReservedTypes,
    pub base_types: BaseTypes,
    pub special_types: SpecialTypes,
    /// Per class: compound kind name -> spelling(s).
    pub compound_types: ClassTable<BTreeMap<String, Spelling>>,
}

impl TokenTable {
    /// A table over `terminals` with the conventional defaults: whitespace
    /// ` \n\t\r`, reserved kinds `REAL_CONST`/`INTEGER_CONST`/`EOF`, base
    /// kinds named after their class, C-style comments, no compounds.
    pub fn new(terminals: ClassTable<String>) -> Self {
        TokenTable {
            terminals,
            skip: Skip {
                whitespace: " \n\t\r".to_owned(),
            },
            reserved_types: ReservedTypes {
                real_const: "REAL_CONST".to_owned(),
                integer_const: "INTEGER_CONST".to_owned(),
                eof: "EOF".to_owned(),
            },
            base_types: ClassTable::default().map(|class, _: &String| class.name().to_owned()),
            special_types: SpecialTypes {
                comment_start: "/*".to_owned(),
                comment_end: "*/".to_owned(),
                comment_inline: "//".to_owned(),
            },
            compound_types: ClassTable::default(),
        }
    }

    #[must_use]
    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.skip.whitespace = whitespace.into();
        self
    }

    #[must_use]
    pub fn with_comments(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        inline: impl Into<String>,
    ) -> Self {
        self.special_types = SpecialTypes {
            comment_start: start.into(),
            comment_end: end.into(),
            comment_inline: inline.into(),
        };
        self
    }

    #[must_use]
    pub fn with_reserved(
        mut self,
        real_const: impl Into<String>,
        integer_const: impl Into<String>,
        eof: impl Into<String>,
    ) -> Self {
        self.reserved_types = ReservedTypes {
            real_const: real_const.into(),
            integer_const: integer_const.into(),
            eof: eof.into(),
        };
        self
    }

    #[must_use]
    pub fn with_base_type(mut self, class: TerminalClass, kind: impl Into<String>) -> Self {
        *self.base_types.get_mut(class) = kind.into();
        self
    }

    #[must_use]
    pub fn with_compound(
        mut self,
        class: TerminalClass,
        kind: impl Into<String>,
        spelling: impl Into<Spelling>,
    ) -> Self {
        self.compound_types
            .get_mut(class)
            .insert(kind.into(), spelling.into());
        self
    }

    /// Every kind name a grammar over this table may reference: reserved,
    /// base, special and compound kinds.
    pub fn vocabulary(&self) -> FxHashSet<String> {
        let reserved = [
            &self.reserved_types.real_const,
            &self.reserved_types.integer_const,
            &self.reserved_types.eof,
        ];
        let special = [
            &self.special_types.comment_start,
            &self.special_types.comment_end,
            &self.special_types.comment_inline,
        ];
        let base = TerminalClass::ALL.map(|class| self.base_types.get(class));
        let compound = self.compound_types.iter().flat_map(|(_, kinds)| kinds.keys());

        reserved
            .into_iter()
            .chain(base)
            .chain(special)
            .chain(compound)
            .filter(|name| !name.is_empty())
            .cloned()
            .collect()
    }

    /// Compound spellings the lexer can never produce because they contain
    /// characters outside their class.
    pub fn stray_spellings(&self) -> Vec<StraySpelling> {
        let mut strays = Vec::new();
        for (class, kinds) in self.compound_types.iter() {
            // Number and literal tokens are never resolved against compounds.
            if matches!(class, TerminalClass::Number | TerminalClass::Literal) {
                continue;
            }
            let allowed = self.terminals.get(class);
            for (kind, spelling) in kinds {
                for text in spelling.iter() {
                    let stray = text.chars().enumerate().find(|&(i, ch)| {
                        let continues_word = class == TerminalClass::Alpha
                            && i > 0
                            && self.terminals.number.contains(ch);
                        !allowed.contains(ch) && !continues_word
                    });
                    if let Some((_, character)) = stray {
                        strays.push(StraySpelling {
                            class,
                            kind: kind.clone(),
                            spelling: text.to_owned(),
                            character,
                        });
                    }
                }
            }
        }
        strays
    }
}

#[cfg(test)]
mod tests;
