//! Per-rule property declarations.
//!
//! A rule's node carries one field per distinct property name assigned
//! anywhere in its body, in order of first appearance. List properties
//! start as an empty list, all others as null. Negated terminals only peek,
//! so their properties are never declared.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::Token;

use crate::syntax::{PropertyAssign, Syntax};

/// Names that may not be used for rules or properties.
///
/// `tag` would collide with the node tag in serialized trees, `parse` with
/// the schema entry point.
pub const RESERVED_NAMES: [&str; 2] = ["tag", "parse"];

/// What fills a property.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Origin {
    Terminal,
    NonTerminal,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub name: String,
    /// Origin of the first assignment.
    pub origin: Origin,
    /// Token kinds or rule names that fill this property.
    pub sources: Vec<String>,
    pub is_list: bool,
    pub is_main: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeclTable {
    properties: Vec<Property>,
}

impl DeclTable {
    /// Collect the properties assigned in `body`.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservedName`] for a property named after a reserved name
    /// - [`Error::DuplicateIdentifier`] for a second `main` property, or a
    ///   property used both with and without `[]`
    /// - [`Error::MalformedAst`] for `main` on a non-terminal without a
    ///   property
    pub fn build(body: &Syntax) -> Result<Self> {
        let mut table = DeclTable::default();
        let mut outcome = Ok(());
        body.walk(&mut |syntax| {
            if outcome.is_ok() {
                outcome = table.record(syntax);
            }
        });
        outcome.map(|()| table)
    }

    fn record(&mut self, syntax: &Syntax) -> Result<()> {
        match syntax {
            Syntax::Terminal {
                kinds,
                negated: false,
                assign: Some(assign),
            } => {
                let sources = kinds.iter().map(|kind| kind.text().to_owned());
                self.declare(assign, Origin::Terminal, sources)?;
            }
            Syntax::NonTerminal { rule, main, assign } => match assign {
                Some(assign) => {
                    let index =
                        self.declare(assign, Origin::NonTerminal, [rule.text().to_owned()])?;
                    if *main {
                        self.set_main(index, rule)?;
                    }
                }
                None if *main => {
                    return Err(Error::malformed(format!(
                        "`main` on `{rule}` at {} needs a property to assign",
                        rule.start
                    )));
                }
                None => {}
            },
            _ => {}
        }
        Ok(())
    }

    fn declare(
        &mut self,
        assign: &PropertyAssign,
        origin: Origin,
        sources: impl IntoIterator<Item = String>,
    ) -> Result<usize> {
        let name = assign.name.text();
        if RESERVED_NAMES.contains(&name) {
            return Err(Error::ReservedName {
                token: assign.name.clone(),
            });
        }
        let index = match self.position(name) {
            Some(index) => {
                if self.properties[index].is_list != assign.is_list {
                    return Err(Error::duplicate(
                        assign.name.clone(),
                        "property used both as a list and as a single value",
                    ));
                }
                index
            }
            None => {
                self.properties.push(Property {
                    name: name.to_owned(),
                    origin,
                    sources: Vec::new(),
                    is_list: assign.is_list,
                    is_main: false,
                });
                self.properties.len() - 1
            }
        };
        let property = &mut self.properties[index];
        for source in sources {
            if !property.sources.contains(&source) {
                property.sources.push(source);
            }
        }
        Ok(index)
    }

    fn set_main(&mut self, index: usize, at: &Token) -> Result<()> {
        if let Some(main) = self.main() {
            return Err(Error::duplicate(
                at.clone(),
                format!("`main` already declared for `{}`", main.name),
            ));
        }
        self.properties[index].is_main = true;
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.properties
            .iter()
            .position(|property| property.name == name)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.position(name).map(|index| &self.properties[index])
    }

    pub fn main(&self) -> Option<&Property> {
        self.properties.iter().find(|property| property.is_main)
    }

    /// True for rules without properties. Such rules pass the value of a
    /// bare non-terminal call through as their own result.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
