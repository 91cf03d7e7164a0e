//! Grammar compilation.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::{Node, Token, TokenTable};
use bnfy_lexer::Lexicon;
use bnfy_parse::bootstrap::ENTRY_MODIFIER;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument, warn};

use crate::codegen::generate;
use crate::decl_table::RESERVED_NAMES;
use crate::lower::lower;
use crate::schema::{ParserSchema, Rule};
use crate::syntax::Syntax;

/// Compiles grammar ASTs into [`ParserSchema`]s over one token table.
#[derive(Clone, Debug)]
pub struct Interpreter {
    lexicon: Lexicon,
    vocabulary: FxHashSet<String>,
}

impl Interpreter {
    pub fn new(table: TokenTable) -> Self {
        let vocabulary = table.vocabulary();
        Interpreter {
            lexicon: Lexicon::new(table),
            vocabulary,
        }
    }

    /// Compile a `grammar` node.
    ///
    /// Rules are compiled in declaration order. Once all are known, every
    /// referenced rule must be declared and exactly one rule must carry the
    /// `entry` modifier.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedAst`] if `grammar` is not a grammar tree
    /// - [`Error::ReservedName`] for a rule or property with a reserved name
    /// - [`Error::DuplicateIdentifier`] for a rule declared twice, a second
    ///   `entry` rule or a conflicting property
    /// - [`Error::IdentifierNotFound`] for a token kind missing from the
    ///   table or a rule missing from the grammar
    /// - [`Error::NoEntryPoint`] if no rule is marked `entry`
    #[instrument(level = "debug", skip_all)]
    pub fn interpret(&self, grammar: &Node) -> Result<ParserSchema> {
        let declarations = lower(grammar)?;
        let mut rules: Vec<Rule> = Vec::with_capacity(declarations.len());
        let mut bodies: Vec<Syntax> = Vec::with_capacity(declarations.len());
        let mut declared: FxHashMap<String, Token> = FxHashMap::default();
        let mut entry_point: Option<Token> = None;

        for declaration in declarations {
            let name = &declaration.name;
            if RESERVED_NAMES.contains(&name.text()) {
                return Err(Error::ReservedName {
                    token: name.clone(),
                });
            }
            if let Some(previous) = declared.get(name.text()) {
                return Err(Error::duplicate(
                    name.clone(),
                    format!("rule already declared at {}", previous.start),
                ));
            }
            for modifier in &declaration.modifiers {
                if modifier.text() != ENTRY_MODIFIER {
                    warn!(%modifier, at = %modifier.start, "ignoring unknown modifier");
                    continue;
                }
                if let Some(entry) = &entry_point {
                    return Err(Error::duplicate(
                        modifier.clone(),
                        format!("entry point already declared for `{entry}` at {}", entry.start),
                    ));
                }
                entry_point = Some(name.clone());
            }
            self.check_terminals(&declaration.body)?;

            let (properties, logic) = generate(&declaration)?;
            debug!(rule = %name, properties = properties.properties().len(), "compiled rule");
            declared.insert(name.text().to_owned(), name.clone());
            rules.push(Rule::new(
                declaration.name,
                declaration.source,
                properties,
                logic,
            ));
            bodies.push(declaration.body);
        }

        for body in &bodies {
            check_rules(body, &declared)?;
        }
        let entry_point = entry_point.ok_or(Error::NoEntryPoint)?;
        Ok(ParserSchema::new(entry_point, rules, self.lexicon.clone()))
    }

    fn check_terminals(&self, body: &Syntax) -> Result<()> {
        let mut outcome = Ok(());
        body.walk(&mut |syntax| {
            let Syntax::Terminal { kinds, .. } = syntax else {
                return;
            };
            for kind in kinds {
                if outcome.is_ok() && !self.vocabulary.contains(kind.text()) {
                    outcome = Err(Error::not_found(
                        kind.clone(),
                        format!("token kind `{kind}` is not defined in the table"),
                    ));
                }
            }
        });
        outcome
    }

    pub fn table(&self) -> &TokenTable {
        self.lexicon.table()
    }
}

/// Every rule `body` calls must be declared.
fn check_rules(body: &Syntax, declared: &FxHashMap<String, Token>) -> Result<()> {
    let mut outcome = Ok(());
    body.walk(&mut |syntax| {
        if let Syntax::NonTerminal { rule, .. } = syntax {
            if outcome.is_ok() && !declared.contains_key(rule.text()) {
                outcome = Err(Error::not_found(
                    rule.clone(),
                    format!("rule `{rule}` is not defined in the grammar"),
                ));
            }
        }
    });
    outcome
}

#[cfg(test)]
mod tests;
