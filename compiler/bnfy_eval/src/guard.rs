//! Lookahead guards.
//!
//! Every optional, repeated, conditional or alternative piece of syntax is
//! entered only if its guard holds for the current token. A guard is the
//! set of token kinds the syntax can start with, plus the rules whose
//! applicability has to be probed because their first tokens are not known
//! without following the call.

use std::fmt;

use bnfy_stack::ensure_sufficient_stack;

use crate::syntax::{Repeat, Syntax};

/// First-token test of a piece of syntax.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Guard {
    /// Token kinds that start the syntax, in order of appearance.
    pub kinds: Vec<String>,
    /// Rules that may start the syntax, tried in order after `kinds`.
    pub probes: Vec<String>,
}

impl Guard {
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.probes.is_empty()
    }

    fn add_kind(&mut self, kind: &str) {
        if !self.kinds.iter().any(|known| known == kind) {
            self.kinds.push(kind.to_owned());
        }
    }

    fn add_probe(&mut self, rule: &str) {
        if !self.probes.iter().any(|known| known == rule) {
            self.probes.push(rule.to_owned());
        }
    }
}

/// Renders as the condition of the rule literal, e.g.
/// `current in [PLUS, MINUS] or is(factor)`.
impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("false");
        }
        let mut separator = "";
        if !self.kinds.is_empty() {
            write!(f, "current in [{}]", self.kinds.join(", "))?;
            separator = " or ";
        }
        for rule in &self.probes {
            write!(f, "{separator}is({rule})")?;
            separator = " or ";
        }
        Ok(())
    }
}

/// Compute the guard of `syntax`.
///
/// Elements of a sequence contribute until the first one that must consume
/// a token; elements that can match nothing (`x^`, `x*`, a conditional
/// without `:`) let the next element's first tokens through as well.
pub fn first_of(syntax: &Syntax) -> Guard {
    let mut guard = Guard::default();
    collect(syntax, &mut guard);
    guard
}

/// Add the first tokens of `syntax` to `guard`, returning whether it can
/// match without consuming anything.
fn collect(syntax: &Syntax, guard: &mut Guard) -> bool {
    ensure_sufficient_stack(|| match syntax {
        Syntax::Terminal { kinds, .. } => {
            for kind in kinds {
                guard.add_kind(kind.text());
            }
            false
        }
        Syntax::NonTerminal { rule, .. } => {
            guard.add_probe(rule.text());
            false
        }
        Syntax::Sequence(elements) => elements.iter().all(|element| collect(element, guard)),
        Syntax::Choice(alternatives) => alternatives
            .iter()
            .fold(false, |nullable, alternative| collect(alternative, guard) || nullable),
        Syntax::Repeat { body, repeat } => {
            let nullable = collect(body, guard);
            *repeat != Repeat::OneOrMore || nullable
        }
        Syntax::Conditional {
            condition,
            otherwise,
            ..
        } => {
            collect(condition, guard);
            match otherwise {
                Some(otherwise) => collect(otherwise, guard),
                None => true,
            }
        }
    })
}
