//! Typed form of a grammar declaration.
//!
//! The grammar parser produces generic [`Node`]s. Everything after it works
//! on these types instead, so a misspelled field name is a compile error
//! rather than a silently empty property.

use bnfy_ir::{Node, Token};
use bnfy_stack::ensure_sufficient_stack;

/// One `name ::= body;` rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: Token,
    pub modifiers: Vec<Token>,
    pub body: Syntax,
    /// The declaration node the rule was lowered from.
    pub source: Node,
}

impl Declaration {
    /// True if one of the modifiers spells `modifier`.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|token| token.text() == modifier)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Repeat {
    /// `^`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Repeat {
    pub fn symbol(self) -> &'static str {
        match self {
            Repeat::Optional => "^",
            Repeat::ZeroOrMore => "*",
            Repeat::OneOrMore => "+",
        }
    }
}

/// `: name` or `: name[]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyAssign {
    pub name: Token,
    pub is_list: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Syntax {
    /// `a | b | c`, tried in order.
    Choice(Vec<Syntax>),
    Sequence(Vec<Syntax>),
    Repeat {
        body: Box<Syntax>,
        repeat: Repeat,
    },
    /// `condition ? then : otherwise`
    Conditional {
        condition: Box<Syntax>,
        then: Box<Syntax>,
        otherwise: Option<Box<Syntax>>,
    },
    /// `<A, B: prop>`, or `<!A, B>` when negated.
    Terminal {
        kinds: Vec<Token>,
        negated: bool,
        assign: Option<PropertyAssign>,
    },
    /// `{rule: prop}`, or `{main rule: prop}`.
    NonTerminal {
        rule: Token,
        main: bool,
        assign: Option<PropertyAssign>,
    },
}

impl Syntax {
    /// Visit this syntax and everything nested in it, parents before
    /// children and left to right.
    pub fn walk<'s>(&'s self, visit: &mut impl FnMut(&'s Syntax)) {
        visit(self);
        ensure_sufficient_stack(|| {
            match self {
                Syntax::Choice(items) | Syntax::Sequence(items) => {
                    for item in items {
                        item.walk(visit);
                    }
                }
                Syntax::Repeat { body, .. } => body.walk(visit),
                Syntax::Conditional {
                    condition,
                    then,
                    otherwise,
                } => {
                    condition.walk(visit);
                    then.walk(visit);
                    if let Some(otherwise) = otherwise {
                        otherwise.walk(visit);
                    }
                }
                Syntax::Terminal { .. } | Syntax::NonTerminal { .. } => {}
            }
        });
    }

    pub fn assign(&self) -> Option<&PropertyAssign> {
        match self {
            Syntax::Terminal { assign, .. } | Syntax::NonTerminal { assign, .. } => {
                assign.as_ref()
            }
            _ => None,
        }
    }

    /// Move the nested syntax out, leaving empty placeholders behind.
    fn detach_children(&mut self, into: &mut Vec<Syntax>) {
        match self {
            Syntax::Choice(items) | Syntax::Sequence(items) => into.append(items),
            Syntax::Repeat { body, .. } => detach(body, into),
            Syntax::Conditional {
                condition,
                then,
                otherwise,
            } => {
                detach(condition, into);
                detach(then, into);
                if let Some(otherwise) = otherwise {
                    detach(otherwise, into);
                }
            }
            Syntax::Terminal { .. } | Syntax::NonTerminal { .. } => {}
        }
    }
}

fn detach(slot: &mut Syntax, into: &mut Vec<Syntax>) {
    into.push(std::mem::replace(slot, Syntax::Sequence(Vec::new())));
}

impl Drop for Syntax {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut syntax) = pending.pop() {
            syntax.detach_children(&mut pending);
        }
    }
}
