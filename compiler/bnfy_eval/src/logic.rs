//! Rule logic: the program a generated parser runs for one rule.

use std::fmt::{self, Write as _};

use crate::guard::Guard;

/// Where the value of a consumed token or called rule goes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Bind {
    /// Overwrite a single-valued property.
    Assign(String),
    /// Append to a list property.
    Push(String),
    /// Become the rule's result. Used for bare calls in property-less rules.
    Replace,
    Discard,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Stmt {
    /// Consume a token of one of `kinds`.
    Eat { kinds: Vec<String>, bind: Bind },
    /// Require a token of one of `kinds` without consuming it.
    Expect { kinds: Vec<String> },
    Call { rule: String, bind: Bind },
    /// Run the body of the first branch whose guard holds, else `otherwise`.
    If {
        branches: Vec<(Guard, Vec<Stmt>)>,
        otherwise: Vec<Stmt>,
    },
    While { guard: Guard, body: Vec<Stmt> },
}

/// The compiled form of one rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Logic {
    /// Tag of the node the rule builds.
    pub tag: String,
    /// Declared properties and whether each is a list.
    pub fields: Vec<(String, bool)>,
    /// Property returned in place of the node when nothing else was set.
    pub main: Option<String>,
    pub body: Vec<Stmt>,
}

const INDENT: &str = "    ";

fn kinds_list(kinds: &[String]) -> String {
    kinds.join(", ")
}

fn write_block(f: &mut fmt::Formatter<'_>, stmts: &[Stmt], depth: usize) -> fmt::Result {
    for stmt in stmts {
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn line(f: &mut fmt::Formatter<'_>, depth: usize, text: fmt::Arguments<'_>) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    f.write_fmt(text)?;
    f.write_char('\n')
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Eat { kinds, bind } => {
            let call = format!("eat({})", kinds_list(kinds));
            write_bind(f, bind, &call, depth)
        }
        Stmt::Expect { kinds } => line(f, depth, format_args!("expect({})", kinds_list(kinds))),
        Stmt::Call { rule, bind } => write_bind(f, bind, &format!("{rule}()"), depth),
        Stmt::If {
            branches,
            otherwise,
        } => {
            for (index, (guard, body)) in branches.iter().enumerate() {
                if index == 0 {
                    line(f, depth, format_args!("if ({guard}) {{"))?;
                } else {
                    line(f, depth, format_args!("}} else if ({guard}) {{"))?;
                }
                write_block(f, body, depth + 1)?;
            }
            if !otherwise.is_empty() {
                line(f, depth, format_args!("}} else {{"))?;
                write_block(f, otherwise, depth + 1)?;
            }
            line(f, depth, format_args!("}}"))
        }
        Stmt::While { guard, body } => {
            line(f, depth, format_args!("while ({guard}) {{"))?;
            write_block(f, body, depth + 1)?;
            line(f, depth, format_args!("}}"))
        }
    }
}

fn write_bind(f: &mut fmt::Formatter<'_>, bind: &Bind, call: &str, depth: usize) -> fmt::Result {
    match bind {
        Bind::Assign(name) => line(f, depth, format_args!("node.{name} = {call}")),
        Bind::Push(name) => line(f, depth, format_args!("node.{name}.push({call})")),
        Bind::Replace => line(f, depth, format_args!("node = {call}")),
        Bind::Discard => line(f, depth, format_args!("{call}")),
    }
}

/// The human-readable rule literal:
///
/// ```text
/// expression() {
///     node = expression { lNode: null, operator: null, rNode: null }
///     node.lNode = term()
///     if (current in [PLUS, MINUS]) {
///         node.operator = eat(PLUS, MINUS)
///         node.rNode = expression()
///     }
///     if (node.operator, node.rNode are empty) return node.lNode
///     return node
/// }
/// ```
impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self
            .fields
            .iter()
            .map(|(name, is_list)| format!("{name}: {}", if *is_list { "[]" } else { "null" }))
            .collect();
        writeln!(f, "{}() {{", self.tag)?;
        if fields.is_empty() {
            line(f, 1, format_args!("node = {} {{}}", self.tag))?;
        } else {
            line(f, 1, format_args!("node = {} {{ {} }}", self.tag, fields.join(", ")))?;
        }
        write_block(f, &self.body, 1)?;
        match &self.main {
            Some(main) => {
                let others: Vec<_> = self
                    .fields
                    .iter()
                    .filter(|(name, _)| name != main)
                    .map(|(name, _)| format!("node.{name}"))
                    .collect();
                if others.is_empty() {
                    line(f, 1, format_args!("return node.{main}"))?;
                } else {
                    line(
                        f,
                        1,
                        format_args!("if ({} are empty) return node.{main}", others.join(", ")),
                    )?;
                    line(f, 1, format_args!("return node"))?;
                }
            }
            None => line(f, 1, format_args!("return node"))?,
        }
        f.write_char('}')
    }
}
