//! Lowering of the untyped grammar AST into [`Declaration`]s.
//!
//! Accepts exactly the trees [`GrammarParser`](bnfy_parse::GrammarParser)
//! and the self-hosted grammar parser build. Any other shape is a
//! [`Error::MalformedAst`].

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::{Node, Token, Value};
use bnfy_parse::bootstrap::{kind, MAIN_MODIFIER};
use bnfy_stack::ensure_sufficient_stack;
use tracing::warn;

use crate::syntax::{Declaration, PropertyAssign, Repeat, Syntax};

/// Lower a `grammar` node into its declarations, in source order.
///
/// Empty statements are dropped.
pub fn lower(grammar: &Node) -> Result<Vec<Declaration>> {
    if grammar.tag != "grammar" {
        return Err(Error::malformed(format!(
            "entry node is `{}`, not `grammar`",
            grammar.tag
        )));
    }
    let mut declarations = Vec::new();
    for statement in grammar.list("statements") {
        let node = expect_node(statement, "statement")?;
        match node.tag.as_str() {
            "empty" => {}
            "declaration" => declarations.push(declaration(node)?),
            other => return Err(unexpected_tag(other, "statement")),
        }
    }
    Ok(declarations)
}

fn declaration(node: &Node) -> Result<Declaration> {
    Ok(Declaration {
        name: expect_token(node, "name")?.clone(),
        modifiers: tokens(node.list("modifiers"))?,
        body: syntax(field(node, "body")?)?,
        source: node.clone(),
    })
}

fn syntax(value: &Value) -> Result<Syntax> {
    ensure_sufficient_stack(|| {
        let node = expect_node(value, "syntax")?;
        match node.tag.as_str() {
            "syntax" => {
                let mut alternatives = Vec::new();
                let mut rest = node;
                loop {
                    alternatives.push(syntax(field(rest, "first")?)?);
                    match rest.get("rest") {
                        Some(Value::Node(next)) if next.tag == "syntax" => rest = &**next,
                        Some(last) if !last.is_empty() => {
                            alternatives.push(syntax(last)?);
                            break;
                        }
                        _ => break,
                    }
                }
                Ok(match alternatives.len() {
                    1 => alternatives.swap_remove(0),
                    _ => Syntax::Choice(alternatives),
                })
            }
            "sequence" => {
                let elements = node
                    .list("elements")
                    .iter()
                    .map(syntax)
                    .collect::<Result<Vec<_>>>()?;
                if elements.is_empty() {
                    return Err(Error::malformed("sequence without elements"));
                }
                Ok(Syntax::Sequence(elements))
            }
            "repetition" => {
                let operator = expect_token(node, "operator")?;
                let repeat = match operator.kind.as_str() {
                    kind::REPEAT_01 => Repeat::Optional,
                    kind::REPEAT_0N => Repeat::ZeroOrMore,
                    kind::REPEAT_1N => Repeat::OneOrMore,
                    other => {
                        return Err(Error::malformed(format!(
                            "unknown repetition operator `{other}`"
                        )))
                    }
                };
                Ok(Syntax::Repeat {
                    body: Box::new(syntax(field(node, "target")?)?),
                    repeat,
                })
            }
            "conditional" => Ok(Syntax::Conditional {
                condition: Box::new(syntax(field(node, "condition")?)?),
                then: Box::new(syntax(field(node, "then")?)?),
                otherwise: match node.get("otherwise") {
                    Some(value) if !value.is_empty() => Some(Box::new(syntax(value)?)),
                    _ => None,
                },
            }),
            "terminal" => {
                let kinds = tokens(node.list("kinds"))?;
                if kinds.is_empty() {
                    return Err(Error::malformed("terminal without token kinds"));
                }
                Ok(Syntax::Terminal {
                    kinds,
                    negated: node.get("negated").is_some_and(|value| !value.is_empty()),
                    assign: assign(node)?,
                })
            }
            "non_terminal" => {
                let mut main = false;
                for modifier in tokens(node.list("modifiers"))? {
                    if modifier.text() == MAIN_MODIFIER {
                        main = true;
                    } else {
                        warn!(modifier = %modifier, at = %modifier.start, "ignoring unknown modifier");
                    }
                }
                Ok(Syntax::NonTerminal {
                    rule: expect_token(node, "rule")?.clone(),
                    main,
                    assign: assign(node)?,
                })
            }
            other => Err(unexpected_tag(other, "syntax")),
        }
    })
}

fn assign(node: &Node) -> Result<Option<PropertyAssign>> {
    let Some(value) = node.get("assign").filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let assign = expect_node(value, "property_assign")?;
    if assign.tag != "property_assign" {
        return Err(unexpected_tag(&assign.tag, "property assignment"));
    }
    Ok(Some(PropertyAssign {
        name: expect_token(assign, "name")?.clone(),
        is_list: assign.get("list").is_some_and(|value| !value.is_empty()),
    }))
}

fn field<'n>(node: &'n Node, name: &str) -> Result<&'n Value> {
    node.get(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::malformed(format!("`{}` node without `{name}`", node.tag)))
}

fn expect_node<'v>(value: &'v Value, what: &str) -> Result<&'v Node> {
    value
        .as_node()
        .ok_or_else(|| Error::malformed(format!("expected a {what} node")))
}

fn expect_token<'n>(node: &'n Node, name: &str) -> Result<&'n Token> {
    field(node, name)?
        .as_token()
        .ok_or_else(|| Error::malformed(format!("`{}.{name}` is not a token", node.tag)))
}

fn tokens(values: &[Value]) -> Result<Vec<Token>> {
    values
        .iter()
        .map(|value| {
            value
                .as_token()
                .cloned()
                .ok_or_else(|| Error::malformed("expected a token"))
        })
        .collect()
}

fn unexpected_tag(tag: &str, what: &str) -> Error {
    Error::malformed(format!("unexpected `{tag}` node where a {what} belongs"))
}
