//! Hand-written parser for the BNF description language.
//!
//! Each method implements the rule of the same name in
//! [`bootstrap::GRAMMAR`](crate::bootstrap::GRAMMAR) and builds the same
//! node a generated parser would: fields in declaration order, list fields
//! starting empty, and `main` properties standing in for their rule when no
//! other property was set.

use bnfy_diagnostic::Result;
use bnfy_ir::{Node, TokenTable, Value};
use bnfy_lexer::Lexicon;
use bnfy_stack::ensure_sufficient_stack;
use tracing::{debug, instrument};

use crate::bootstrap::{self, kind};
use crate::Cursor;

/// Parser for grammar descriptions written in the BNF description language.
#[derive(Clone, Debug)]
pub struct GrammarParser {
    lexicon: Lexicon,
}

impl GrammarParser {
    /// A parser over a custom table. The table must spell every kind in
    /// [`bootstrap::kind`]; use [`GrammarParser::default`] for the standard one.
    pub fn new(table: TokenTable) -> Self {
        GrammarParser {
            lexicon: Lexicon::new(table),
        }
    }

    pub fn table(&self) -> &TokenTable {
        self.lexicon.table()
    }

    /// Parse a grammar description into its `grammar` node.
    #[instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn parse(&self, source: &str) -> Result<Node> {
        let mut cursor = Cursor::new(source, &self.lexicon)?;
        let grammar = grammar(&mut cursor)?;
        debug!(statements = grammar.list("statements").len(), "parsed grammar");
        Ok(grammar)
    }
}

impl Default for GrammarParser {
    fn default() -> Self {
        GrammarParser::new(bootstrap::table())
    }
}

/// Start a node with its declared fields.
fn node(tag: &str, fields: &[(&str, bool)]) -> Node {
    let mut node = Node::new(tag);
    for &(name, is_list) in fields {
        node.declare(name, is_list);
    }
    node
}

/// The `main` property's value if every other property is empty, else the
/// node itself.
fn fall_back(mut node: Node, main: &str) -> Value {
    let others_empty = node
        .fields
        .iter()
        .all(|(name, value)| name == main || value.is_empty());
    if others_empty {
        node.take(main)
    } else {
        node.into()
    }
}

fn grammar(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node("grammar", &[("statements", true)]);
    ast.push("statements", statement(cursor)?);
    while cursor.check(&[kind::SEMI]) {
        cursor.eat(&[kind::SEMI])?;
        ast.push("statements", statement(cursor)?);
    }
    cursor.eat(&[kind::EOF])?;
    Ok(ast)
}

/// `empty` and `declaration` start with disjoint tokens, so trying the
/// one-token `empty` first lets errors inside a declaration surface where
/// they happen.
fn statement(cursor: &mut Cursor<'_>) -> Result<Value> {
    match cursor.try_parse(empty)? {
        Some(ast) => Ok(ast.into()),
        None => Ok(declaration(cursor)?.into()),
    }
}

fn empty(cursor: &mut Cursor<'_>) -> Result<Node> {
    cursor.expect(&[kind::SEMI, kind::EOF])?;
    Ok(node("empty", &[]))
}

fn declaration(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node(
        "declaration",
        &[("modifiers", true), ("name", false), ("body", false)],
    );
    while cursor.check(&[kind::D_MODIFIER]) {
        ast.push("modifiers", cursor.eat(&[kind::D_MODIFIER])?);
    }
    ast.set("name", cursor.eat(&[kind::ALPHA])?);
    cursor.eat(&[kind::ASSIGN])?;
    ast.set("body", syntax(cursor)?);
    Ok(ast)
}

fn syntax(cursor: &mut Cursor<'_>) -> Result<Value> {
    ensure_sufficient_stack(|| {
        let mut ast = node("syntax", &[("first", false), ("rest", false)]);
        ast.set("first", sequence(cursor)?);
        if cursor.check(&[kind::OR]) {
            cursor.eat(&[kind::OR])?;
            ast.set("rest", syntax(cursor)?);
        }
        Ok(fall_back(ast, "first"))
    })
}

fn sequence(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node("sequence", &[("elements", true)]);
    ast.push("elements", repetition(cursor)?);
    while cursor.check(&[kind::LBRACKET, kind::LANGLE, kind::LPAREN]) {
        ast.push("elements", repetition(cursor)?);
    }
    Ok(ast)
}

fn repetition(cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut ast = node("repetition", &[("target", false), ("operator", false)]);
    ast.set("target", conditional(cursor)?);
    if cursor.check(&kind::REPEATS) {
        ast.set("operator", cursor.eat(&kind::REPEATS)?);
    }
    Ok(fall_back(ast, "target"))
}

fn conditional(cursor: &mut Cursor<'_>) -> Result<Value> {
    let mut ast = node(
        "conditional",
        &[("condition", false), ("then", false), ("otherwise", false)],
    );
    ast.set("condition", identity(cursor)?);
    if cursor.check(&[kind::IF]) {
        cursor.eat(&[kind::IF])?;
        ast.set("then", syntax(cursor)?);
        if cursor.check(&[kind::COLON]) {
            cursor.eat(&[kind::COLON])?;
            ast.set("otherwise", syntax(cursor)?);
        }
    }
    Ok(fall_back(ast, "condition"))
}

fn identity(cursor: &mut Cursor<'_>) -> Result<Value> {
    if cursor.check(&[kind::LBRACKET]) {
        return Ok(non_terminal(cursor)?.into());
    }
    if cursor.check(&[kind::LANGLE]) {
        return Ok(terminal(cursor)?.into());
    }
    cursor.eat(&[kind::LPAREN])?;
    let ast = syntax(cursor)?;
    cursor.eat(&[kind::RPAREN])?;
    Ok(ast)
}

fn terminal(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node(
        "terminal",
        &[("negated", false), ("kinds", true), ("assign", false)],
    );
    cursor.eat(&[kind::LANGLE])?;
    if cursor.check(&[kind::NOT]) {
        ast.set("negated", cursor.eat(&[kind::NOT])?);
    }
    ast.push("kinds", cursor.eat(&[kind::ALPHA])?);
    while cursor.check(&[kind::COMMA]) {
        cursor.eat(&[kind::COMMA])?;
        ast.push("kinds", cursor.eat(&[kind::ALPHA])?);
    }
    if cursor.check(&[kind::COLON]) {
        ast.set("assign", property_assign(cursor)?);
    }
    cursor.eat(&[kind::RANGLE])?;
    Ok(ast)
}

fn non_terminal(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node(
        "non_terminal",
        &[("modifiers", true), ("rule", false), ("assign", false)],
    );
    cursor.eat(&[kind::LBRACKET])?;
    while cursor.check(&[kind::NT_MODIFIER]) {
        ast.push("modifiers", cursor.eat(&[kind::NT_MODIFIER])?);
    }
    ast.set("rule", cursor.eat(&[kind::ALPHA])?);
    if cursor.check(&[kind::COLON]) {
        ast.set("assign", property_assign(cursor)?);
    }
    cursor.eat(&[kind::RBRACKET])?;
    Ok(ast)
}

fn property_assign(cursor: &mut Cursor<'_>) -> Result<Node> {
    let mut ast = node("property_assign", &[("name", false), ("list", false)]);
    cursor.eat(&[kind::COLON])?;
    ast.set("name", cursor.eat(&[kind::ALPHA])?);
    if cursor.check(&[kind::LSQBRACKET]) {
        ast.set("list", cursor.eat(&[kind::LSQBRACKET])?);
        cursor.eat(&[kind::RSQBRACKET])?;
    }
    Ok(ast)
}

#[cfg(test)]
mod tests;
