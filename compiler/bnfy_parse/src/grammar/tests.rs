use super::*;
use crate::bootstrap::GRAMMAR;
use bnfy_diagnostic::Error;
use pretty_assertions::assert_eq;

/// Compact rendering: nodes as `(tag field=... )`, tokens as their text,
/// empty fields omitted.
fn shape(value: &Value) -> String {
    match value {
        Value::Null => "_".to_owned(),
        Value::Token(token) => token.text().to_owned(),
        Value::List(items) => {
            let items: Vec<_> = items.iter().map(shape).collect();
            format!("[{}]", items.join(" "))
        }
        Value::Node(node) => {
            let mut out = format!("({}", node.tag);
            for (name, field) in &node.fields {
                if !field.is_empty() {
                    out.push_str(&format!(" {name}={}", shape(field)));
                }
            }
            out.push(')');
            out
        }
    }
}

fn parse(source: &str) -> Result<Node> {
    GrammarParser::default().parse(source)
}

fn parse_shape(source: &str) -> String {
    match parse(source) {
        Ok(node) => shape(&node.into()),
        Err(err) => format!("error: {err}"),
    }
}

#[test]
fn test_empty_source_is_one_empty_statement() {
    assert_eq!(parse_shape(""), "(grammar statements=[(empty)])");
}

#[test]
fn test_declaration_with_alternatives() {
    assert_eq!(
        parse_shape("entry a ::= <X: x> | {b};"),
        "(grammar statements=[(declaration modifiers=[entry] name=a body=(syntax \
         first=(sequence elements=[(terminal kinds=[X] assign=(property_assign name=x))]) \
         rest=(sequence elements=[(non_terminal rule=b)]))) (empty)])"
    );
}

#[test]
fn test_single_elements_keep_their_sequence() {
    assert_eq!(
        parse_shape("a ::= <X>"),
        "(grammar statements=[(declaration name=a body=(sequence elements=[(terminal kinds=[X])]))])"
    );
}

#[test]
fn test_repetition_and_list_properties() {
    assert_eq!(
        parse_shape("a ::= {main b: items[]}* <!X, Y>"),
        "(grammar statements=[(declaration name=a body=(sequence elements=[\
         (repetition target=(non_terminal modifiers=[main] rule=b \
         assign=(property_assign name=items list=[)) operator=*) \
         (terminal negated=! kinds=[X Y])]))])"
    );
}

#[test]
fn test_conditional_with_otherwise() {
    assert_eq!(
        parse_shape("a ::= <X> ? <Y> : <Z>"),
        "(grammar statements=[(declaration name=a body=(sequence elements=[\
         (conditional condition=(terminal kinds=[X]) \
         then=(sequence elements=[(terminal kinds=[Y])]) \
         otherwise=(sequence elements=[(terminal kinds=[Z])]))]))])"
    );
}

#[test]
fn test_parenthesized_group_stands_for_its_syntax() {
    assert_eq!(
        parse_shape("a ::= (<X> <Y>)^"),
        "(grammar statements=[(declaration name=a body=(sequence elements=[\
         (repetition target=(sequence elements=[(terminal kinds=[X]) (terminal kinds=[Y])]) \
         operator=^)]))])"
    );
}

#[test]
fn test_comments_are_ignored() {
    assert_eq!(
        parse_shape("/* rule */ a ::= <X> // trailing"),
        parse_shape("a ::= <X>")
    );
}

#[test]
fn test_bootstrap_grammar_parses() {
    let grammar = parse(GRAMMAR);
    assert!(grammar.is_ok(), "{grammar:?}");
    let grammar = grammar.map(Value::from).unwrap_or_default();
    let statements = grammar
        .as_node()
        .map(|g| g.list("statements").to_vec())
        .unwrap_or_default();
    let names: Vec<_> = statements
        .iter()
        .filter_map(Value::as_node)
        .filter_map(|s| s.token("name"))
        .map(|t| t.text())
        .collect();
    assert_eq!(
        names,
        vec![
            "grammar",
            "statement",
            "empty",
            "declaration",
            "syntax",
            "sequence",
            "repetition",
            "conditional",
            "identity",
            "terminal",
            "non_terminal",
            "property_assign",
        ]
    );
    assert_eq!(statements.last().and_then(Value::as_node).map(|n| n.tag.as_str()), Some("empty"));
}

#[test]
fn test_illegal_character() {
    assert!(matches!(
        parse("`"),
        Err(Error::IllegalCharacter { ch: '`', .. })
    ));
}

#[test]
fn test_unknown_operator_sequence() {
    assert!(matches!(
        parse("entry test :::= <id>;"),
        Err(Error::TokenError { .. })
    ));
}

#[test]
fn test_unexpected_token_is_reported_where_it_happens() {
    let err = parse("entry test ::= <id> <fire;");
    match err {
        Err(Error::UnexpectedToken { found, expected }) => {
            assert_eq!(found.kind, "SEMI");
            assert_eq!(found.start.column, 26);
            assert_eq!(expected, vec!["RANGLE".to_owned()]);
        }
        other => panic!("expected an unexpected token error, got {other:?}"),
    }
}

#[test]
fn test_missing_separator_between_declarations() {
    assert!(matches!(
        parse("a ::= <X> b ::= <Y>;"),
        Err(Error::UnexpectedToken { ref found, .. }) if found.text() == "b"
    ));
}

#[test]
fn test_deeply_nested_groups_do_not_overflow() {
    let depth = 2_000;
    let source = format!("a ::= {}<X>{};", "(".repeat(depth), ")".repeat(depth));
    assert!(parse(&source).is_ok());
}
