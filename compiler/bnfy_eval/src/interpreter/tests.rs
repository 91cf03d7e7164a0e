use super::*;
use bnfy_ir::{ClassTable, TerminalClass, Value};
use bnfy_parse::GrammarParser;
use pretty_assertions::assert_eq;

fn table() -> TokenTable {
    use TerminalClass::{Alpha, Operator};

    TokenTable::new(ClassTable {
        number: "0123456789".to_owned(),
        alpha: "abcdefghijklmnopqrstuvwxyz".to_owned(),
        operator: "+".to_owned(),
        delimiter: String::new(),
        literal: String::new(),
    })
    .with_base_type(Alpha, "id")
    .with_compound(Operator, "PLUS", "+")
}

fn interpret(grammar: &str) -> Result<ParserSchema> {
    let ast = GrammarParser::default().parse(grammar)?;
    Interpreter::new(table()).interpret(&ast)
}

#[test]
fn test_compiles_rules_in_order() {
    let schema = interpret("b ::= <id: name>; entry a ::= {b: first} (<PLUS> {b: rest[]})*;");
    let Ok(schema) = schema else {
        panic!("{schema:?}");
    };
    assert_eq!(schema.entry_point().text(), "a");
    let names: Vec<_> = schema.rules().iter().map(Rule::name).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_forward_references_are_allowed() {
    assert!(interpret("entry a ::= {b: x}; b ::= <id: y>;").is_ok());
}

#[test]
fn test_non_grammar_root_is_malformed() {
    let interpreter = Interpreter::new(table());
    assert!(matches!(
        interpreter.interpret(&Node::new("sum")),
        Err(Error::MalformedAst { .. })
    ));
}

#[test]
fn test_missing_entry_point() {
    assert_eq!(interpret("a ::= <id: x>;").err(), Some(Error::NoEntryPoint));
}

#[test]
fn test_empty_grammar_has_no_entry_point() {
    assert_eq!(interpret("").err(), Some(Error::NoEntryPoint));
}

#[test]
fn test_repeated_entry_modifier() {
    assert!(matches!(
        interpret("entry test ::= <id>; entry nope ::= <id>;"),
        Err(Error::DuplicateIdentifier { ref token, .. })
            if token.text() == "entry" && token.start.column == 22
    ));
}

#[test]
fn test_rule_declared_twice() {
    assert!(matches!(
        interpret("entry a ::= <id>; a ::= <PLUS>;"),
        Err(Error::DuplicateIdentifier { ref token, .. }) if token.start.column == 19
    ));
}

#[test]
fn test_undefined_non_terminal() {
    assert!(matches!(
        interpret("entry test ::= {unknown: x};"),
        Err(Error::IdentifierNotFound { ref token, .. }) if token.text() == "unknown"
    ));
}

#[test]
fn test_undefined_terminal() {
    assert!(matches!(
        interpret("entry test ::= <unknown: x>;"),
        Err(Error::IdentifierNotFound { ref token, .. }) if token.text() == "unknown"
    ));
}

#[test]
fn test_reserved_kinds_are_known() {
    assert!(interpret("entry a ::= <INTEGER_CONST, REAL_CONST: n> <EOF>;").is_ok());
}

#[test]
fn test_reserved_rule_names() {
    for name in RESERVED_NAMES {
        let grammar = format!("entry {name} ::= <id>;");
        assert!(
            matches!(interpret(&grammar), Err(Error::ReservedName { ref token }) if token.text() == name),
            "{name} should be reserved"
        );
    }
}

#[test]
fn test_reserved_property_names() {
    assert!(matches!(
        interpret("entry a ::= <id: tag>;"),
        Err(Error::ReservedName { .. })
    ));
}

#[test]
fn test_compiled_parser_runs() {
    let schema = interpret("entry sum ::= {main num: left} (<PLUS> {sum: right})^; num ::= <INTEGER_CONST: value>;");
    let Ok(schema) = schema else {
        panic!("{schema:?}");
    };
    let value = schema.parse("1 + 2 + 3").unwrap_or_default();
    let mut numbers = Vec::new();
    let mut current = Some(&value);
    while let Some(Value::Node(node)) = current {
        match node.tag.as_str() {
            "sum" => {
                numbers.extend(node.node("left").and_then(|n| n.token("value")).map(|t| t.text().to_owned()));
                current = node.get("right");
            }
            _ => {
                numbers.extend(node.token("value").map(|t| t.text().to_owned()));
                current = None;
            }
        }
    }
    assert_eq!(numbers, vec!["1", "2", "3"]);
}
