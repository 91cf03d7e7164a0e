use super::*;
use crate::Position;
use pretty_assertions::assert_eq;

fn tok(kind: &str, text: &str) -> Token {
    Token::new(kind, Position::START, Some(text.to_owned()))
}

#[test]
fn test_set_keeps_field_order() {
    let mut node = Node::new("repetition");
    node.declare("target", false);
    node.declare("operator", false);
    node.set("operator", tok("REPEAT_0N", "*"));
    node.set("target", tok("alpha", "x"));
    let names: Vec<_> = node.fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["target", "operator"]);
}

#[test]
fn test_push_creates_and_extends_lists() {
    let mut node = Node::new("sequence");
    node.push("elements", tok("alpha", "a"));
    node.push("elements", tok("alpha", "b"));
    assert_eq!(node.list("elements").len(), 2);
    assert_eq!(node.list("missing"), &[] as &[Value]);
}

#[test]
fn test_push_over_null_replaces_it() {
    let mut node = Node::new("grammar");
    node.declare("statements", false);
    node.push("statements", tok("alpha", "a"));
    assert_eq!(node.list("statements"), &[Value::Token(tok("alpha", "a"))]);
}

#[test]
fn test_emptiness() {
    let mut node = Node::new("n");
    node.declare("list", true);
    node.declare("scalar", false);
    assert!(node.is_empty());
    node.set("scalar", tok("alpha", "x"));
    assert!(!node.is_empty());
    assert!(!node.take("scalar").is_empty());
    assert!(node.is_empty());
}

#[test]
fn test_accessors() {
    let inner = Node::new("inner").with("name", tok("alpha", "x"));
    let outer = Node::new("outer").with("child", inner.clone());
    assert_eq!(outer.node("child"), Some(&inner));
    assert_eq!(outer.node("child").and_then(|n| n.token("name")).map(Token::text), Some("x"));
    assert_eq!(outer.token("child"), None);
    assert_eq!(Value::from(inner.clone()).into_node(), Some(inner));
}

#[test]
fn test_serializes_tag_then_fields() {
    let node = Node::new("constant")
        .with("token", tok("INTEGER_CONST", "5"))
        .with("extra", Value::Null);
    let json = serde_json::to_value(&node).unwrap_or_default();
    assert_eq!(
        json,
        serde_json::json!({
            "tag": "constant",
            "token": {
                "kind": "INTEGER_CONST",
                "start": {"index": 0, "line": 1, "column": 1},
                "value": "5"
            },
            "extra": null
        })
    );
}

#[test]
fn test_deep_chain_clones_compares_serializes_and_drops() {
    let depth = 100_000;
    let mut chain = Node::new("leaf").with("name", tok("alpha", "x"));
    for _ in 0..depth {
        chain = Node::new("wrap").with("inner", chain);
    }
    let copy = chain.clone();
    assert!(copy == chain);

    let text = serde_json::to_string(&chain).unwrap_or_default();
    assert_eq!(text.matches("\"wrap\"").count(), depth);
    assert!(text.ends_with(&"}".repeat(depth + 2)));

    drop(copy);
    drop(chain);
}

#[test]
fn test_deep_lists_drop() {
    let mut nested = Value::Null;
    for _ in 0..100_000 {
        nested = Value::List(vec![Node::new("item").with("rest", nested).into()]);
    }
    let Value::List(items) = &nested else {
        panic!("expected a list, got a leaf");
    };
    assert_eq!(items.len(), 1);
    drop(nested);
}
