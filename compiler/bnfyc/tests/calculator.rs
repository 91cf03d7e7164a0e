//! A calculator language compiled end to end, evaluated by walking the
//! trees its parser produces.

use std::f64::consts::PI;

use bnfyc::{compile, ClassTable, ParserSchema, TerminalClass, TokenTable, Value};
use pretty_assertions::assert_eq;

const CALC_GRAMMAR: &str = "
    entry expression ::=
        {main term: lNode} (<PLUS, MINUS: operator> {expression: rNode})^ ;

    term ::=
        {main factor: lNode} (<TIMES, REAL_DIV: operator> {term: rNode})^ ;

    factor ::=
        {constant: constant}
        | {function: factor}
        | <MINUS: operator> {factor: factor}
        | <ABSOLUTE: operator> {expression: factor} <ABSOLUTE>
        | <L_PAREN> {expression: factor} <R_PAREN>;

    constant ::= <INTEGER_CONST, REAL_CONST, PI: token>;

    function ::=
        <id: name> <L_PAREN> {parameters: params} <R_PAREN>;

    parameters ::=
        ({expression: params[]} (<COMMA> {expression: params[]})*)^;
";

fn calc_table() -> TokenTable {
    use TerminalClass::{Alpha, Delimiter, Operator};

    TokenTable::new(ClassTable {
        number: "0123456789".to_owned(),
        alpha: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_".to_owned(),
        operator: "+*-/|".to_owned(),
        delimiter: "(),".to_owned(),
        literal: String::new(),
    })
    .with_base_type(Alpha, "id")
    .with_compound(Alpha, "PI", "pi")
    .with_compound(Operator, "TIMES", "*")
    .with_compound(Operator, "REAL_DIV", "/")
    .with_compound(Operator, "MINUS", "-")
    .with_compound(Operator, "PLUS", "+")
    .with_compound(Operator, "ABSOLUTE", "|")
    .with_compound(Delimiter, "L_PAREN", "(")
    .with_compound(Delimiter, "R_PAREN", ")")
    .with_compound(Delimiter, "COMMA", ",")
}

fn calculator() -> ParserSchema {
    match compile(CALC_GRAMMAR, calc_table()) {
        Ok(schema) => schema,
        Err(err) => panic!("calculator grammar failed to compile: {err}"),
    }
}

/// Evaluates calculator trees.
struct Calc;

impl Calc {
    fn eval(&self, value: &Value) -> f64 {
        let Some(node) = value.as_node() else {
            panic!("expected a node, got {value:?}");
        };
        let field = |name: &str| node.get(name).cloned().unwrap_or_default();
        let operator = node.token("operator").map(|token| token.kind.as_str());
        match node.tag.as_str() {
            "expression" | "term" => {
                let left = self.eval(&field("lNode"));
                let right = self.eval(&field("rNode"));
                match operator {
                    Some("PLUS") => left + right,
                    Some("MINUS") => left - right,
                    Some("TIMES") => left * right,
                    Some("REAL_DIV") => left / right,
                    other => panic!("unknown operator {other:?}"),
                }
            }
            "factor" => {
                let inner = match node.get("constant") {
                    Some(constant) if !constant.is_empty() => self.eval(constant),
                    _ => self.eval(&field("factor")),
                };
                match operator {
                    Some("MINUS") => -inner,
                    Some("ABSOLUTE") => inner.abs(),
                    _ => inner,
                }
            }
            "constant" => {
                let Some(token) = node.token("token") else {
                    panic!("constant without a token");
                };
                match token.kind.as_str() {
                    "INTEGER_CONST" | "REAL_CONST" => token.text().parse().unwrap_or(f64::NAN),
                    "PI" => PI,
                    other => panic!("no constant of kind {other}"),
                }
            }
            "function" => {
                let params = field("params");
                let options: Vec<f64> = params
                    .as_node()
                    .map(|params| params.list("params").iter().map(|p| self.eval(p)).collect())
                    .unwrap_or_default();
                let name = node.token("name").map(|token| token.text()).unwrap_or_default();
                let one = || {
                    assert_eq!(options.len(), 1, "{name} takes one parameter");
                    options[0]
                };
                match name {
                    "sin" => one().sin(),
                    "cos" => one().cos(),
                    "tan" => one().tan(),
                    "log" => one().log10(),
                    "ln" => one().ln(),
                    "min" => options.iter().copied().fold(f64::INFINITY, f64::min),
                    "max" => options.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    other => panic!("no function {other}"),
                }
            }
            other => panic!("unexpected node {other}"),
        }
    }
}

fn evaluate(source: &str) -> f64 {
    match calculator().parse(source) {
        Ok(tree) => Calc.eval(&tree),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-8,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_addition() {
    assert_eq!(evaluate("5 + 4"), 9.0);
}

#[test]
fn test_division_binds_tighter() {
    assert_close(evaluate("5 + 4 / 3"), 5.0 + 4.0 / 3.0);
}

#[test]
fn test_parentheses_and_negation() {
    assert_eq!(evaluate("5 + (4 - -2) * 7"), 47.0);
}

#[test]
fn test_nested_groups() {
    assert_close(
        evaluate("5 + -(4 - -(2*7 + 4 / (2 + 2 + 2 - (3)))) * 7"),
        5.0 + -(4.0 - -(2.0 * 7.0 + 4.0 / (2.0 + 2.0 + 2.0 - 3.0))) * 7.0,
    );
}

#[test]
fn test_absolute_values() {
    assert_close(
        evaluate("|-2| + |-7*3/-2|/8"),
        2.0_f64.abs() + (-7.0_f64 * 3.0 / -2.0).abs() / 8.0,
    );
}

#[test]
fn test_functions() {
    assert_close(evaluate("sin(pi/2)"), 1.0);
    assert_close(
        evaluate("sin(|-2| + |-7*3/-2|/8)"),
        (2.0 + 10.5 / 8.0_f64).sin(),
    );
    assert_close(
        evaluate("sin(|-2| + |-7*3/-2|/8) + pi*tan(pi) / ln(3*pi/2)"),
        (2.0 + 10.5 / 8.0_f64).sin() + PI * PI.tan() / (3.0 * PI / 2.0).ln(),
    );
}

#[test]
fn test_multiple_parameters() {
    assert_close(
        evaluate("min(sin(|-2| + |-7*3/-2|/8) + pi*tan(pi), |-2| + |-7*3/-2|/8)"),
        ((2.0 + 10.5 / 8.0_f64).sin() + PI * PI.tan()).min(2.0 + 10.5 / 8.0),
    );
    assert_close(evaluate("max(1, 7, 3)"), 7.0);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(evaluate("/* this */ 5 /* or */ + /* this */ 4 // nope"), 9.0);
}

#[test]
fn test_real_constants() {
    assert_close(evaluate("1.5 * 4"), 6.0);
}

#[test]
fn test_lone_constant_collapses_to_its_factor() {
    let tree = calculator().parse("42").unwrap_or_default();
    let tags: Vec<_> = std::iter::successors(tree.as_node(), |node| node.node("constant"))
        .map(|node| node.tag.as_str())
        .collect();
    assert_eq!(tags, vec!["factor", "constant"]);
}

#[test]
fn test_syntax_errors_are_reported() {
    assert!(calculator().parse("5 + ").is_err());
    assert!(calculator().parse("(5").is_err());
    assert!(calculator().parse("5 $ 4").is_err());
}

#[test]
fn test_concurrent_parses_share_one_schema() {
    let schema = calculator();
    let sources = ["5 + 4", "5 + (4 - -2) * 7", "|-2| + |-7*3/-2|/8", "max(1, 7, 3)"];
    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let schema = &schema;
                scope.spawn(move || match schema.parse(source) {
                    Ok(tree) => Calc.eval(&tree),
                    Err(err) => panic!("{err}"),
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(f64::NAN))
            .collect()
    });
    let sequential: Vec<f64> = sources.iter().map(|source| evaluate(source)).collect();
    assert_eq!(results, sequential);
}
