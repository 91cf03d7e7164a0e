use super::*;
use pretty_assertions::assert_eq;

fn arithmetic() -> TokenTable {
    TokenTable::new(ClassTable {
        number: "0123456789".to_owned(),
        alpha: "abcdefghijklmnopqrstuvwxyz_".to_owned(),
        operator: "+-*/".to_owned(),
        delimiter: "()".to_owned(),
        literal: String::new(),
    })
    .with_compound(TerminalClass::Operator, "PLUS", "+")
    .with_compound(TerminalClass::Operator, "MINUS", "-")
    .with_compound(TerminalClass::Delimiter, "L_PAREN", "(")
    .with_compound(TerminalClass::Delimiter, "R_PAREN", ")")
    .with_compound(TerminalClass::Alpha, "PI", ["pi", "PI"])
}

#[test]
fn test_new_uses_conventional_defaults() {
    let table = arithmetic();
    assert_eq!(table.skip.whitespace, " \n\t\r");
    assert_eq!(table.reserved_types.eof, "EOF");
    assert_eq!(table.base_types.alpha, "alpha");
    assert_eq!(table.base_types.delimiter, "delimiter");
    assert_eq!(table.special_types.comment_inline, "//");
}

#[test]
fn test_builders_override_defaults() {
    let table = arithmetic()
        .with_whitespace(" ")
        .with_base_type(TerminalClass::Alpha, "id")
        .with_comments("", "", "#")
        .with_reserved("REAL", "INT", "END");
    assert_eq!(table.skip.whitespace, " ");
    assert_eq!(table.base_types.alpha, "id");
    assert_eq!(table.special_types.comment_start, "");
    assert_eq!(table.special_types.comment_inline, "#");
    assert_eq!(table.reserved_types.integer_const, "INT");
}

#[test]
fn test_spelling_iterates_every_form() {
    let many = Spelling::from(["pi", "PI"]);
    assert_eq!(many.iter().collect::<Vec<_>>(), vec!["pi", "PI"]);
    let one = Spelling::from("+");
    assert_eq!(one.iter().collect::<Vec<_>>(), vec!["+"]);
}

#[test]
fn test_vocabulary_covers_all_kind_names() {
    let vocabulary = arithmetic().vocabulary();
    for name in [
        "REAL_CONST",
        "INTEGER_CONST",
        "EOF",
        "number",
        "alpha",
        "operator",
        "delimiter",
        "literal",
        "PLUS",
        "MINUS",
        "L_PAREN",
        "R_PAREN",
        "PI",
    ] {
        assert!(vocabulary.contains(name), "missing {name}");
    }
    assert!(!vocabulary.contains("TIMES"));
}

#[test]
fn test_class_table_iterates_in_priority_order() {
    let table = arithmetic();
    let classes: Vec<_> = table.terminals.iter().map(|(class, _)| class).collect();
    assert_eq!(classes, TerminalClass::ALL.to_vec());
}

#[test]
fn test_stray_spellings_reports_foreign_characters() {
    let table = arithmetic()
        .with_compound(TerminalClass::Operator, "DECREMENT", "--")
        .with_compound(TerminalClass::Operator, "BAD", "+(")
        .with_compound(TerminalClass::Alpha, "LOG2", "log2");
    let strays = table.stray_spellings();
    assert_eq!(
        strays,
        vec![StraySpelling {
            class: TerminalClass::Operator,
            kind: "BAD".to_owned(),
            spelling: "+(".to_owned(),
            character: '(',
        }]
    );
}

#[test]
fn test_table_round_trips_through_json() {
    let table = arithmetic();
    let json = serde_json::to_string(&table).unwrap_or_default();
    let back: Option<TokenTable> = serde_json::from_str(&json).ok();
    assert_eq!(back, Some(table));
}

#[test]
fn test_untagged_spelling_reads_plain_json() {
    let one: Option<Spelling> = serde_json::from_str("\"+\"").ok();
    let many: Option<Spelling> = serde_json::from_str("[\"pi\", \"PI\"]").ok();
    assert_eq!(one, Some(Spelling::from("+")));
    assert_eq!(many, Some(Spelling::from(["pi", "PI"])));
}
