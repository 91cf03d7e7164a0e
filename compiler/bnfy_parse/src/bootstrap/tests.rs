use super::*;
use bnfy_lexer::{Lexer, Lexicon};

#[test]
fn test_table_has_no_stray_spellings() {
    assert_eq!(table().stray_spellings(), vec![]);
}

#[test]
fn test_every_kind_is_in_the_vocabulary() {
    let vocabulary = table().vocabulary();
    for name in [
        kind::ALPHA,
        kind::EOF,
        kind::D_MODIFIER,
        kind::NT_MODIFIER,
        kind::OR,
        kind::NOT,
        kind::IF,
        kind::REPEAT_01,
        kind::REPEAT_0N,
        kind::REPEAT_1N,
        kind::ASSIGN,
        kind::COLON,
        kind::LANGLE,
        kind::RANGLE,
        kind::LPAREN,
        kind::RPAREN,
        kind::LBRACKET,
        kind::RBRACKET,
        kind::LSQBRACKET,
        kind::RSQBRACKET,
        kind::COMMA,
        kind::SEMI,
    ] {
        assert!(vocabulary.contains(name), "missing {name}");
    }
}

#[test]
fn test_grammar_text_lexes() {
    let lexicon = Lexicon::new(table());
    let tokens = Lexer::new(GRAMMAR, &lexicon).tokenize();
    assert!(tokens.is_ok(), "{tokens:?}");
    let tokens = tokens.unwrap_or_default();
    assert_eq!(tokens.first().map(|t| t.kind.as_str()), Some(kind::D_MODIFIER));
    assert_eq!(tokens.last().map(|t| t.kind.as_str()), Some(kind::EOF));
    // Every token the grammar uses is a declared kind or a name.
    let vocabulary = table().vocabulary();
    assert!(tokens.iter().all(|t| vocabulary.contains(&t.kind)));
}

#[test]
fn test_modifiers_lex_as_keywords() {
    let lexicon = Lexicon::new(table());
    let kinds: Vec<_> = Lexer::new("entry main entryway", &lexicon)
        .tokenize()
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec!["D_MODIFIER", "NT_MODIFIER", "alpha", "EOF"]);
}
