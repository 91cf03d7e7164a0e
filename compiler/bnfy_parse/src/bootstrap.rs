//! The BNF description language, described in itself.
//!
//! [`table`] is the token table of the language and [`GRAMMAR`] its grammar.
//! [`GrammarParser`](crate::GrammarParser) implements exactly this grammar
//! by hand; compiling [`GRAMMAR`] over [`table`] yields a parser that
//! produces the same trees, which is what makes the generator self-hosting.
//!
//! # Notation
//!
//! ```text
//! entry name ::= ... ;        rule declaration, `entry` marks the start rule
//! <A, B: prop>                consume a token of kind A or B into `prop`
//! <!A>                        require a token of kind A without consuming it
//! {rule: prop}                parse `rule` into `prop`
//! {main rule: prop}           `prop` becomes the result if nothing else is set
//! prop[]                      list property, appended to on every match
//! x | y    x^  x*  x+         choice, optional, zero or more, one or more
//! c ? x : y                   if `c` can start here parse `c x`, else `y`
//! ```

use bnfy_ir::{ClassTable, TerminalClass, TokenTable};

/// Grammar of the BNF description language.
pub const GRAMMAR: &str = r"
// A grammar is a `;` separated list of rule declarations.
entry grammar ::=
    {statement: statements[]}
    (<SEMI> {statement: statements[]})*
    <EOF>;

statement ::= {declaration} | {empty};

empty ::= <!SEMI, EOF>;

declaration ::=
    <D_MODIFIER: modifiers[]>*
    <alpha: name>
    <ASSIGN>
    {syntax: body};

/* Alternatives nest to the right; a lone alternative stands for itself. */
syntax ::= {main sequence: first} (<OR> {syntax: rest})^;

sequence ::= {repetition: elements[]}+;

repetition ::=
    {main conditional: target}
    <REPEAT_01, REPEAT_0N, REPEAT_1N: operator>^;

conditional ::=
    {main identity: condition}
    (<IF> {syntax: then} (<COLON> {syntax: otherwise})^)^;

identity ::= {non_terminal} | {terminal} | <LPAREN> {syntax} <RPAREN>;

terminal ::=
    <LANGLE>
    <NOT: negated>^
    <alpha: kinds[]> (<COMMA> <alpha: kinds[]>)*
    {property_assign: assign}^
    <RANGLE>;

non_terminal ::=
    <LBRACKET>
    <NT_MODIFIER: modifiers[]>*
    <alpha: rule>
    {property_assign: assign}^
    <RBRACKET>;

property_assign ::= <COLON> <alpha: name> (<LSQBRACKET: list> <RSQBRACKET>)^;
";

/// Token kind names of the BNF description language.
pub mod kind {
    pub const ALPHA: &str = "alpha";
    pub const EOF: &str = "EOF";
    pub const D_MODIFIER: &str = "D_MODIFIER";
    pub const NT_MODIFIER: &str = "NT_MODIFIER";
    pub const OR: &str = "OR";
    pub const NOT: &str = "NOT";
    pub const IF: &str = "IF";
    pub const REPEAT_01: &str = "REPEAT_01";
    pub const REPEAT_0N: &str = "REPEAT_0N";
    pub const REPEAT_1N: &str = "REPEAT_1N";
    pub const ASSIGN: &str = "ASSIGN";
    pub const COLON: &str = "COLON";
    pub const LANGLE: &str = "LANGLE";
    pub const RANGLE: &str = "RANGLE";
    pub const LPAREN: &str = "LPAREN";
    pub const RPAREN: &str = "RPAREN";
    pub const LBRACKET: &str = "LBRACKET";
    pub const RBRACKET: &str = "RBRACKET";
    pub const LSQBRACKET: &str = "LSQBRACKET";
    pub const RSQBRACKET: &str = "RSQBRACKET";
    pub const COMMA: &str = "COMMA";
    pub const SEMI: &str = "SEMI";

    pub const REPEATS: [&str; 3] = [REPEAT_01, REPEAT_0N, REPEAT_1N];
}

/// Spelling of the rule modifier marking the entry point.
pub const ENTRY_MODIFIER: &str = "entry";

/// Spelling of the non-terminal modifier marking a rule's main property.
pub const MAIN_MODIFIER: &str = "main";

/// Token table of the BNF description language.
pub fn table() -> TokenTable {
    use TerminalClass::{Alpha, Delimiter, Operator};

    TokenTable::new(ClassTable {
        number: "0123456789".to_owned(),
        alpha: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_".to_owned(),
        operator: "|:=?+*!<>^".to_owned(),
        delimiter: "(){}[],;".to_owned(),
        literal: "'".to_owned(),
    })
    .with_compound(Alpha, kind::D_MODIFIER, ENTRY_MODIFIER)
    .with_compound(Alpha, kind::NT_MODIFIER, MAIN_MODIFIER)
    .with_compound(Operator, kind::OR, "|")
    .with_compound(Operator, kind::NOT, "!")
    .with_compound(Operator, kind::IF, "?")
    .with_compound(Operator, kind::REPEAT_01, "^")
    .with_compound(Operator, kind::REPEAT_0N, "*")
    .with_compound(Operator, kind::REPEAT_1N, "+")
    .with_compound(Operator, kind::ASSIGN, "::=")
    .with_compound(Operator, kind::COLON, ":")
    .with_compound(Operator, kind::LANGLE, "<")
    .with_compound(Operator, kind::RANGLE, ">")
    .with_compound(Delimiter, kind::LPAREN, "(")
    .with_compound(Delimiter, kind::RPAREN, ")")
    .with_compound(Delimiter, kind::LBRACKET, "{")
    .with_compound(Delimiter, kind::RBRACKET, "}")
    .with_compound(Delimiter, kind::LSQBRACKET, "[")
    .with_compound(Delimiter, kind::RSQBRACKET, "]")
    .with_compound(Delimiter, kind::COMMA, ",")
    .with_compound(Delimiter, kind::SEMI, ";")
}

#[cfg(test)]
mod tests;
