//! Translation of a declaration into rule logic.
//!
//! | syntax                  | logic                                           |
//! |-------------------------|-------------------------------------------------|
//! | `a \| b \| c`           | `if (first(a)) a else if (first(b)) b else c`   |
//! | `x^`                    | `if (first(x)) x`                               |
//! | `x*`                    | `while (first(x)) x`                            |
//! | `x+`                    | `x; while (first(x)) x`                         |
//! | `c ? t : o`             | `if (first(c)) { c; t } else o`                 |
//! | `<A, B: p>`             | `node.p = eat(A, B)`                            |
//! | `<!A, B>`               | `expect(A, B)`                                  |
//! | `{r: p}`                | `node.p = r()`                                  |

use bnfy_diagnostic::Result;
use bnfy_stack::ensure_sufficient_stack;

use crate::decl_table::DeclTable;
use crate::guard::first_of;
use crate::logic::{Bind, Logic, Stmt};
use crate::syntax::{Declaration, PropertyAssign, Repeat, Syntax};

/// Build the property table and logic of `declaration`.
pub fn generate(declaration: &Declaration) -> Result<(DeclTable, Logic)> {
    let table = DeclTable::build(&declaration.body)?;
    let mut body = Vec::new();
    Codegen { table: &table }.emit(&declaration.body, &mut body);
    let logic = Logic {
        tag: declaration.name.text().to_owned(),
        fields: table
            .properties()
            .iter()
            .map(|property| (property.name.clone(), property.is_list))
            .collect(),
        main: table.main().map(|property| property.name.clone()),
        body,
    };
    Ok((table, logic))
}

struct Codegen<'t> {
    table: &'t DeclTable,
}

impl Codegen<'_> {
    fn emit(&self, syntax: &Syntax, out: &mut Vec<Stmt>) {
        ensure_sufficient_stack(|| match syntax {
            Syntax::Choice(alternatives) => {
                let Some((last, guarded)) = alternatives.split_last() else {
                    return;
                };
                let branches = guarded
                    .iter()
                    .map(|alternative| (first_of(alternative), self.block(alternative)))
                    .collect();
                out.push(Stmt::If {
                    branches,
                    otherwise: self.block(last),
                });
            }
            Syntax::Sequence(elements) => {
                for element in elements {
                    self.emit(element, out);
                }
            }
            Syntax::Repeat { body, repeat } => {
                let guard = first_of(body);
                let block = self.block(body);
                match repeat {
                    Repeat::Optional => out.push(Stmt::If {
                        branches: vec![(guard, block)],
                        otherwise: Vec::new(),
                    }),
                    Repeat::ZeroOrMore => out.push(Stmt::While { guard, body: block }),
                    Repeat::OneOrMore => {
                        out.extend(block.iter().cloned());
                        out.push(Stmt::While { guard, body: block });
                    }
                }
            }
            Syntax::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let mut taken = self.block(condition);
                self.emit(then, &mut taken);
                out.push(Stmt::If {
                    branches: vec![(first_of(condition), taken)],
                    otherwise: otherwise
                        .as_deref()
                        .map(|otherwise| self.block(otherwise))
                        .unwrap_or_default(),
                });
            }
            Syntax::Terminal {
                kinds,
                negated: true,
                ..
            } => out.push(Stmt::Expect {
                kinds: kind_names(kinds),
            }),
            Syntax::Terminal { kinds, assign, .. } => out.push(Stmt::Eat {
                kinds: kind_names(kinds),
                bind: self.bind(assign.as_ref()),
            }),
            Syntax::NonTerminal { rule, assign, .. } => {
                let bind = match assign {
                    None if self.table.is_empty() => Bind::Replace,
                    assign => self.bind(assign.as_ref()),
                };
                out.push(Stmt::Call {
                    rule: rule.text().to_owned(),
                    bind,
                });
            }
        });
    }

    fn block(&self, syntax: &Syntax) -> Vec<Stmt> {
        let mut out = Vec::new();
        self.emit(syntax, &mut out);
        out
    }

    fn bind(&self, assign: Option<&PropertyAssign>) -> Bind {
        let Some(assign) = assign else {
            return Bind::Discard;
        };
        let name = assign.name.text().to_owned();
        let is_list = self
            .table
            .get(&name)
            .map_or(assign.is_list, |property| property.is_list);
        if is_list {
            Bind::Push(name)
        } else {
            Bind::Assign(name)
        }
    }
}

fn kind_names(kinds: &[bnfy_ir::Token]) -> Vec<String> {
    kinds.iter().map(|kind| kind.text().to_owned()).collect()
}
