//! Execution of rule logic.
//!
//! Guards that name a rule are decided by probing: the rule runs in probe
//! mode from the current token, and the first `eat` or `expect` it reaches
//! settles the question. A matching token halts the probe with
//! [`Halt::Found`]; a mismatch fails it with an unexpected token. A rule
//! that completes without testing any token also applies. The cursor is
//! restored afterwards, so probing never consumes input.

use bnfy_diagnostic::{Error, Result};
use bnfy_ir::{Node, Token, Value};
use bnfy_parse::Cursor;
use bnfy_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::guard::Guard;
use crate::logic::{Bind, Logic, Stmt};
use crate::schema::ParserSchema;

/// Why rule execution stopped early.
enum Halt {
    /// A probe reached a matching token.
    Found,
    Fail(Error),
}

impl From<Error> for Halt {
    fn from(err: Error) -> Self {
        Halt::Fail(err)
    }
}

type Flow<T> = std::result::Result<T, Halt>;

pub(crate) struct Machine<'a> {
    schema: &'a ParserSchema,
    cursor: Cursor<'a>,
    /// Nesting depth of active probes; zero when parsing for real.
    probing: usize,
}

/// The node under construction by one rule invocation.
struct Frame {
    node: Node,
    replaced: Option<Value>,
}

impl Frame {
    fn new(logic: &Logic) -> Self {
        let mut node = Node::new(logic.tag.as_str());
        for (name, is_list) in &logic.fields {
            node.declare(name.as_str(), *is_list);
        }
        Frame {
            node,
            replaced: None,
        }
    }

    fn bind(&mut self, bind: &Bind, value: Value) {
        match bind {
            Bind::Assign(name) => self.node.set(name.as_str(), value),
            Bind::Push(name) => self.node.push(name.as_str(), value),
            Bind::Replace => self.replaced = Some(value),
            Bind::Discard => {}
        }
    }

    fn finish(mut self, logic: &Logic) -> Value {
        if let Some(value) = self.replaced {
            return value;
        }
        if let Some(main) = &logic.main {
            let others_empty = self
                .node
                .fields
                .iter()
                .all(|(name, value)| name == main || value.is_empty());
            if others_empty {
                return self.node.take(main);
            }
        }
        self.node.into()
    }
}

impl<'a> Machine<'a> {
    pub(crate) fn run(schema: &'a ParserSchema, source: &'a str) -> Result<Value> {
        let mut machine = Machine {
            schema,
            cursor: Cursor::new(source, schema.lexicon())?,
            probing: 0,
        };
        match machine.call(schema.entry_point().text()) {
            Ok(value) => Ok(value),
            Err(Halt::Fail(err)) => Err(err),
            Err(Halt::Found) => Err(Error::malformed("probe result escaped its probe")),
        }
    }

    fn call(&mut self, name: &str) -> Flow<Value> {
        let schema = self.schema;
        let rule = schema
            .rule(name)
            .ok_or_else(|| Error::malformed(format!("call to undeclared rule `{name}`")))?;
        ensure_sufficient_stack(|| {
            trace!(rule = name, probing = self.probing, at = %self.cursor.current().start, "call");
            let logic = rule.logic();
            let mut frame = Frame::new(logic);
            self.exec(&logic.body, &mut frame)?;
            Ok(frame.finish(logic))
        })
    }

    fn exec(&mut self, stmts: &[Stmt], frame: &mut Frame) -> Flow<()> {
        for stmt in stmts {
            match stmt {
                Stmt::Eat { kinds, bind } => {
                    let token = self.eat(kinds)?;
                    frame.bind(bind, token.into());
                }
                Stmt::Expect { kinds } => self.expect(kinds)?,
                Stmt::Call { rule, bind } => {
                    let value = self.call(rule)?;
                    frame.bind(bind, value);
                }
                Stmt::If {
                    branches,
                    otherwise,
                } => {
                    let mut taken = otherwise;
                    for (guard, body) in branches {
                        if self.test(guard)? {
                            taken = body;
                            break;
                        }
                    }
                    self.exec(taken, frame)?;
                }
                Stmt::While { guard, body } => {
                    while self.test(guard)? {
                        let before = self.cursor.current().start.index;
                        self.exec(body, frame)?;
                        // A body that matched without consuming would repeat forever.
                        if self.cursor.current().start.index == before {
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn eat(&mut self, kinds: &[String]) -> Flow<Token> {
        if self.probing > 0 {
            self.cursor.expect(kinds)?;
            return Err(Halt::Found);
        }
        Ok(self.cursor.eat(kinds)?)
    }

    fn expect(&mut self, kinds: &[String]) -> Flow<()> {
        self.cursor.expect(kinds)?;
        if self.probing > 0 {
            return Err(Halt::Found);
        }
        Ok(())
    }

    fn test(&mut self, guard: &Guard) -> Flow<bool> {
        if self.cursor.check(&guard.kinds) {
            return Ok(true);
        }
        for rule in &guard.probes {
            if self.probe(rule)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `rule` can start at the current token.
    fn probe(&mut self, rule: &str) -> Flow<bool> {
        let snapshot = self.cursor.snapshot();
        self.probing += 1;
        let outcome = self.call(rule);
        self.probing -= 1;
        self.cursor.restore(snapshot);
        match outcome {
            Ok(_) | Err(Halt::Found) => Ok(true),
            Err(Halt::Fail(err)) if err.is_unexpected_token() => {
                trace!(rule, %err, "probe failed");
                Ok(false)
            }
            Err(halt) => Err(halt),
        }
    }
}
