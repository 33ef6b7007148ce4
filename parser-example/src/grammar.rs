use crate::nodes::{BinopLogor, BoolLiteral, DataDecl, Nt, Program, StringLiteral};
use crate::scanner;
use common_framework::escape_str;
use lexer_framework::{LocatedToken, TokenKind};
use parser_framework::{span_loc, Automaton, AstNode, Node, TextLoc};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Syntax errors, collected in [`LogicContext::errors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected \"{found}\" at {loc}, expected {expected}")]
    UnexpectedToken {
        found: String,
        loc: TextLoc,
        expected: &'static str,
    },
    /// A token delivered without text was out of place.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedSymbol {
        found: &'static str,
        expected: &'static str,
    },
    #[error("unknown token kind {kind}")]
    UnknownKind { kind: TokenKind },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
}

/// What a parse leaves behind.
#[derive(Default)]
pub struct LogicContext {
    /// Set once the end of input is reached.
    pub root: Option<Rc<Program>>,
    pub errors: Vec<SyntaxError>,
}

impl LogicContext {
    pub fn is_ok(&self) -> bool {
        self.root.is_some() && self.errors.is_empty()
    }
}

impl fmt::Debug for LogicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.as_deref().map(|r| r as &dyn AstNode<Nt>);
        f.debug_struct("LogicContext")
            .field("root", &root)
            .field("errors", &self.errors)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sym {
    End,
    Data,
    Ident,
    Eq,
    Semi,
    OrOr,
    True,
    False,
    Str,
}

impl Sym {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            scanner::END => Sym::End,
            scanner::DATA => Sym::Data,
            scanner::IDENT => Sym::Ident,
            scanner::EQ => Sym::Eq,
            scanner::SEMI => Sym::Semi,
            scanner::OROR => Sym::OrOr,
            scanner::TRUE => Sym::True,
            scanner::FALSE => Sym::False,
            scanner::STRING => Sym::Str,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Sym::End => "end of input",
            Sym::Data => "'data'",
            Sym::Ident => "identifier",
            Sym::Eq => "'='",
            Sym::Semi => "';'",
            Sym::OrOr => "'||'",
            Sym::True => "'true'",
            Sym::False => "'false'",
            Sym::Str => "string literal",
        }
    }
}

/// Position inside a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Decl,
    Name,
    Eq,
    Operand,
    Operator,
    /// Discarding tokens up to the next `;` after an error.
    Recover,
}

impl State {
    fn expected(self) -> &'static str {
        match self {
            State::Decl => "'data'",
            State::Name => "identifier",
            State::Eq => "'='",
            State::Operand => "literal",
            State::Operator => "'||' or ';'",
            State::Recover => "';'",
        }
    }
}

/// Shift-reduce automaton for
///
/// ```text
/// program := decl*
/// decl    := 'data' IDENT '=' expr ';'
/// expr    := literal | expr '||' literal
/// literal := 'true' | 'false' | STRING
/// ```
///
/// Reductions happen as soon as the rightmost operand is shifted, so `||`
/// associates to the left. After an error the rest of the declaration is
/// dropped and parsing resumes after the next `;`.
pub struct LogicParser {
    state: State,
    data_loc: Option<TextLoc>,
    name: Option<String>,
    expr: Option<Node<Nt>>,
    decls: Vec<Rc<DataDecl>>,
    trace_prefix: Option<String>,
}

impl LogicParser {
    pub fn new() -> Self {
        Self {
            state: State::Decl,
            data_loc: None,
            name: None,
            expr: None,
            decls: Vec::new(),
            trace_prefix: None,
        }
    }

    fn log(&self, action: &str, sym: Sym) {
        if let Some(prefix) = &self.trace_prefix {
            tracing::trace!(
                prefix = %prefix,
                state = ?self.state,
                symbol = sym.name(),
                "{action}"
            );
        }
    }

    fn shift_operand(&mut self, sym: Sym, token: &LocatedToken) {
        let operand: Node<Nt> = match sym {
            Sym::True => BoolLiteral::new(token.loc(), true),
            Sym::False => BoolLiteral::new(token.loc(), false),
            _ => StringLiteral::new(token.loc(), token.mtext()),
        };
        self.expr = Some(match self.expr.take() {
            Some(left) => {
                self.log("reduce", Sym::OrOr);
                BinopLogor::new(left, operand)
            }
            None => operand,
        });
        self.state = State::Operator;
    }

    fn reduce_decl(&mut self, semi: &LocatedToken, ctx: &mut LogicContext) {
        match (self.data_loc.take(), self.name.take(), self.expr.take()) {
            (Some(data_loc), Some(name), Some(value)) => {
                self.log("reduce", Sym::Semi);
                let loc = span_loc(&data_loc, &semi.loc());
                self.decls.push(DataDecl::new(loc, name, value));
            }
            _ => ctx.errors.push(SyntaxError::UnexpectedToken {
                found: escape_str(semi.mtext()),
                loc: semi.loc(),
                expected: self.state.expected(),
            }),
        }
        self.state = State::Decl;
    }

    fn abandon_decl(&mut self) {
        self.data_loc = None;
        self.name = None;
        self.expr = None;
    }

    fn accept(&mut self, ctx: &mut LogicContext) {
        if !matches!(self.state, State::Decl | State::Recover) {
            ctx.errors.push(SyntaxError::UnexpectedEnd {
                expected: self.state.expected(),
            });
        }
        self.abandon_decl();
        self.log("accept", Sym::End);
        ctx.root = Some(Program::new(std::mem::take(&mut self.decls)));
    }
}

impl Default for LogicParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for LogicParser {
    type Context = LogicContext;

    fn step(&mut self, kind: TokenKind, token: Option<Box<LocatedToken>>, ctx: &mut LogicContext) {
        let Some(sym) = Sym::from_kind(kind) else {
            ctx.errors.push(SyntaxError::UnknownKind { kind });
            return;
        };
        self.log("shift", sym);

        match (self.state, sym, token) {
            (_, Sym::End, _) => self.accept(ctx),
            (State::Recover, Sym::Semi, _) => self.state = State::Decl,
            (State::Recover, _, _) => {}
            (State::Decl, Sym::Data, Some(token)) => {
                self.data_loc = Some(token.loc());
                self.state = State::Name;
            }
            (State::Name, Sym::Ident, Some(token)) => {
                self.name = Some((*token).into_mtext());
                self.state = State::Eq;
            }
            (State::Eq, Sym::Eq, _) => self.state = State::Operand,
            (State::Operand, Sym::True | Sym::False | Sym::Str, Some(token)) => {
                self.shift_operand(sym, &token)
            }
            (State::Operator, Sym::OrOr, _) => self.state = State::Operand,
            (State::Operator, Sym::Semi, Some(token)) => self.reduce_decl(&token, ctx),
            (state, sym, token) => {
                let expected = state.expected();
                ctx.errors.push(match token {
                    Some(token) => SyntaxError::UnexpectedToken {
                        found: escape_str(token.mtext()),
                        loc: token.loc(),
                        expected,
                    },
                    None => SyntaxError::UnexpectedSymbol {
                        found: sym.name(),
                        expected,
                    },
                });
                self.abandon_decl();
                self.state = if sym == Sym::Semi {
                    State::Decl
                } else {
                    State::Recover
                };
            }
        }
    }

    fn trace(&mut self, prefix: Option<&str>) {
        self.trace_prefix = prefix.map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, loc: TextLoc) -> Option<Box<LocatedToken>> {
        Some(Box::new(LocatedToken::new(text, None, loc)))
    }

    #[test]
    fn test_unknown_kind_is_reported() {
        let mut parser = LogicParser::new();
        let mut ctx = LogicContext::default();
        parser.step(TokenKind(99), None, &mut ctx);
        assert_eq!(
            ctx.errors,
            vec![SyntaxError::UnknownKind {
                kind: TokenKind(99)
            }]
        );
    }

    #[test]
    fn test_single_declaration() {
        let mut parser = LogicParser::new();
        let mut ctx = LogicContext::default();
        parser.step(scanner::DATA, tok("data", TextLoc::new(1, 1, 1, 4)), &mut ctx);
        parser.step(scanner::IDENT, tok("x", TextLoc::new(1, 6, 1, 6)), &mut ctx);
        parser.step(scanner::EQ, None, &mut ctx);
        parser.step(scanner::TRUE, tok("true", TextLoc::new(1, 10, 1, 13)), &mut ctx);
        parser.step(scanner::SEMI, tok(";", TextLoc::new(1, 14, 1, 14)), &mut ctx);
        parser.step(scanner::END, None, &mut ctx);

        assert!(ctx.is_ok());
        let root = ctx.root.unwrap();
        assert_eq!(root.decls().len(), 1);
        assert_eq!(root.decls()[0].name(), "x");
        assert_eq!(root.decls()[0].loc(), TextLoc::new(1, 1, 1, 14));
    }

    #[test]
    fn test_misplaced_null_token() {
        let mut parser = LogicParser::new();
        let mut ctx = LogicContext::default();
        parser.step(scanner::OROR, None, &mut ctx);
        parser.step(scanner::END, None, &mut ctx);
        assert_eq!(
            ctx.errors,
            vec![SyntaxError::UnexpectedSymbol {
                found: "'||'",
                expected: "'data'"
            }]
        );
        assert!(ctx.root.unwrap().decls().is_empty());
    }
}
