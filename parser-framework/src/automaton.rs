use lexer_framework::{LocatedToken, TokenKind};
use std::marker::PhantomData;

/// A parsing automaton, typically generated from an LALR(1) grammar.
///
/// The bridge only knows the entry points below and never looks at the
/// automaton's internal state. Construction is the implementor's own
/// constructor and teardown is its `Drop`.
pub trait Automaton {
    /// Extra state threaded by mutable reference through every step, usually
    /// where semantic actions leave their results and errors.
    type Context;

    /// Feeds one token to the automaton.
    ///
    /// `token` is `None` when only the occurrence of `kind` matters. The
    /// automaton owns the token once called and releases it by dropping.
    fn step(&mut self, kind: TokenKind, token: Option<Box<LocatedToken>>, ctx: &mut Self::Context);

    /// Turns tracing of shifts and reductions on (`Some(prefix)`) or off.
    fn trace(&mut self, prefix: Option<&str>) {
        let _ = prefix;
    }
}

/// Adapts a step function into an [`Automaton`].
///
/// Handy for generated parsers that only expose a free `parse` function, and
/// for tests that just record what they are fed.
pub struct FnAutomaton<C, F>
where
    F: FnMut(TokenKind, Option<Box<LocatedToken>>, &mut C),
{
    step: F,
    _marker: PhantomData<fn(&mut C)>,
}

impl<C, F> FnAutomaton<C, F>
where
    F: FnMut(TokenKind, Option<Box<LocatedToken>>, &mut C),
{
    pub fn new(step: F) -> Self {
        Self {
            step,
            _marker: PhantomData,
        }
    }
}

impl<C, F> Automaton for FnAutomaton<C, F>
where
    F: FnMut(TokenKind, Option<Box<LocatedToken>>, &mut C),
{
    type Context = C;

    fn step(&mut self, kind: TokenKind, token: Option<Box<LocatedToken>>, ctx: &mut C) {
        (self.step)(kind, token, ctx)
    }
}
