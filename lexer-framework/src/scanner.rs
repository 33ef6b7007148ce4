use crate::registers::ScannerRegisters;
use crate::token::TokenKind;
use thiserror::Error;

/// What the bridge should do with a recognized lexeme.
///
/// The grammar author picks one per lexeme class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeAction {
    /// Build a token from the match (minus `ltrim`/`rtrim` delimiter characters)
    /// and hand it to the parser.
    Deliver {
        kind: TokenKind,
        ltrim: usize,
        rtrim: usize,
    },
    /// Tell the parser a token of `kind` occurred, without its text.
    DeliverNull { kind: TokenKind },
    /// Consume the match without the parser ever seeing it (comments,
    /// whitespace).
    Skip,
}

impl LexemeAction {
    /// Deliver with no trimming.
    pub fn deliver(kind: TokenKind) -> Self {
        LexemeAction::Deliver {
            kind,
            ltrim: 0,
            rtrim: 0,
        }
    }

    /// Deliver with `ltrim` and `rtrim` characters stripped from the text.
    pub fn deliver_trimmed(kind: TokenKind, ltrim: usize, rtrim: usize) -> Self {
        LexemeAction::Deliver { kind, ltrim, rtrim }
    }
}

/// A raw match: byte offsets into the input plus the action chosen for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    /// First matched byte.
    pub ts: usize,
    /// One past the last matched byte.
    pub te: usize,
    pub action: LexemeAction,
}

impl Lexeme {
    pub fn new(ts: usize, te: usize, action: LexemeAction) -> Self {
        Self { ts, te, action }
    }

    /// Builds a lexeme from the match currently held in `regs`.
    pub fn from_registers(regs: &ScannerRegisters, action: LexemeAction) -> Self {
        Self::new(regs.ts, regs.te, action)
    }
}

/// Errors a scanner can report while recognizing lexemes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unterminated {what} starting at byte {offset}")]
    Unterminated { what: &'static str, offset: usize },
}

/// A lexical scanner driven one lexeme at a time.
///
/// Implementations are usually generated from a scanner description; they
/// keep their state in `regs` and report each match as a [`Lexeme`].
pub trait Scanner {
    /// Recognizes the next lexeme starting at `regs.p`.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Every returned lexeme
    /// must be non-empty and start where the previous one ended, so that
    /// locations can be threaded through the whole input.
    fn next_lexeme(
        &mut self,
        input: &str,
        regs: &mut ScannerRegisters,
    ) -> Result<Option<Lexeme>, ScanError>;
}
