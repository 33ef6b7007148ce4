use crate::bridge::TokenBridge;
use crate::config::BridgeConfig;
use common_framework::TextLoc;
use lexer_framework::{Lexeme, LexemeAction, ScanError, Scanner, ScannerRegisters};
use parser_framework::Automaton;
use thiserror::Error;

/// Errors that stop a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The scanner could not recognize the input. `loc` is the location of
    /// the last lexeme handled before the failure.
    #[error("{source} (after {loc})")]
    Scan {
        #[source]
        source: ScanError,
        loc: TextLoc,
    },
}

/// Drives a scanner and an automaton in lockstep through the token bridge.
///
/// The pipeline owns the automaton: it is built by the caller, fed every
/// lexeme and the end-of-input marker, and dropped when the run ends.
pub struct Pipeline<'input, S, A>
where
    S: Scanner,
    A: Automaton,
{
    scanner: S,
    automaton: A,
    bridge: TokenBridge<'input>,
    regs: ScannerRegisters,
}

impl<'input, S, A> Pipeline<'input, S, A>
where
    S: Scanner,
    A: Automaton,
{
    pub fn new(input: &'input str, scanner: S, automaton: A, config: BridgeConfig) -> Self {
        Self {
            scanner,
            automaton,
            bridge: TokenBridge::new(input, config),
            regs: ScannerRegisters::new(input.len()),
        }
    }

    /// Passes `prefix` to the automaton's trace entry point.
    pub fn trace(mut self, prefix: Option<&str>) -> Self {
        self.automaton.trace(prefix);
        self
    }

    /// Runs the scanner to the end of the input, dispatching every lexeme,
    /// then signals end of input. Results accumulate in `ctx`.
    ///
    /// # Panics
    ///
    /// If the scanner returns an empty lexeme, or one that does not start
    /// where the previous one ended.
    pub fn run(mut self, ctx: &mut A::Context) -> Result<(), PipelineError> {
        let span = tracing::debug_span!("pipeline", len = self.bridge.input().len());
        let _enter = span.enter();

        let input = self.bridge.input();
        let mut count = 0usize;
        let mut next = 0usize;
        loop {
            let lexeme = match self.scanner.next_lexeme(input, &mut self.regs) {
                Ok(Some(lexeme)) => lexeme,
                Ok(None) => break,
                Err(source) => {
                    tracing::debug!(error = %source, loc = %self.bridge.loc(), "scan failed");
                    return Err(PipelineError::Scan {
                        source,
                        loc: self.bridge.loc(),
                    });
                }
            };
            assert!(
                lexeme.te > lexeme.ts,
                "scanner returned an empty lexeme at byte {}",
                lexeme.ts
            );
            assert!(
                lexeme.ts == next,
                "scanner jumped from byte {} to byte {}",
                next,
                lexeme.ts
            );
            next = lexeme.te;
            self.dispatch(lexeme, ctx);
            count += 1;
        }

        self.bridge.finish(&mut self.automaton, ctx);
        tracing::debug!(lexemes = count, loc = %self.bridge.loc(), "pipeline finished");
        Ok(())
    }

    fn dispatch(&mut self, lexeme: Lexeme, ctx: &mut A::Context) {
        let Lexeme { ts, te, action } = lexeme;
        match action {
            LexemeAction::Deliver { kind, ltrim, rtrim } => self
                .bridge
                .parse_token_trimmed(&mut self.automaton, ctx, ts, te, kind, ltrim, rtrim),
            LexemeAction::DeliverNull { kind } => {
                self.bridge
                    .parse_null_token(&mut self.automaton, ctx, ts, te, kind)
            }
            LexemeAction::Skip => self.bridge.skip_token(ts, te, 0, 0),
        }
    }
}
