use crate::config::BridgeConfig;
use common_framework::{escape_str, mtext_loc, tok_text, tok_text_trimmed, TextLoc, FIRST_TEXT_LOC};
use lexer_framework::{LocatedToken, TokenKind};
use parser_framework::Automaton;

/// Turns raw scanner matches into located tokens and feeds them to an
/// automaton.
///
/// The bridge carries the running state every scanner step depends on: the
/// text of the last match and its location. Each operation advances that
/// state from the *full* raw match, so the next call computes its location
/// from the right starting point whatever the previous lexeme was.
///
/// Matches are given as byte offsets `ts..te` into the input buffer.
#[derive(Debug)]
pub struct TokenBridge<'input> {
    input: &'input str,
    mtext: String,
    loc: TextLoc,
    config: BridgeConfig,
}

impl<'input> TokenBridge<'input> {
    /// Creates a bridge positioned before the first character of `input`.
    pub fn new(input: &'input str, config: BridgeConfig) -> Self {
        Self {
            input,
            mtext: String::new(),
            loc: FIRST_TEXT_LOC,
            config,
        }
    }

    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Text of the most recent match, trimmed.
    pub fn mtext(&self) -> &str {
        &self.mtext
    }

    /// Location of the most recent match.
    pub fn loc(&self) -> TextLoc {
        self.loc
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Records the match `ts..te`: the matched text becomes the match minus
    /// `ltrim`/`rtrim` characters, the location advances over the whole match.
    ///
    /// # Panics
    ///
    /// If the offsets are out of order or out of bounds, or the trims leave a
    /// negative length.
    pub fn set_mtext_and_loc_trimmed(&mut self, ts: usize, te: usize, ltrim: usize, rtrim: usize) {
        let trimmed = tok_text_trimmed(self.input, ts, te, ltrim, rtrim);
        self.mtext.clear();
        self.mtext.push_str(trimmed);
        self.loc = mtext_loc(&self.loc, tok_text(self.input, ts, te));
    }

    /// Consumes a match the parser must never see, such as a comment.
    ///
    /// The automaton is not called and no token is built, but the running
    /// text and location are still updated. The trims still apply to the
    /// recorded text, which is what verbose logs show; callers that want the
    /// raw comment text pass `0, 0`.
    pub fn skip_token(&mut self, ts: usize, te: usize, ltrim: usize, rtrim: usize) {
        self.set_mtext_and_loc_trimmed(ts, te, ltrim, rtrim);
        if self.config.logs_lexemes() {
            tracing::debug!(
                mtext = %escape_str(&self.mtext),
                loc = %self.loc,
                "skipping text"
            );
        }
    }

    /// Builds a token from the match and passes it to `automaton` as `kind`.
    ///
    /// The token's text is trimmed; its location covers the whole match,
    /// since the trimmed delimiters were still consumed. Ownership of the
    /// token moves to the automaton.
    #[allow(clippy::too_many_arguments)]
    pub fn parse_token_trimmed<A: Automaton>(
        &mut self,
        automaton: &mut A,
        ctx: &mut A::Context,
        ts: usize,
        te: usize,
        kind: TokenKind,
        ltrim: usize,
        rtrim: usize,
    ) {
        self.set_mtext_and_loc_trimmed(ts, te, ltrim, rtrim);
        if self.config.logs_lexemes() {
            tracing::debug!(
                mtext = %escape_str(&self.mtext),
                loc = %self.loc,
                kind = kind.id(),
                "passing token to the parser"
            );
        }
        let token = LocatedToken::new(self.mtext.clone(), self.config.file_path.clone(), self.loc);
        automaton.step(kind, Some(Box::new(token)), ctx);
    }

    /// Tells `automaton` a token of `kind` occurred, without passing its text.
    pub fn parse_null_token<A: Automaton>(
        &mut self,
        automaton: &mut A,
        ctx: &mut A::Context,
        ts: usize,
        te: usize,
        kind: TokenKind,
    ) {
        self.set_mtext_and_loc_trimmed(ts, te, 0, 0);
        if self.config.logs_lexemes() {
            tracing::debug!(
                mtext = %escape_str(&self.mtext),
                loc = %self.loc,
                kind = kind.id(),
                "passing token to the parser as null"
            );
        }
        automaton.step(kind, None, ctx);
    }

    /// Signals end of input to `automaton`. The running state is left as is.
    pub fn finish<A: Automaton>(&mut self, automaton: &mut A, ctx: &mut A::Context) {
        tracing::trace!(loc = %self.loc, "passing end of input to the parser");
        automaton.step(TokenKind::END_OF_INPUT, None, ctx);
    }
}
