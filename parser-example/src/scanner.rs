//! Scanner for the logic declaration language.
//!
//! ```text
//! # comment
//! data ready = false || "yes";
//! ```

use lexer_framework::{Lexeme, LexemeAction, ScanError, Scanner, ScannerRegisters, TokenKind};

pub const END: TokenKind = TokenKind::END_OF_INPUT;
pub const DATA: TokenKind = TokenKind(1);
pub const IDENT: TokenKind = TokenKind(2);
pub const EQ: TokenKind = TokenKind(3);
pub const SEMI: TokenKind = TokenKind(4);
pub const OROR: TokenKind = TokenKind(5);
pub const TRUE: TokenKind = TokenKind(6);
pub const FALSE: TokenKind = TokenKind(7);
pub const STRING: TokenKind = TokenKind(8);

// Pattern numbers stored in `ScannerRegisters::act`.
const PAT_SPACE: i32 = 1;
const PAT_COMMENT: i32 = 2;
const PAT_WORD: i32 = 3;
const PAT_STRING: i32 = 4;
const PAT_PUNCT: i32 = 5;

/// Recognizes one lexeme per call, longest match first.
///
/// Whitespace and `#` comments are skipped, `=` and `||` are delivered
/// without text, string literals are delivered without their quotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogicScanner;

impl LogicScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for LogicScanner {
    fn next_lexeme(
        &mut self,
        input: &str,
        regs: &mut ScannerRegisters,
    ) -> Result<Option<Lexeme>, ScanError> {
        if regs.is_exhausted() {
            return Ok(None);
        }
        let ts = regs.p;
        let rest = &input[ts..regs.pe];
        let bytes = rest.as_bytes();

        let (act, len, action) = match bytes[0] {
            b' ' | b'\t' | b'\r' | b'\n' => (
                PAT_SPACE,
                run_len(rest, |c| matches!(c, ' ' | '\t' | '\r' | '\n')),
                LexemeAction::Skip,
            ),
            b'#' => (
                PAT_COMMENT,
                rest.find(|c| c == '\r' || c == '\n')
                    .unwrap_or(rest.len()),
                LexemeAction::Skip,
            ),
            b'"' => match rest[1..].find('"') {
                Some(end) => (
                    PAT_STRING,
                    end + 2,
                    LexemeAction::deliver_trimmed(STRING, 1, 1),
                ),
                None => {
                    return Err(ScanError::Unterminated {
                        what: "string literal",
                        offset: ts,
                    })
                }
            },
            b'=' => (PAT_PUNCT, 1, LexemeAction::DeliverNull { kind: EQ }),
            b'|' if bytes.get(1) == Some(&b'|') => {
                (PAT_PUNCT, 2, LexemeAction::DeliverNull { kind: OROR })
            }
            b';' => (PAT_PUNCT, 1, LexemeAction::deliver(SEMI)),
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let len = run_len(rest, |c| c.is_ascii_alphanumeric() || c == '_');
                let kind = match &rest[..len] {
                    "data" => DATA,
                    "true" => TRUE,
                    "false" => FALSE,
                    _ => IDENT,
                };
                (PAT_WORD, len, LexemeAction::deliver(kind))
            }
            _ => {
                let ch = rest.chars().next().unwrap_or_default();
                return Err(ScanError::UnexpectedChar { ch, offset: ts });
            }
        };

        regs.record_match(ts, ts + len, act);
        Ok(Some(Lexeme::from_registers(regs, action)))
    }
}

/// Byte length of the longest prefix of `text` whose characters satisfy `pred`.
fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !pred(c)).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Vec<Lexeme>, ScanError> {
        let mut scanner = LogicScanner::new();
        let mut regs = ScannerRegisters::new(input.len());
        let mut out = Vec::new();
        while let Some(lexeme) = scanner.next_lexeme(input, &mut regs)? {
            out.push(lexeme);
        }
        Ok(out)
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let lexemes = scan("data datum true false_").unwrap();
        let kinds: Vec<_> = lexemes
            .iter()
            .filter_map(|l| match l.action {
                LexemeAction::Deliver { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![DATA, IDENT, TRUE, IDENT]);
    }

    #[test]
    fn test_lexemes_cover_input() {
        let input = "data x = true || \"a\nb\"; # done\n";
        let lexemes = scan(input).unwrap();
        let mut end = 0;
        for lexeme in &lexemes {
            assert_eq!(lexeme.ts, end);
            assert!(lexeme.te > lexeme.ts);
            end = lexeme.te;
        }
        assert_eq!(end, input.len());
    }

    #[test]
    fn test_punctuation_actions() {
        let lexemes = scan("=||;").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::new(0, 1, LexemeAction::DeliverNull { kind: EQ }),
                Lexeme::new(1, 3, LexemeAction::DeliverNull { kind: OROR }),
                Lexeme::new(3, 4, LexemeAction::deliver(SEMI)),
            ]
        );
    }

    #[test]
    fn test_string_is_trimmed() {
        let lexemes = scan("\"hi\"").unwrap();
        assert_eq!(
            lexemes,
            vec![Lexeme::new(0, 4, LexemeAction::deliver_trimmed(STRING, 1, 1))]
        );
    }

    #[test]
    fn test_comment_stops_at_line_end() {
        let lexemes = scan("# note\r\nx").unwrap();
        assert_eq!(lexemes[0], Lexeme::new(0, 6, LexemeAction::Skip));
        assert_eq!(lexemes[1], Lexeme::new(6, 8, LexemeAction::Skip));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            scan("x \"open"),
            Err(ScanError::Unterminated {
                what: "string literal",
                offset: 2
            })
        );
    }

    #[test]
    fn test_single_bar_is_rejected() {
        assert_eq!(
            scan("a | b"),
            Err(ScanError::UnexpectedChar { ch: '|', offset: 2 })
        );
    }
}
