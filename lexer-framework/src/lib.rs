//! Lexer Framework
//!
//! The scanner side of the scanner/parser bridge: located tokens, token
//! kinds, the scanner register block and the lexeme protocol.

pub mod registers;
pub mod scanner;
pub mod token;

pub use common_framework::{TextLoc, FIRST_TEXT_LOC};
pub use registers::ScannerRegisters;
pub use scanner::{Lexeme, LexemeAction, ScanError, Scanner};
pub use token::{LocatedToken, TokenKind};
