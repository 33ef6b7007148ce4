//! Common Framework
//!
//! Pieces shared by the lexer and parser frameworks: source locations,
//! diagnostic escaping, match text extraction and block indentation.

pub mod escape;
pub mod indent;
pub mod text_loc;
pub mod tok_text;

pub use escape::{escape_char, escape_str, EscapedChar};
pub use indent::{update_block_indents, IndentError};
pub use text_loc::{
    count_line_breaks, mtext_loc, span_loc, TextLoc, EMPTY_TEXT_LOC, FIRST_TEXT_LOC,
};
pub use tok_text::{tok_text, tok_text_trimmed};
