use common_framework::{escape_str, TextLoc};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a token kind, as numbered by the parser generator.
///
/// The bridge never interprets it; it only hands it to the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKind(pub i32);

impl TokenKind {
    /// Kind sent once after the last lexeme, with no payload.
    pub const END_OF_INPUT: TokenKind = TokenKind(0);

    /// Returns the raw numeric id.
    pub fn id(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token handed by the scanner to the parser: matched text plus where it
/// came from.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedToken {
    mtext: String,
    fpath: Option<PathBuf>,
    loc: TextLoc,
}

impl LocatedToken {
    /// Creates a token from its matched text, source file (if any) and location.
    pub fn new(mtext: impl Into<String>, fpath: Option<PathBuf>, loc: TextLoc) -> Self {
        Self {
            mtext: mtext.into(),
            fpath,
            loc,
        }
    }

    /// Text matched and pushed to the parser, after trimming.
    pub fn mtext(&self) -> &str {
        &self.mtext
    }

    /// Path of the source file, or `None` for in-memory input.
    pub fn file_path(&self) -> Option<&Path> {
        self.fpath.as_deref()
    }

    /// Location of the matched text, including any trimmed delimiters.
    pub fn loc(&self) -> TextLoc {
        self.loc
    }

    /// Consumes the token, returning its text.
    pub fn into_mtext(self) -> String {
        self.mtext
    }
}

impl fmt::Display for LocatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOCATED_TOKEN(\"{}\", ", escape_str(&self.mtext))?;
        if let Some(path) = &self.fpath {
            write!(f, "\"{}\", ", path.display())?;
        }
        write!(f, "{})", self.loc)
    }
}
