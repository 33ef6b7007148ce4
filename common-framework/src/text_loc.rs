use std::fmt;

/// Location of a span of text in the source being scanned.
///
/// Columns are 0-based and column 0 sits *before* the first character of a
/// line, so the first character of line 1 spans `1:1`. Both ends of the span
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextLoc {
    /// Line number of the first character.
    pub first_lno: usize,
    /// Column number of the first character.
    pub first_cno: usize,
    /// Line number of the last character.
    pub last_lno: usize,
    /// Column number of the last character.
    pub last_cno: usize,
}

/// Location "span" at the start of any file or string, from which every other
/// location is computed.
pub const FIRST_TEXT_LOC: TextLoc = TextLoc::new(1, 0, 1, 0);

/// Empty, uninitialized location.
pub const EMPTY_TEXT_LOC: TextLoc = TextLoc::new(0, 0, 0, 0);

impl TextLoc {
    /// Creates a location from its four components.
    pub const fn new(first_lno: usize, first_cno: usize, last_lno: usize, last_cno: usize) -> Self {
        Self {
            first_lno,
            first_cno,
            last_lno,
            last_cno,
        }
    }

    /// Returns `true` if the span delimited by `self` comes entirely before
    /// the span delimited by `other`.
    ///
    /// Spans that touch on the same line (`self.last_cno <= other.first_cno`)
    /// still count as ordered. Overlapping or entwined spans are ordered
    /// neither way, which is why this is not a `PartialOrd` impl.
    pub fn precedes(&self, other: &TextLoc) -> bool {
        self.last_lno < other.first_lno
            || (self.last_lno == other.first_lno && self.last_cno <= other.first_cno)
    }

    /// Returns `true` if the span starts and ends on the same line.
    pub fn is_single_line(&self) -> bool {
        self.first_lno == self.last_lno
    }
}

impl fmt::Display for TextLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}:{}", self.first_lno, self.first_cno)?;
            if self.first_cno != self.last_cno {
                write!(f, "-{}", self.last_cno)?;
            }
            Ok(())
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.first_lno, self.first_cno, self.last_lno, self.last_cno
            )
        }
    }
}

/// Counts the line terminators in `text`.
///
/// `\r\n`, `\r` and `\n` each count as one terminator, matched leftmost
/// first. Returns the count and the byte offset just past the last
/// terminator (0 when there is none).
pub fn count_line_breaks(text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut tail = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                count += 1;
                i += 2;
                tail = i;
            }
            b'\r' | b'\n' => {
                count += 1;
                i += 1;
                tail = i;
            }
            _ => i += 1,
        }
    }
    (count, tail)
}

/// Location of `mtext`, given the location of the text scanned just before it.
///
/// The new span starts one column after `prev_loc` ends. Only
/// `prev_loc.last_lno` and `prev_loc.last_cno` are read. Lengths are counted
/// in characters.
///
/// ```
/// use common_framework::{mtext_loc, TextLoc};
///
/// let prev = TextLoc::new(1, 26, 1, 29);
/// let loc = mtext_loc(&prev, "Everything");
/// assert_eq!(loc, TextLoc::new(1, 30, 1, 39));
/// ```
pub fn mtext_loc(prev_loc: &TextLoc, mtext: &str) -> TextLoc {
    let first_lno = prev_loc.last_lno;
    let first_cno = prev_loc.last_cno + 1;

    let (num_newlines, tail) = count_line_breaks(mtext);
    let (last_lno, last_cno) = if num_newlines > 0 {
        (first_lno + num_newlines, mtext[tail..].chars().count())
    } else {
        (first_lno, prev_loc.last_cno + mtext.chars().count())
    };

    TextLoc {
        first_lno,
        first_cno,
        last_lno,
        last_cno,
    }
}

/// Location spanning from the start of `first_loc` to the end of `last_loc`.
///
/// Nothing is validated, so locations can be thrown at it blindly to get the
/// span of a node with many children.
pub const fn span_loc(first_loc: &TextLoc, last_loc: &TextLoc) -> TextLoc {
    TextLoc::new(
        first_loc.first_lno,
        first_loc.first_cno,
        last_loc.last_lno,
        last_loc.last_cno,
    )
}
