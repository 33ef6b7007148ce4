/// Escaped representation of a character, for diagnostics.
///
/// Line terminators, form feed, vertical tab, horizontal tab and backslash
/// become two-character backslash escapes; everything else is returned as is.
pub fn escape_char(c: char) -> EscapedChar {
    let escaped = match c {
        '\n' => 'n',
        '\r' => 'r',
        '\x0c' => 'f',
        '\x0b' => 'v',
        '\t' => 't',
        '\\' => '\\',
        _ => return EscapedChar::Plain(c),
    };
    EscapedChar::Escaped(escaped)
}

/// Copy of `s` with every character passed through [`escape_char`].
pub fn escape_str(s: &str) -> String {
    let mut es = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            EscapedChar::Plain(c) => es.push(c),
            EscapedChar::Escaped(c) => {
                es.push('\\');
                es.push(c);
            }
        }
    }
    es
}

/// Result of [`escape_char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapedChar {
    /// The character needs no escaping.
    Plain(char),
    /// The character is written as a backslash followed by this letter.
    Escaped(char),
}

impl std::fmt::Display for EscapedChar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapedChar::Plain(c) => write!(f, "{}", c),
            EscapedChar::Escaped(c) => write!(f, "\\{}", c),
        }
    }
}
