/// Registers a generated scanner keeps between steps.
///
/// All positions are byte offsets into the input buffer. The bridge never
/// reads or writes these; they belong to the scanner's own loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScannerRegisters {
    /// Next input character to read.
    pub p: usize,
    /// Just past the last character in the buffer.
    pub pe: usize,
    /// End of the input stream, once known.
    pub eof: Option<usize>,
    /// Current scanner state.
    pub cs: i32,
    /// Most recent successful pattern match.
    pub act: i32,
    /// First character of the current match.
    pub ts: usize,
    /// Just past the last character of the current match.
    pub te: usize,
}

impl ScannerRegisters {
    /// Registers for a complete, in-memory buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            pe: len,
            eof: Some(len),
            ..Self::default()
        }
    }

    /// Returns `true` once every buffered character has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.p >= self.pe
    }

    /// Returns `true` if `p` has reached the end of the stream.
    pub fn at_eof(&self) -> bool {
        self.eof.is_some_and(|eof| self.p >= eof)
    }

    /// Records a match of `ts..te` made by pattern `act` and moves `p` past it.
    pub fn record_match(&mut self, ts: usize, te: usize, act: i32) {
        debug_assert!(ts <= te);
        self.ts = ts;
        self.te = te;
        self.act = act;
        self.p = te;
    }

    /// Length of the current match in bytes.
    pub fn match_len(&self) -> usize {
        self.te - self.ts
    }
}
