/// Text of `input` between byte offsets `ts` (first matched character) and
/// `te` (one past the last).
///
/// # Panics
///
/// If `ts > te`, `te` is past the end of `input`, or either offset is not on
/// a character boundary.
pub fn tok_text(input: &str, ts: usize, te: usize) -> &str {
    assert!(ts <= te, "match start {} is after match end {}", ts, te);
    assert!(
        te <= input.len(),
        "match end {} is past the end of the input ({})",
        te,
        input.len()
    );
    &input[ts..te]
}

/// Like [`tok_text`], with `ltrim` characters dropped from the front and
/// `rtrim` characters dropped from the back.
///
/// Used to strip delimiters (quotes, brackets) that belong to the raw match
/// but not to its semantic text. Trims count characters, like the columns
/// of [`TextLoc`](crate::TextLoc), so multibyte delimiters such as `«`/`»`
/// trim as one each.
///
/// # Panics
///
/// If the trimmed length would be negative, or on the same conditions as
/// [`tok_text`].
pub fn tok_text_trimmed(input: &str, ts: usize, te: usize, ltrim: usize, rtrim: usize) -> &str {
    let raw = tok_text(input, ts, te);
    let len = raw.chars().count();
    assert!(
        ltrim + rtrim <= len,
        "trimming {}+{} characters from a {}-character match",
        ltrim,
        rtrim,
        len
    );
    let start = raw
        .char_indices()
        .nth(ltrim)
        .map_or(raw.len(), |(offset, _)| offset);
    let end = match rtrim {
        0 => raw.len(),
        n => raw
            .char_indices()
            .nth_back(n - 1)
            .map_or(0, |(offset, _)| offset),
    };
    &raw[start..end]
}
