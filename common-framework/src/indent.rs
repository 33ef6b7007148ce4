use thiserror::Error;

/// Errors produced while tracking block indentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndentError {
    /// The indent closes some blocks but does not line up with any enclosing
    /// block.
    #[error("indent of {indent} does not match any enclosing block (nearest is {nearest})")]
    Misaligned { indent: usize, nearest: usize },
}

/// Updates a stack of block indents for a line indented by `cur_indent`.
///
/// Each entry of `indents` is the width a block adds on top of its enclosing
/// block, so the total indent of the innermost block is the sum of the stack.
/// Returns the number of blocks opened (positive) or closed (negative):
///
/// - equal to the current total: nothing changes, returns `0`;
/// - deeper: pushes the difference as a new block, returns `1`;
/// - shallower: pops blocks until the totals match, returns minus the number
///   popped. If no enclosing block has exactly `cur_indent`, the stack is
///   left untouched and [`IndentError::Misaligned`] is returned.
pub fn update_block_indents(indents: &mut Vec<usize>, cur_indent: usize) -> Result<isize, IndentError> {
    let total: usize = indents.iter().sum();

    if cur_indent == total {
        return Ok(0);
    }
    if cur_indent > total {
        indents.push(cur_indent - total);
        return Ok(1);
    }

    let mut remaining = total;
    let mut keep = indents.len();
    while remaining > cur_indent {
        keep -= 1;
        remaining -= indents[keep];
    }
    if remaining != cur_indent {
        return Err(IndentError::Misaligned {
            indent: cur_indent,
            nearest: remaining,
        });
    }

    let closed = indents.len() - keep;
    indents.truncate(keep);
    Ok(-(closed as isize))
}
