//! Bounds-checked zero-copy slicing

use crate::error::DecodeError;

/// Borrow `length` bytes at `start`, or fail with `BufferUnderrun`
///
/// `name` is the output the span belongs to, for error reporting.
pub fn take<'a>(
    bytes: &'a [u8],
    start: u64,
    length: u64,
    name: Option<&str>,
) -> Result<&'a [u8], DecodeError> {
    let available = bytes.len() as u64;
    let end = start.checked_add(length).unwrap_or(u64::MAX);
    if end > available {
        return Err(DecodeError::underrun(name, end, available));
    }
    // end <= bytes.len(), so both fit in usize
    Ok(&bytes[start as usize..end as usize])
}
