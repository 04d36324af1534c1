/// Errors raised while reading raw SNSS bytes.
///
/// These are the lowest-level failures in the stack: a read that would run
/// past the end of its buffer, a length field that cannot be a length, or a
/// header that is not SNSS at all. Higher crates attach field names and
/// command indices on top of these.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A read needed more bytes than the buffer holds.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A signed length field held a negative value.
    #[error("negative length {value} at offset {offset}")]
    NegativeLength { offset: usize, value: i64 },

    /// Magic number did not match "SNSS".
    #[error("invalid magic number: expected 0x53534E53, got {found:#010X}")]
    InvalidMagic { found: u32 },
}

// NOTE
// `UnexpectedEof` carries both the offset where the read started and how many
// bytes it wanted. For a truncated frame that is the frame's own offset and its
// declared size; for a field read inside a command body it is relative to that
// body. The decoder crate turns the first into `TruncatedStream` and the
// second into `MalformedRecord`.
// {found:#010X} prints the bytes as a little-endian u32 with a 0x prefix,
// padded to 10 characters, so "SNSS" shows up as 0x53534E53.
