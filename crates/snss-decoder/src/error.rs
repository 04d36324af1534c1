use std::path::PathBuf;

use snss_types::TypeError;

/// Errors that can occur while decoding a session file.
///
/// Input that is not an SNSS file at all is not an error: it decodes to a
/// version-0 session with no commands. Everything below aborts the whole
/// decode; no partial session is returned.
///
/// ```text
///   DecodeError
///   ├── TruncatedStream   ← version field, frame size, or payload cut short
///   ├── MalformedRecord   ← a command body failed to decode (TypeError)
///   └── Io                ← the file could not be read
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input ended in the middle of the header or a frame.
    ///
    /// `offset` is absolute within the file; `needed` is how many bytes the
    /// reader expected to find there.
    #[error("stream truncated at offset {offset}: needed {needed} bytes")]
    TruncatedStream { offset: usize, needed: usize },

    /// A complete frame whose body could not be decoded.
    ///
    /// `index` is the command's position in the session, `offset` is the
    /// absolute offset of its frame, and `kind` is the tag byte (absent for
    /// a zero-length frame). The underlying [`TypeError`] names the field.
    #[error("malformed command {index} at offset {offset}")]
    MalformedRecord {
        index: usize,
        offset: usize,
        kind: Option<u8>,
        #[source]
        source: TypeError,
    },

    /// The session file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
