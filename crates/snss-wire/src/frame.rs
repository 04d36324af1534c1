use crate::error::WireError;
use crate::header::HEADER_SIZE;

/// Size of the little-endian frame length prefix.
pub const FRAME_LEN_SIZE: usize = 2;

/// A raw command frame borrowed from the session buffer.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ size      (u16 LE, 2 bytes)                      │
/// │ payload   [size bytes]                           │
/// │   ├── kind tag (1 byte)                          │
/// │   └── body     (size - 1 bytes)                  │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// The frame reader does not look inside the payload; splitting off the kind
/// tag is the classifier's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Byte offset of the frame's size prefix within the file.
    pub offset: usize,

    /// The payload bytes (kind tag + body).
    pub payload: &'a [u8],
}

/// Lazy iterator over the frames that follow the 8-byte header.
///
/// Yields `Ok(frame)` for every complete frame and stops cleanly when the
/// read position reaches the end of the buffer. A size prefix or payload that
/// runs past the end yields a single `Err(WireError::UnexpectedEof)`, after
/// which the iterator is exhausted.
///
/// The reader only borrows the buffer. A clone taken before iteration walks
/// the same frames again.
#[derive(Clone, Debug)]
pub struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> FrameReader<'a> {
    /// Create a reader over a whole session file.
    ///
    /// The caller is expected to have validated the header already; the
    /// reader starts at offset 8 unconditionally.
    #[must_use]
    pub fn new(file: &'a [u8]) -> Self {
        Self::at(file, HEADER_SIZE)
    }

    /// Create a reader that starts at an arbitrary offset.
    #[must_use]
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos,
            done: pos >= buf.len(),
        }
    }

    /// Current read position in the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_frame(&mut self) -> Result<Frame<'a>, WireError> {
        let offset = self.pos;

        let size_bytes = self
            .buf
            .get(offset..offset + FRAME_LEN_SIZE)
            .ok_or(WireError::UnexpectedEof {
                offset,
                needed: FRAME_LEN_SIZE,
            })?;
        let size = usize::from(u16::from_le_bytes([size_bytes[0], size_bytes[1]]));

        let start = offset + FRAME_LEN_SIZE;
        let payload = self
            .buf
            .get(start..start + size)
            .ok_or(WireError::UnexpectedEof {
                offset: start,
                needed: size,
            })?;

        self.pos = start + size;
        Ok(Frame { offset, payload })
    }
}

impl<'a> Iterator for FrameReader<'a> {
    type Item = Result<Frame<'a>, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.read_frame();
        if result.is_err() || self.pos >= self.buf.len() {
            self.done = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for FrameReader<'_> {}
