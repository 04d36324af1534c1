use snss_types::{Command, TypeError};
use snss_wire::{FrameReader, WireError};

use crate::error::DecodeError;

/// Lazy iterator over the commands of a session buffer.
///
/// Each call to `next` reads one frame, classifies it, and decodes its body.
/// The first error ends the stream: a truncated frame yields
/// [`DecodeError::TruncatedStream`], a bad body yields
/// [`DecodeError::MalformedRecord`], and nothing follows either.
///
/// The stream borrows the buffer and is cheap to clone. A clone taken before
/// iteration yields the same commands again, which is how a caller walks a
/// session twice without decoding it into a `Vec`.
///
/// ```text
///   let stream = SnssDecoder::commands(&bytes)?;
///   let kinds: Vec<_> = stream.clone().filter_map(Result::ok).map(|c| c.kind).collect();
///   for command in stream { /* ... */ }
/// ```
#[derive(Clone, Debug)]
pub struct CommandStream<'a> {
    version: i32,
    frames: Option<FrameReader<'a>>,
    index: usize,
}

impl<'a> CommandStream<'a> {
    pub(crate) fn new(version: i32, frames: FrameReader<'a>) -> Self {
        Self {
            version,
            frames: Some(frames),
            index: 0,
        }
    }

    /// A stream for input that is not an SNSS file.
    pub(crate) fn empty() -> Self {
        Self {
            version: 0,
            frames: None,
            index: 0,
        }
    }

    /// The format version from the file header, or 0 for unrecognized input.
    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Number of commands yielded so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }
}

impl Iterator for CommandStream<'_> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let frames = self.frames.as_mut()?;
        let frame_offset = FrameReader::position(frames);
        let frame = match frames.next()? {
            Ok(frame) => frame,
            Err(err) => {
                self.frames = None;
                return Some(Err(frame_error(self.index, frame_offset, err)));
            }
        };

        let index = self.index;
        self.index += 1;

        match Command::decode(frame.payload) {
            Ok(command) => {
                tracing::debug!(
                    index,
                    offset = frame.offset,
                    size = frame.payload.len(),
                    kind = command.kind.wire_id(),
                    "decoded command"
                );
                Some(Ok(command))
            }
            Err(source) => {
                self.frames = None;
                Some(Err(DecodeError::MalformedRecord {
                    index,
                    offset: frame.offset,
                    kind: frame.payload.first().copied(),
                    source,
                }))
            }
        }
    }
}

impl std::iter::FusedIterator for CommandStream<'_> {}

/// Running out of bytes mid-frame is a truncated stream. Any other framing
/// failure is charged to the frame that starts at `offset`.
fn frame_error(index: usize, offset: usize, err: WireError) -> DecodeError {
    match err {
        WireError::UnexpectedEof { offset, needed } => {
            DecodeError::TruncatedStream { offset, needed }
        }
        source @ (WireError::NegativeLength { .. } | WireError::InvalidMagic { .. }) => {
            DecodeError::MalformedRecord {
                index,
                offset,
                kind: None,
                source: TypeError::Field {
                    field: "frame",
                    source,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_while_framing_is_truncation() {
        let err = frame_error(
            2,
            20,
            WireError::UnexpectedEof {
                offset: 22,
                needed: 9,
            },
        );
        assert!(matches!(
            err,
            DecodeError::TruncatedStream {
                offset: 22,
                needed: 9
            }
        ));
    }

    #[test]
    fn other_framing_failures_name_the_frame() {
        let err = frame_error(
            3,
            40,
            WireError::NegativeLength {
                offset: 40,
                value: -1,
            },
        );
        assert!(matches!(
            err,
            DecodeError::MalformedRecord {
                index: 3,
                offset: 40,
                kind: None,
                source: TypeError::Field { field: "frame", .. },
            }
        ));
    }

    #[test]
    fn truncated_prefix_ends_the_stream() {
        let bytes = b"SNSS\x01\x00\x00\x00\x02\x00\x05\x06\x07";
        let mut stream = CommandStream::new(1, FrameReader::new(bytes));
        assert!(stream.next().unwrap().is_ok());
        assert!(matches!(
            stream.next(),
            Some(Err(DecodeError::TruncatedStream {
                offset: 12,
                needed: 2
            }))
        ));
        assert!(stream.next().is_none());
    }
}
