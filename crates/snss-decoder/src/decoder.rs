use std::path::Path;

use snss_types::Session;
use snss_wire::{FrameReader, SnssHeader, WireError};

use crate::error::DecodeError;
use crate::stream::CommandStream;

/// Synchronous SNSS decoder over a complete in-memory buffer.
///
/// Decoding proceeds in three steps:
///
///   1. **Header**: check the "SNSS" magic. Anything else is not a session
///      file and decodes to a version-0 [`Session`] with no commands. A
///      magic followed by a cut-short version is a truncation error. A
///      version of 0 is treated like a missing magic.
///   2. **Frames**: walk the `u16`-length-prefixed frames after the 8-byte
///      header until the buffer is exhausted.
///   3. **Commands**: split each payload into its kind tag and body and
///      decode the body. Navigation commands (tags 1 and 6) become
///      `NavigationEntry` values; everything else is kept as raw bytes.
///
/// [`decode`](Self::decode) and [`load`](Self::load) are all-or-nothing: the
/// first error aborts and no partial session is returned. Use
/// [`commands`](Self::commands) to walk a buffer lazily instead.
///
/// # Example
///
/// ```rust
/// use snss_decoder::SnssDecoder;
///
/// let session = SnssDecoder::decode(b"not a session", "notes.txt").unwrap();
/// assert_eq!(session.version, 0);
/// assert!(session.commands.is_empty());
/// ```
pub struct SnssDecoder;

impl SnssDecoder {
    /// Decode a whole session from bytes. `source` labels the input in
    /// renderings (normally the file path).
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TruncatedStream`] if the version field, a frame size
    ///   prefix, or a frame payload is cut short.
    /// - [`DecodeError::MalformedRecord`] if a command body fails to decode.
    pub fn decode(bytes: &[u8], source: impl Into<String>) -> Result<Session, DecodeError> {
        let source = source.into();
        let stream = Self::commands(bytes)?;
        let version = stream.version();
        if version == 0 {
            tracing::info!(%source, size = bytes.len(), "not an SNSS session file");
            return Ok(Session::unrecognized(source));
        }

        let commands = stream.collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            %source,
            version,
            commands = commands.len(),
            "decoded session"
        );

        Ok(Session {
            source,
            version,
            commands,
        })
    }

    /// Read and decode a session file.
    ///
    /// The whole file is read into memory first; the buffer is dropped
    /// before this returns, on success and on error.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if the file cannot be read, plus everything
    /// [`decode`](Self::decode) returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Session, DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "read session file");
        Self::decode(&bytes, path.display().to_string())
    }

    /// Validate the header and return a lazy stream over the commands.
    ///
    /// Unrecognized input yields an empty stream with version 0.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedStream`] if the magic is present but the
    /// version field is cut short. Frame and body errors surface from the
    /// stream itself.
    pub fn commands(bytes: &[u8]) -> Result<CommandStream<'_>, DecodeError> {
        let header = match SnssHeader::read_from(bytes) {
            Ok(header) => header,
            Err(WireError::UnexpectedEof { offset, needed }) => {
                return Err(DecodeError::TruncatedStream { offset, needed });
            }
            Err(err) => {
                tracing::debug!(%err, "unrecognized header");
                return Ok(CommandStream::empty());
            }
        };
        if header.version == 0 {
            return Ok(CommandStream::empty());
        }

        Ok(CommandStream::new(header.version, FrameReader::new(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snss_types::{CommandContent, CommandKind, TypeError};

    fn file(version: i32, frames: &[&[u8]]) -> Vec<u8> {
        let mut buf = b"SNSS".to_vec();
        buf.extend_from_slice(&version.to_le_bytes());
        for payload in frames {
            buf.extend_from_slice(&u16::try_from(payload.len()).unwrap().to_le_bytes());
            buf.extend_from_slice(payload);
        }
        buf
    }

    /// Navigation body with every variable field empty.
    fn empty_navigation(tag: u8, id: i32) -> Vec<u8> {
        let mut payload = vec![tag];
        payload.extend_from_slice(&[0; 4]);
        payload.extend_from_slice(&id.to_le_bytes());
        payload.extend_from_slice(&[0; 4 * 10]);
        payload
    }

    #[test]
    fn wrong_magic_is_unrecognized() {
        for input in [&b""[..], b"SN", b"SNSX\x01\x00\x00\x00", b"hello world"] {
            let session = SnssDecoder::decode(input, "x").unwrap();
            assert_eq!(session.version, 0);
            assert!(session.commands.is_empty());
        }
    }

    #[test]
    fn version_zero_is_unrecognized() {
        let bytes = file(0, &[b"\x02abc"]);
        let session = SnssDecoder::decode(&bytes, "x").unwrap();
        assert!(!session.is_recognized());
        assert!(session.commands.is_empty());
    }

    #[test]
    fn truncated_version_is_an_error() {
        let err = SnssDecoder::decode(b"SNSS\x01", "x").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedStream { offset: 4, needed: 4 }
        ));
    }

    #[test]
    fn header_errors_split_into_unrecognized_and_truncated() {
        let stream = SnssDecoder::commands(b"SNSX\x01\x00\x00\x00").unwrap();
        assert_eq!(stream.version(), 0);
        assert_eq!(stream.count(), 0);

        for input in [&b"SNSS"[..], b"SNSS\x01\x00\x00"] {
            assert!(matches!(
                SnssDecoder::commands(input),
                Err(DecodeError::TruncatedStream { offset: 4, needed: 4 })
            ));
        }
    }

    #[test]
    fn header_only_has_no_commands() {
        let session = SnssDecoder::decode(&file(1, &[]), "x").unwrap();
        assert_eq!(session.version, 1);
        assert!(session.commands.is_empty());
    }

    #[test]
    fn decodes_mixed_commands_in_order() {
        let nav = empty_navigation(6, 11);
        let bytes = file(3, &[b"\x00\x01\x02", &nav, b"\x07"]);
        let session = SnssDecoder::decode(&bytes, "Session_1").unwrap();

        assert_eq!(session.source, "Session_1");
        assert_eq!(session.version, 3);
        assert_eq!(session.commands.len(), 3);
        assert_eq!(session.commands[0].kind, CommandKind::Other(0));
        assert_eq!(session.commands[0].content, CommandContent::Raw(vec![1, 2]));
        assert_eq!(session.commands[1].navigation().map(|e| e.id), Some(11));
        assert_eq!(session.commands[2].content, CommandContent::Raw(Vec::new()));
    }

    #[test]
    fn truncated_frame_aborts_the_load() {
        let mut bytes = file(1, &[b"\x02ab"]);
        bytes.extend_from_slice(&50u16.to_le_bytes());
        bytes.extend_from_slice(b"short");

        let err = SnssDecoder::decode(&bytes, "x").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedStream { offset: 15, needed: 50 }
        ));
    }

    #[test]
    fn empty_frame_is_malformed() {
        let bytes = file(1, &[b"\x02a", b""]);
        let err = SnssDecoder::decode(&bytes, "x").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedRecord {
                index: 1,
                offset: 12,
                kind: None,
                source: TypeError::EmptyCommand,
            }
        ));
    }

    #[test]
    fn bad_navigation_body_is_malformed() {
        let bytes = file(1, &[b"\x01\x00\x00\x00\x00\x05"]);
        let err = SnssDecoder::decode(&bytes, "x").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedRecord {
                index: 0,
                offset: 8,
                kind: Some(1),
                source: TypeError::Field { field: "id", .. },
            }
        ));
    }

    #[test]
    fn stream_stops_after_first_error() {
        let bytes = file(1, &[b"\x02a", b"", b"\x02b"]);
        let results: Vec<_> = SnssDecoder::commands(&bytes).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn cloned_stream_replays() {
        let nav = empty_navigation(1, 4);
        let bytes = file(1, &[&nav, b"\x09zz"]);
        let stream = SnssDecoder::commands(&bytes).unwrap();
        let first: Vec<_> = stream.clone().map(Result::unwrap).collect();
        let second: Vec<_> = stream.map(Result::unwrap).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SnssDecoder::load("/nonexistent/snss/Current Session").unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
    }
}
