use crate::error::WireError;

// The magic is ASCII "SNSS": 0x53 'S', 0x4E 'N', 0x53 'S', 0x53 'S'.
// Compared as raw bytes so byte order never comes into it.

/// Magic number: ASCII "SNSS".
pub const SNSS_MAGIC: [u8; 4] = *b"SNSS";

/// Size of the magic marker in bytes.
pub const MAGIC_SIZE: usize = 4;

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = 8;

/// SNSS file header: the first 8 bytes of every session file.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Magic: "SNSS" (53 4E 53 53)      │
/// │ 0x04   │ 4 bytes │ Format version, i32 LE           │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// Chrome has shipped versions 1 and 3 for session files; the reader does not
/// reject any version, it only records what the file declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnssHeader {
    pub version: i32,
}

impl SnssHeader {
    /// Returns `true` if `buf` starts with the SNSS magic.
    ///
    /// Buffers shorter than the magic are never SNSS files.
    #[must_use]
    pub fn has_magic(buf: &[u8]) -> bool {
        buf.get(..MAGIC_SIZE) == Some(&SNSS_MAGIC[..])
    }

    /// Parse a header from the first 8 bytes of the provided buffer.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidMagic`] if the first four bytes are not "SNSS"
    ///   (including buffers shorter than four bytes).
    /// - [`WireError::UnexpectedEof`] if the magic is present but the version
    ///   field is cut short.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if !Self::has_magic(buf) {
            let mut found = [0u8; MAGIC_SIZE];
            let n = buf.len().min(MAGIC_SIZE);
            found[..n].copy_from_slice(&buf[..n]);
            return Err(WireError::InvalidMagic {
                found: u32::from_le_bytes(found),
            });
        }

        let version_bytes = buf
            .get(MAGIC_SIZE..HEADER_SIZE)
            .ok_or(WireError::UnexpectedEof {
                offset: MAGIC_SIZE,
                needed: HEADER_SIZE - MAGIC_SIZE,
            })?;
        let version = i32::from_le_bytes([
            version_bytes[0],
            version_bytes[1],
            version_bytes[2],
            version_bytes[3],
        ]);

        Ok(Self { version })
    }
}
