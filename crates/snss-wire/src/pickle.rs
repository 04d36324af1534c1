use crate::align::{padded_field_end, LENGTH_PREFIX_SIZE};
use crate::error::WireError;

// ── Fixed-offset reads ────────────────────────────────────────────────
//
// Bounds-checked little-endian reads at an absolute offset. The structured
// tab-state decoder addresses everything this way (slot positions are
// computed, not walked), and the pickle cursor below builds on them.

/// Borrow `len` bytes starting at `offset`.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if the range runs past the end of `buf`.
pub fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], WireError> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(WireError::UnexpectedEof {
            offset,
            needed: len,
        })
}

fn array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], WireError> {
    let bytes = slice_at(buf, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Read a little-endian `u32` at `offset`.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
pub fn read_u32_at(buf: &[u8], offset: usize) -> Result<u32, WireError> {
    array_at(buf, offset).map(u32::from_le_bytes)
}

/// Read a little-endian `i32` at `offset`.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
pub fn read_i32_at(buf: &[u8], offset: usize) -> Result<i32, WireError> {
    array_at(buf, offset).map(i32::from_le_bytes)
}

/// Read a little-endian `i64` at `offset`.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
pub fn read_i64_at(buf: &[u8], offset: usize) -> Result<i64, WireError> {
    array_at(buf, offset).map(i64::from_le_bytes)
}

/// Read an `i32` length field at `offset` and convert it to `usize`.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
/// - [`WireError::NegativeLength`] if the stored value is below zero.
pub fn read_len_at(buf: &[u8], offset: usize) -> Result<usize, WireError> {
    let value = read_i32_at(buf, offset)?;
    usize::try_from(value).map_err(|_| WireError::NegativeLength {
        offset,
        value: i64::from(value),
    })
}

// ── Text helpers ──────────────────────────────────────────────────────

/// Decode bytes as ASCII, replacing anything above 0x7F with `?`.
///
/// NUL and other control bytes are kept; lengths are explicit so they are
/// content, not terminators.
#[must_use]
pub fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect()
}

/// Decode UTF-16LE bytes, replacing unpaired surrogates with U+FFFD.
///
/// A trailing odd byte cannot happen for lengths read from the wire (they are
/// doubled code-unit counts) and is ignored.
#[must_use]
pub fn utf16le_lossy(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

// ── Cursor ────────────────────────────────────────────────────────────

/// Cursor over a Chrome pickle: 4-byte integers and length-prefixed,
/// 4-byte-padded variable fields.
///
/// ```text
///   let mut reader = PickleReader::new(body);
///   reader.skip(4)?;                  // pickle payload size
///   let id = reader.read_i32()?;
///   let url = reader.read_bytes()?;   // advances past the padding
/// ```
///
/// Every variable-field read advances the cursor with
/// [`padded_field_end`], so no call site re-derives the padding rule.
#[derive(Clone, Debug)]
pub struct PickleReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PickleReader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes after the cursor. Empty once padding has carried the cursor to
    /// (or past) the end.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or(&[])
    }

    /// Advance the cursor by `n` bytes without interpreting them.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        slice_at(self.buf, self.pos, n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a 4-byte unsigned integer.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let value = read_u32_at(self.buf, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a 4-byte signed integer.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        let value = read_i32_at(self.buf, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a length-prefixed byte field. The length counts bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::NegativeLength`] for a negative length prefix.
    /// - [`WireError::UnexpectedEof`] if the prefix or payload is cut short.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let len = read_len_at(self.buf, self.pos)?;
        self.read_field(len)
    }

    /// Read a length-prefixed UTF-16 field. The length counts code units,
    /// so the payload is twice as many bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::NegativeLength`] for a negative length prefix.
    /// - [`WireError::UnexpectedEof`] if the prefix or payload is cut short.
    pub fn read_utf16_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let units = read_len_at(self.buf, self.pos)?;
        let len = units.checked_mul(2).ok_or(WireError::UnexpectedEof {
            offset: self.pos + LENGTH_PREFIX_SIZE,
            needed: usize::MAX,
        })?;
        self.read_field(len)
    }

    fn read_field(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        let data = slice_at(self.buf, self.pos + LENGTH_PREFIX_SIZE, len)?;
        self.pos = padded_field_end(self.pos, len).ok_or(WireError::UnexpectedEof {
            offset: self.pos,
            needed: len,
        })?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: one pickle field holding `payload`, padded to 4 bytes.
    fn field(payload: &[u8]) -> Vec<u8> {
        let mut buf = i32::try_from(payload.len()).unwrap().to_le_bytes().to_vec();
        buf.extend_from_slice(payload);
        while buf.len() % 4 != 0 {
            buf.push(0);
        }
        buf
    }

    #[test]
    fn fixed_reads_are_little_endian() {
        let buf = [0x01, 0x00, 0x00, 0x80, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(read_u32_at(&buf, 0).unwrap(), 0x8000_0001);
        assert_eq!(read_i32_at(&buf, 4).unwrap(), -1);
        assert_eq!(read_i64_at(&buf, 0).unwrap(), -0x7FFF_FFFF);
    }

    #[test]
    fn fixed_reads_are_bounds_checked() {
        let buf = [0u8; 6];
        assert!(matches!(
            read_i32_at(&buf, 4),
            Err(WireError::UnexpectedEof { offset: 4, needed: 4 })
        ));
        assert!(read_i64_at(&buf, 0).is_err());
        assert!(slice_at(&buf, usize::MAX, 2).is_err());
    }

    #[test]
    fn negative_length_is_rejected() {
        let buf = (-3i32).to_le_bytes();
        assert!(matches!(
            read_len_at(&buf, 0),
            Err(WireError::NegativeLength { offset: 0, value: -3 })
        ));
    }

    #[test]
    fn cursor_advances_past_padding() {
        for len in [0usize, 1, 3, 4, 5, 7, 8] {
            let payload = vec![b'a'; len];
            let mut buf = field(&payload);
            buf.extend_from_slice(&0x1234_5678u32.to_le_bytes());

            let mut reader = PickleReader::new(&buf);
            assert_eq!(reader.read_bytes().unwrap(), &payload[..]);
            assert_eq!(
                reader.position(),
                4 + len.div_ceil(4) * 4,
                "declared length {len}"
            );
            assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        }
    }

    #[test]
    fn utf16_length_counts_code_units() {
        let text: Vec<u8> = "héllo".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let mut buf = 5i32.to_le_bytes().to_vec();
        buf.extend_from_slice(&text);
        buf.extend_from_slice(&[0, 0]);

        let mut reader = PickleReader::new(&buf);
        let raw = reader.read_utf16_bytes().unwrap();
        assert_eq!(utf16le_lossy(raw), "héllo");
        assert_eq!(reader.position(), 16);
    }

    #[test]
    fn truncated_payload_is_eof() {
        let mut buf = 10i32.to_le_bytes().to_vec();
        buf.extend_from_slice(b"short");
        let mut reader = PickleReader::new(&buf);
        assert!(matches!(
            reader.read_bytes(),
            Err(WireError::UnexpectedEof { offset: 4, needed: 10 })
        ));
    }

    #[test]
    fn remaining_is_empty_when_padding_runs_off_the_end() {
        // Length 1, payload present, padding missing.
        let buf = [1, 0, 0, 0, b'x'];
        let mut reader = PickleReader::new(&buf);
        assert_eq!(reader.read_bytes().unwrap(), b"x");
        assert!(reader.remaining().is_empty());
        assert!(reader.read_i32().is_err());
    }

    #[test]
    fn ascii_replaces_high_bytes_and_keeps_nul() {
        assert_eq!(ascii_lossy(b"a\0b\xC3"), "a\0b?");
    }

    #[test]
    fn utf16_replaces_unpaired_surrogate() {
        let bytes = [0x41, 0x00, 0x00, 0xD8];
        assert_eq!(utf16le_lossy(&bytes), "A\u{FFFD}");
    }
}
