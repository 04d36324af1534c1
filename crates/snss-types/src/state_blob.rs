use snss_wire::pickle::{read_i32_at, read_i64_at};
use snss_wire::WireError;

use crate::error::{FieldContext, TypeError};
use crate::structured_state::StructuredState;

/// Size of the blob header that the raw fallback strips.
pub const STATE_HEADER_SIZE: usize = 8;

/// Offset of the blob's version field.
pub const STATE_VERSION_OFFSET: usize = 4;

/// Offsets of the four `i64` shape markers.
pub const SHAPE_MARKER_OFFSETS: [usize; 4] = [12, 20, 28, 36];

/// Marker values that identify the structured layout.
pub const SHAPE_MARKERS: [i64; 4] = [0x18, 0x10, 0x10, 0x08];

/// Offset of the first structured record.
pub const FIRST_RECORD_OFFSET: usize = 44;

/// Versions with a known structured layout.
pub const STRUCTURED_VERSIONS: [i32; 2] = [27, 28];

/// The serialized page state attached to a navigation entry.
///
/// ```text
/// ┌────────┬──────────┬──────────────────────────────────────────┐
/// │ Offset │ Size     │ Description                              │
/// ├────────┼──────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 4 bytes  │ (pickle size, ignored)                   │
/// │ 0x04   │ 4 bytes  │ Version, i32 LE                          │
/// │ 0x08   │ 4 bytes  │ (ignored)                                │
/// │ 0x0C   │ 32 bytes │ Four i64 shape markers                   │
/// │ 0x2C   │ ...      │ Structured records, back to back         │
/// └────────┴──────────┴──────────────────────────────────────────┘
/// ```
///
/// Only versions 27 and 28 with markers `[0x18, 0x10, 0x10, 0x08]` are
/// decoded structurally. Everything else keeps the bytes after the 8-byte
/// header verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateBlob {
    pub version: i32,
    pub content: StateContent,
}

/// What a [`StateBlob`] decoded to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateContent {
    Structured(Vec<StructuredState>),
    /// Bytes after the 8-byte header, for unknown versions or layouts.
    Raw(Vec<u8>),
}

impl Default for StateContent {
    fn default() -> Self {
        Self::Raw(Vec::new())
    }
}

impl StateBlob {
    /// Decode a state blob.
    ///
    /// An empty blob (a navigation entry with no state) decodes to version 0
    /// with empty raw content. Standalone SNSS readers read the version at
    /// offset 4 unconditionally and fail on such entries; this one does not.
    /// A structured layout is only recognized when the blob is long enough to
    /// hold all four markers.
    ///
    /// # Errors
    ///
    /// - [`TypeError::Field`] if a non-empty blob is shorter than its 8-byte
    ///   header, or a structured record reads out of range.
    /// - [`TypeError::StalledRecord`] if a structured record does not advance.
    pub fn decode(blob: &[u8]) -> Result<Self, TypeError> {
        if blob.is_empty() {
            return Ok(Self::default());
        }

        let version = read_i32_at(blob, STATE_VERSION_OFFSET).field("tab state version")?;
        let raw = blob.get(STATE_HEADER_SIZE..).ok_or(TypeError::Field {
            field: "tab state header",
            source: WireError::UnexpectedEof {
                offset: 0,
                needed: STATE_HEADER_SIZE,
            },
        })?;

        if !is_structured(blob, version) {
            return Ok(Self {
                version,
                content: StateContent::Raw(raw.to_vec()),
            });
        }

        let mut records = Vec::new();
        let mut base = FIRST_RECORD_OFFSET;
        while base < blob.len() {
            let (record, next) = StructuredState::decode_record(blob, base, version)?;
            tracing::trace!(offset = base, next, "decoded tab-state record");
            records.push(record);
            base = next;
        }

        Ok(Self {
            version,
            content: StateContent::Structured(records),
        })
    }

    /// The structured records, if this blob had a recognized layout.
    #[must_use]
    pub fn records(&self) -> Option<&[StructuredState]> {
        match &self.content {
            StateContent::Structured(records) => Some(records),
            StateContent::Raw(_) => None,
        }
    }
}

fn is_structured(blob: &[u8], version: i32) -> bool {
    if !STRUCTURED_VERSIONS.contains(&version) || blob.len() < FIRST_RECORD_OFFSET {
        return false;
    }
    SHAPE_MARKER_OFFSETS
        .iter()
        .zip(SHAPE_MARKERS)
        .all(|(&offset, expected)| read_i64_at(blob, offset).is_ok_and(|m| m == expected))
}
