use snss_wire::align::{RECORD_ALIGNMENT, align_up};
use snss_wire::pickle::{ascii_lossy, read_i32_at, read_i64_at, read_len_at, slice_at, utf16le_lossy};
use snss_wire::WireError;

use crate::error::{FieldContext, TypeError};

/// One record of a structured (version 27/28) tab-state blob.
///
/// The record starts with a fixed block of 8-byte slots. Pointer slots hold a
/// 32-bit offset relative to the slot's own position; scalar slots hold an
/// `i64` directly.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────────────────┐
/// │ Slot   │ Field    │ Contents                                    │
/// ├────────┼──────────┼─────────────────────────────────────────────┤
/// │ +8     │ value_a  │ -> text record (0 = empty)                  │
/// │ +16    │ value_b  │ -> text record (0 = empty)                  │
/// │ +24    │ value_c  │ -> text record (0 = empty)                  │
/// │ +32    │ value_d  │ -> byte array, header included (0 = empty)  │
/// │ +40    │ value_e  │ -> array of pointers to text records        │
/// │ +48    │ value_f  │ i64                                         │
/// │ +56    │ value_g  │ -> raw bytes up to value_j (0 = empty)      │
/// │ +64    │ value_h  │ i64                                         │
/// │ +72    │ value_i  │ i64                                         │
/// │ +80    │ value_j  │ -> byte array, header included              │
/// │ +88    │ value_k  │ -> byte array, header included              │
/// │ +96    │ value_l  │ -> ASCII record (version 28 only)           │
/// └────────┴──────────┴─────────────────────────────────────────────┘
/// ```
///
/// A text record keeps its UTF-16 code-unit count at +20 and the code units
/// from +24. A byte array keeps its total length (header included) at +0. An
/// ASCII record keeps its byte count at +4 and the bytes from +8.
///
/// The fields have no documented meaning on the Chrome side, so they keep
/// positional names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuredState {
    pub value_a: String,
    pub value_b: String,
    pub value_c: String,
    pub value_d: Vec<u8>,
    pub value_e: Vec<String>,
    pub value_f: i64,
    pub value_g: Vec<u8>,
    pub value_h: i64,
    pub value_i: i64,
    pub value_j: Vec<u8>,
    pub value_k: Vec<u8>,
    pub value_l: String,
}

/// Version whose records carry the `value_l` slot.
pub const VERSION_WITH_L: i32 = 28;

mod slot {
    pub const A: usize = 8;
    pub const B: usize = 16;
    pub const C: usize = 24;
    pub const D: usize = 32;
    pub const E: usize = 40;
    pub const F: usize = 48;
    pub const G: usize = 56;
    pub const H: usize = 64;
    pub const I: usize = 72;
    pub const J: usize = 80;
    pub const K: usize = 88;
    pub const L: usize = 96;
}

/// Offset of the code-unit count inside a text record.
const TEXT_COUNT_OFFSET: usize = 20;
/// Offset of the code units inside a text record.
const TEXT_DATA_OFFSET: usize = 24;
/// Offset of the element count inside a pointer array.
const ARRAY_COUNT_OFFSET: usize = 4;
/// Size of the pointer-array header and of each element slot.
const ARRAY_SLOT_SIZE: usize = 8;
/// Offset of the byte count inside an ASCII record.
const ASCII_COUNT_OFFSET: usize = 4;
/// Size of the ASCII record header.
const ASCII_HEADER_SIZE: usize = 8;

impl StructuredState {
    /// Decode the record starting at `base` and return it together with the
    /// offset of the next record.
    ///
    /// # Errors
    ///
    /// - [`TypeError::Field`] when any read falls outside `blob` or a length
    ///   is negative.
    /// - [`TypeError::StalledRecord`] when the next-record offset is not past
    ///   `base`.
    pub fn decode_record(blob: &[u8], base: usize, version: i32) -> Result<(Self, usize), TypeError> {
        let value_a = optional_text(blob, base + slot::A, "tab state value A")?;
        let value_b = optional_text(blob, base + slot::B, "tab state value B")?;
        let value_c = optional_text(blob, base + slot::C, "tab state value C")?;

        let value_d = match pointer(blob, base + slot::D, "tab state value D")? {
            Some(pos) => sized_bytes(blob, pos, "tab state value D")?.to_vec(),
            None => Vec::new(),
        };

        let value_e = text_list(blob, base + slot::E)?;
        let value_f = read_i64_at(blob, base + slot::F).field("tab state value F")?;
        let pos_g = pointer(blob, base + slot::G, "tab state value G")?;
        let value_h = read_i64_at(blob, base + slot::H).field("tab state value H")?;
        let value_i = read_i64_at(blob, base + slot::I).field("tab state value I")?;

        // J and K are always present; a zero offset points at the slot itself.
        let pos_j = target(blob, base + slot::J, "tab state value J")?;
        let value_j = sized_bytes(blob, pos_j, "tab state value J")?.to_vec();
        let pos_k = target(blob, base + slot::K, "tab state value K")?;
        let value_k = sized_bytes(blob, pos_k, "tab state value K")?;

        // G runs from its own target up to the start of J.
        let value_g = match pos_g {
            Some(pos) => {
                let len = pos_j.checked_sub(pos).ok_or(TypeError::Field {
                    field: "tab state value G",
                    source: WireError::NegativeLength {
                        offset: pos,
                        value: signed_distance(pos, pos_j),
                    },
                })?;
                slice_at(blob, pos, len).field("tab state value G")?.to_vec()
            }
            None => Vec::new(),
        };

        let l_target = if version == VERSION_WITH_L {
            pointer(blob, base + slot::L, "tab state value L")?
        } else {
            None
        };

        let (value_l, next) = match l_target {
            Some(pos) => {
                let len = read_len_at(blob, pos + ASCII_COUNT_OFFSET).field("tab state value L")?;
                let text = slice_at(blob, pos + ASCII_HEADER_SIZE, len).field("tab state value L")?;
                let next = len
                    .checked_add(ASCII_HEADER_SIZE)
                    .and_then(|n| align_up(n, RECORD_ALIGNMENT))
                    .and_then(|n| pos.checked_add(n))
                    .ok_or(TypeError::StalledRecord { offset: base, next: 0 })?;
                (ascii_lossy(text), next)
            }
            None => (String::new(), pos_k + value_k.len()),
        };

        if next <= base {
            return Err(TypeError::StalledRecord { offset: base, next });
        }

        let state = Self {
            value_a,
            value_b,
            value_c,
            value_d,
            value_e,
            value_f,
            value_g,
            value_h,
            value_i,
            value_j,
            value_k: value_k.to_vec(),
            value_l,
        };
        Ok((state, next))
    }
}

/// Resolve the 32-bit relative offset stored at `slot_pos`, zero included.
fn target(blob: &[u8], slot_pos: usize, field: &'static str) -> Result<usize, TypeError> {
    let rel = read_i32_at(blob, slot_pos).field(field)?;
    relative(slot_pos, rel, field)
}

/// Like [`target`], but a zero offset means the value is absent.
fn pointer(blob: &[u8], slot_pos: usize, field: &'static str) -> Result<Option<usize>, TypeError> {
    match read_i32_at(blob, slot_pos).field(field)? {
        0 => Ok(None),
        rel => relative(slot_pos, rel, field).map(Some),
    }
}

fn relative(slot_pos: usize, rel: i32, field: &'static str) -> Result<usize, TypeError> {
    isize::try_from(rel)
        .ok()
        .and_then(|rel| slot_pos.checked_add_signed(rel))
        .ok_or(TypeError::Field {
            field,
            source: WireError::NegativeLength {
                offset: slot_pos,
                value: i64::from(rel),
            },
        })
}

fn signed_distance(from: usize, to: usize) -> i64 {
    let from = i64::try_from(from).unwrap_or(i64::MAX);
    let to = i64::try_from(to).unwrap_or(i64::MAX);
    to - from
}

/// A byte array whose first `i32` is its own total length.
fn sized_bytes<'a>(blob: &'a [u8], pos: usize, field: &'static str) -> Result<&'a [u8], TypeError> {
    let len = read_len_at(blob, pos).field(field)?;
    slice_at(blob, pos, len).field(field)
}

fn text_at(blob: &[u8], pos: usize, field: &'static str) -> Result<String, TypeError> {
    let units = read_len_at(blob, pos + TEXT_COUNT_OFFSET).field(field)?;
    let len = units.checked_mul(2).ok_or(TypeError::Field {
        field,
        source: WireError::UnexpectedEof {
            offset: pos + TEXT_DATA_OFFSET,
            needed: usize::MAX,
        },
    })?;
    let bytes = slice_at(blob, pos + TEXT_DATA_OFFSET, len).field(field)?;
    Ok(utf16le_lossy(bytes))
}

fn optional_text(blob: &[u8], slot_pos: usize, field: &'static str) -> Result<String, TypeError> {
    match pointer(blob, slot_pos, field)? {
        Some(pos) => text_at(blob, pos, field),
        None => Ok(String::new()),
    }
}

fn text_list(blob: &[u8], slot_pos: usize) -> Result<Vec<String>, TypeError> {
    const FIELD: &str = "tab state value E";

    let Some(array) = pointer(blob, slot_pos, FIELD)? else {
        return Ok(Vec::new());
    };
    let count = read_len_at(blob, array + ARRAY_COUNT_OFFSET).field(FIELD)?;

    // `count` is untrusted: grow as elements are read.
    let mut items = Vec::new();
    for i in 0..count {
        let element_slot = array + ARRAY_SLOT_SIZE * (i + 1);
        let item = match pointer(blob, element_slot, FIELD)? {
            Some(pos) => text_at(blob, pos, FIELD)?,
            None => String::new(),
        };
        items.push(item);
    }
    Ok(items)
}
