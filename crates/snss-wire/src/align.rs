//! The single shared alignment arithmetic for SNSS fields.
//!
//! Two rules live here and nowhere else:
//!
//! ```text
//! Pickle fields (4-byte rule)
//!   ┌──────────────┬─────────────────────┬─────────┐
//!   │ length (4 B) │ payload (len bytes) │ padding │
//!   └──────────────┴─────────────────────┴─────────┘
//!   start          start + 4                        start + 4 + round_up(len, 4)
//!
//! Structured tab-state records (8-byte rule)
//!   next record = align_up(end_of_last_field, 8)
//! ```
//!
//! Every variable-length read in the workspace goes through these helpers.

/// Size of the little-endian length prefix in front of every pickle field.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Alignment of pickle fields.
pub const PICKLE_ALIGNMENT: usize = 4;

/// Alignment of structured tab-state sub-records.
pub const RECORD_ALIGNMENT: usize = 8;

/// Round `value` up to the next multiple of `alignment`.
///
/// Returns `None` on overflow. `alignment` must be a power of two.
#[must_use]
pub fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    value.checked_add(mask).map(|v| v & !mask)
}

/// Offset of the field that follows a length-prefixed pickle field.
///
/// `start` is the offset of the 4-byte length prefix and `declared_len` the
/// payload size in bytes (already doubled for UTF-16 fields). The result is
/// `start + 4 + round_up(declared_len, 4)`.
///
/// Returns `None` on overflow.
#[must_use]
pub fn padded_field_end(start: usize, declared_len: usize) -> Option<usize> {
    let payload = align_up(declared_len, PICKLE_ALIGNMENT)?;
    start.checked_add(LENGTH_PREFIX_SIZE)?.checked_add(payload)
}
