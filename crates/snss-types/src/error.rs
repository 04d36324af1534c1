use snss_wire::WireError;

/// Errors that can occur while decoding a command body.
///
/// These sit above [`WireError`]: the wire layer knows a read ran off the
/// end of a buffer, this layer knows which field it was reading at the time.
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                              │
/// │   ├── Field: WireError + the field being read       │
/// │   ├── EmptyCommand for a frame with no kind tag     │
/// │   └── StalledRecord for a tab-state cursor that     │
/// │       does not move forward                         │
/// └─────────────────────────────────────────────────────┘
/// ```
///
/// All offsets are relative to the buffer being decoded (the command body for
/// navigation fields, the state blob for tab-state fields).
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// A read for a named field failed at the wire level.
  #[error("invalid {field}")]
  Field {
    field: &'static str,
    #[source]
    source: WireError,
  },

  /// The frame was zero bytes long, so there is no kind tag to classify.
  #[error("empty command frame has no kind tag")]
  EmptyCommand,

  /// A structured tab-state record computed a next-record offset that is not
  /// past its own start.
  #[error("tab-state record at offset {offset} does not advance (next record at {next})")]
  StalledRecord { offset: usize, next: usize },
}

/// Attach a field name to a wire-level result.
pub(crate) trait FieldContext<T> {
  fn field(self, field: &'static str) -> Result<T, TypeError>;
}

impl<T> FieldContext<T> for Result<T, WireError> {
  fn field(self, field: &'static str) -> Result<T, TypeError> {
    self.map_err(|source| TypeError::Field { field, source })
  }
}
