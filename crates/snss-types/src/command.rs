use crate::command_kind::CommandKind;
use crate::error::TypeError;
use crate::navigation::NavigationEntry;

/// A decoded session command: the kind tag plus its typed content.
///
/// This sits between the wire layer (a `Frame` from `snss-wire`) and the
/// renderers. The decoder reads a frame, splits off the first payload byte as
/// the kind tag, then dispatches the remaining body to
/// [`CommandContent::decode_body`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
  pub kind: CommandKind,
  pub content: CommandContent,
}

/// The typed content of a command.
///
/// ```text
/// ┌──────────────┬────────────────────────────┐
/// │ Variant      │ Kind tag                   │
/// ├──────────────┼────────────────────────────┤
/// │ Navigation   │ 0x01, 0x06                 │
/// │ Raw          │ any other byte             │
/// └──────────────┴────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandContent {
  Navigation(NavigationEntry),
  /// The body bytes (payload after the tag) of an uninterpreted command.
  Raw(Vec<u8>),
}

impl Command {
  /// Classify a frame payload and decode its body.
  ///
  /// # Errors
  ///
  /// - [`TypeError::EmptyCommand`] for a zero-length payload.
  /// - Any error from [`NavigationEntry::decode_body`] for navigation kinds.
  pub fn decode(payload: &[u8]) -> Result<Self, TypeError> {
    let (&tag, body) = payload.split_first().ok_or(TypeError::EmptyCommand)?;
    let kind = CommandKind::from_wire_id(tag);
    let content = CommandContent::decode_body(kind, body)?;
    Ok(Self { kind, content })
  }

  /// The navigation entry, if this is a navigation command.
  #[must_use]
  pub fn navigation(&self) -> Option<&NavigationEntry> {
    match &self.content {
      CommandContent::Navigation(entry) => Some(entry),
      CommandContent::Raw(_) => None,
    }
  }
}

impl CommandContent {
  /// Decode typed content from a body, dispatching on command kind.
  ///
  /// # Errors
  ///
  /// Navigation bodies propagate [`NavigationEntry::decode_body`] errors.
  /// Raw bodies never fail.
  pub fn decode_body(kind: CommandKind, body: &[u8]) -> Result<Self, TypeError> {
    match kind {
      CommandKind::TabNavigation | CommandKind::UpdateTabNavigation => {
        Ok(Self::Navigation(NavigationEntry::decode_body(body)?))
      }
      CommandKind::Other(_) => Ok(Self::Raw(body.to_vec())),
    }
  }
}
