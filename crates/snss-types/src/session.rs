use crate::command::Command;
use crate::navigation::NavigationEntry;

/// A decoded session file.
///
/// `version` is 0 for anything that is not a recognized SNSS file; such a
/// session always has no commands. `source` is the label the caller gave the
/// input (normally its path) and is carried through for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
  pub source: String,
  pub version: i32,
  pub commands: Vec<Command>,
}

impl Session {
  /// A session for input that is not an SNSS file.
  #[must_use]
  pub fn unrecognized(source: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      version: 0,
      commands: Vec::new(),
    }
  }

  /// Returns `true` if the input had the SNSS magic and a non-zero version.
  #[must_use]
  pub fn is_recognized(&self) -> bool {
    self.version != 0
  }

  /// Navigation entries in command order, skipping other commands.
  pub fn navigation_entries(&self) -> impl Iterator<Item = &NavigationEntry> {
    self.commands.iter().filter_map(Command::navigation)
  }
}
