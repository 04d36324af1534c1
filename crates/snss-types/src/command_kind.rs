/// Command kind tags, as the first byte of every frame payload.
///
/// Only the navigation tags are interpreted; every other tag is kept as an
/// opaque payload under `Other(id)`.
///
/// ```text
/// ┌──────┬─────────────────────┬──────────────────────────────────────┐
/// │ Wire │ Variant             │ Appears in                           │
/// ├──────┼─────────────────────┼──────────────────────────────────────┤
/// │ 0x01 │ TabNavigation       │ "Tabs" files (tab restore service)   │
/// │ 0x06 │ UpdateTabNavigation │ "Session" files (session service)    │
/// │ *    │ Other               │ window, selection, pinning, ...      │
/// └──────┴─────────────────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    TabNavigation,
    UpdateTabNavigation,
    /// Any tag without a typed decoder. The raw byte is preserved.
    Other(u8),
}

pub mod command_id {
    pub const TAB_NAVIGATION: u8 = 0x01;
    pub const UPDATE_TAB_NAVIGATION: u8 = 0x06;
}

impl CommandKind {
    /// Return the wire tag for this kind.
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::TabNavigation => command_id::TAB_NAVIGATION,
            Self::UpdateTabNavigation => command_id::UPDATE_TAB_NAVIGATION,
            Self::Other(id) => id,
        }
    }

    /// Parse a wire tag into a [`CommandKind`].
    #[must_use]
    pub fn from_wire_id(id: u8) -> Self {
        match id {
            command_id::TAB_NAVIGATION => Self::TabNavigation,
            command_id::UPDATE_TAB_NAVIGATION => Self::UpdateTabNavigation,
            other => Self::Other(other),
        }
    }

    /// `true` for the tags whose body is a navigation entry.
    #[must_use]
    pub fn is_navigation(self) -> bool {
        matches!(self, Self::TabNavigation | Self::UpdateTabNavigation)
    }
}
