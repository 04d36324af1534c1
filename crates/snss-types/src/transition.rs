/// How the user arrived at a navigation entry: a page transition.
///
/// The low byte is the core cause; the high bits are qualifier flags that can
/// be combined with any cause.
///
/// ```text
///   31                 24 23                8 7              0
///   ┌────────────────────┬───────────────────┬───────────────┐
///   │ qualifier flags    │ (unused)          │ core cause    │
///   └────────────────────┴───────────────────┴───────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TransitionType(u32);

impl TransitionType {
    /// Mask selecting the core cause.
    pub const CORE_MASK: u32 = 0x0000_00FF;

    /// Mask selecting every qualifier flag.
    pub const QUALIFIER_MASK: u32 = 0xFF00_0000;

    /// Create a transition from the raw 32-bit value.
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the underlying 32-bit value.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The core cause in the low byte.
    #[must_use]
    pub fn core(self) -> CoreTransition {
        CoreTransition::from_raw(self.0.to_le_bytes()[0])
    }

    /// Returns `true` if `qualifier`'s bit is set.
    #[must_use]
    pub fn has(self, qualifier: Qualifier) -> bool {
        self.0 & qualifier.mask() != 0
    }

    /// The qualifier flags that are set, in ascending bit order.
    pub fn qualifiers(self) -> impl Iterator<Item = Qualifier> {
        Qualifier::ALL.into_iter().filter(move |q| self.has(*q))
    }
}

/// Core transition causes (the low byte of a [`TransitionType`]).
///
/// ```text
/// ┌──────┬────────────────┬─────────────────────────────────────────┐
/// │ Raw  │ Variant        │ Meaning                                 │
/// ├──────┼────────────────┼─────────────────────────────────────────┤
/// │ 0    │ Link           │ clicked a link                          │
/// │ 1    │ Typed          │ typed the URL                           │
/// │ 2    │ AutoBookmark   │ chose a suggestion such as a bookmark   │
/// │ 3    │ AutoSubframe   │ subframe navigation, automatic          │
/// │ 4    │ ManualSubframe │ subframe navigation, user requested     │
/// │ 5    │ Generated      │ chose a non-URL omnibox suggestion      │
/// │ 6    │ AutoToplevel   │ top-level load from the command line    │
/// │ 7    │ FormSubmit     │ submitted a form                        │
/// │ 8    │ Reload         │ reload, or restored from a session      │
/// │ 9    │ Keyword        │ omnibox keyword search                  │
/// │ *    │ Other          │ anything newer than this list           │
/// └──────┴────────────────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreTransition {
    Link,
    Typed,
    AutoBookmark,
    AutoSubframe,
    ManualSubframe,
    Generated,
    AutoToplevel,
    FormSubmit,
    Reload,
    Keyword,
    Other(u8),
}

impl CoreTransition {
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Link,
            1 => Self::Typed,
            2 => Self::AutoBookmark,
            3 => Self::AutoSubframe,
            4 => Self::ManualSubframe,
            5 => Self::Generated,
            6 => Self::AutoToplevel,
            7 => Self::FormSubmit,
            8 => Self::Reload,
            9 => Self::Keyword,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        match self {
            Self::Link => 0,
            Self::Typed => 1,
            Self::AutoBookmark => 2,
            Self::AutoSubframe => 3,
            Self::ManualSubframe => 4,
            Self::Generated => 5,
            Self::AutoToplevel => 6,
            Self::FormSubmit => 7,
            Self::Reload => 8,
            Self::Keyword => 9,
            Self::Other(raw) => raw,
        }
    }
}

/// Qualifier flags in the high byte of a [`TransitionType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// Forward or back button.
    ForwardBack,
    /// Navigated from the address bar.
    FromAddressBar,
    /// Home page.
    HomePage,
    /// First entry of a redirect chain.
    ChainStart,
    /// Last entry of a redirect chain.
    ChainEnd,
    /// Client-side redirect (script or meta refresh).
    ClientRedirect,
    /// Server-side redirect (HTTP 3xx).
    ServerRedirect,
}

impl Qualifier {
    /// Every qualifier, in ascending bit order.
    pub const ALL: [Self; 7] = [
        Self::ForwardBack,
        Self::FromAddressBar,
        Self::HomePage,
        Self::ChainStart,
        Self::ChainEnd,
        Self::ClientRedirect,
        Self::ServerRedirect,
    ];

    /// The bit this qualifier occupies.
    ///
    /// 0x0800_0000 is unassigned; chain start is 0x1000_0000.
    #[must_use]
    pub fn mask(self) -> u32 {
        match self {
            Self::ForwardBack => 0x0100_0000,
            Self::FromAddressBar => 0x0200_0000,
            Self::HomePage => 0x0400_0000,
            Self::ChainStart => 0x1000_0000,
            Self::ChainEnd => 0x2000_0000,
            Self::ClientRedirect => 0x4000_0000,
            Self::ServerRedirect => 0x8000_0000,
        }
    }
}
