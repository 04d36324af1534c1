/// Configuration for session rendering.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────┐
/// │ Field              │ Purpose                                      │
/// ├────────────────────┼──────────────────────────────────────────────┤
/// │ list_urls          │ Append the URLs: section to session output   │
/// │ hex_bytes_per_line │ Wrap hex dumps after this many bytes         │
/// └────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Indentation is fixed at two spaces per level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// List every navigation entry's URL after the session summary,
    /// indented by its back/forward index.
    pub list_urls: bool,

    /// Maximum bytes per hex line. `None` (or `Some(0)`) keeps every dump on
    /// a single line.
    pub hex_bytes_per_line: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            list_urls: true,
            hex_bytes_per_line: None,
        }
    }
}
