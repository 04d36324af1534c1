use snss_types::{Command, Session};

use crate::error::RenderError;

/// Renders decoded sessions into human-readable text.
///
/// Implementations are stateless apart from their configuration: rendering
/// the same session twice produces the same string.
///
/// ```text
/// Session ──▶ render_session()      ──▶ summary + URL listing
///    │
///    └─ commands[i] ──▶ render_command() ──▶ field dump / hex dump
///                   └─▶ command_label()  ──▶ "[i] Id: tag"
/// ```
pub trait SessionRenderer {
    /// Render the session summary: source, version, command count, and
    /// (when enabled) the URL listing.
    fn render_session(&self, session: &Session) -> String;

    /// Render one command in full.
    fn render_command(&self, command: &Command) -> String;

    /// Short label used when enumerating commands.
    fn command_label(&self, index: usize, command: &Command) -> String {
        format!("[{index}] Id: {}", command.kind.wire_id())
    }

    /// Render the command at `index`.
    ///
    /// # Errors
    ///
    /// [`RenderError::CommandOutOfRange`] if the session has no such command.
    fn render_command_at(&self, session: &Session, index: usize) -> Result<String, RenderError> {
        session
            .commands
            .get(index)
            .map(|command| self.render_command(command))
            .ok_or(RenderError::CommandOutOfRange {
                index,
                count: session.commands.len(),
            })
    }

    /// One label per line for every command in the session.
    fn render_command_list(&self, session: &Session) -> String {
        let mut out = String::new();
        for (index, command) in session.commands.iter().enumerate() {
            out.push_str(&self.command_label(index, command));
            out.push('\n');
        }
        out
    }
}
