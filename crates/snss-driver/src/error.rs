/// Errors that can occur while rendering.
///
/// Rendering a decoded session into a `String` cannot fail on its own; the
/// only error is asking for something the session does not have.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("command index {index} out of range (session has {count} commands)")]
    CommandOutOfRange { index: usize, count: usize },
}
