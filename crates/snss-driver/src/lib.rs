#![warn(clippy::pedantic)]

pub mod config;
pub mod describe;
pub mod error;
pub mod hex;
pub mod render_text;
pub mod renderer;

pub use config::RenderConfig;
pub use error::RenderError;
pub use render_text::TextRenderer;
pub use renderer::SessionRenderer;
