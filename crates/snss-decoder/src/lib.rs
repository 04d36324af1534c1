#![warn(clippy::pedantic)]

pub mod error;
pub mod decoder;
pub mod stream;

pub use decoder::SnssDecoder;
pub use error::DecodeError;
pub use stream::CommandStream;
