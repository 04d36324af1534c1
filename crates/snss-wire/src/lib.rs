#![warn(clippy::pedantic)]

pub mod align;
pub mod error;
pub mod frame;
pub mod header;
pub mod pickle;

pub use error::WireError;
pub use frame::{Frame, FrameReader};
pub use header::SnssHeader;
pub use pickle::PickleReader;
