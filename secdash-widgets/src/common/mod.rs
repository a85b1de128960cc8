pub mod colors;
pub mod formatting;

pub use colors::*;
pub use formatting::*;
