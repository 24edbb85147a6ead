//! Domain models for Spores & Outdoors

mod advisory;
mod score;
mod weather;

pub use advisory::*;
pub use score::*;
pub use weather::*;
