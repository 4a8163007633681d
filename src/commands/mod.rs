//! Command implementations for the homescout CLI

mod find;
mod misc;
mod research;

pub use find::*;
pub use misc::*;
pub use research::*;
