//! Data types for the grid engine.

mod axis;
mod cell;
mod data;
mod style;

pub use axis::*;
pub use cell::*;
pub use data::*;
pub use style::*;
