//! Layout engine for cell geometry, scrolling and hit testing.
//!
//! This module handles:
//! - Row/column sizes with sparse per-index overrides
//! - The scroll translation applied to content
//! - Mapping pointer positions back to cells

mod hit_test;
mod scroll;
mod size_model;

pub use hit_test::{CellHit, CellRect, HitTester};
pub use scroll::ScrollState;
pub use size_model::{AxisWalk, SizeModel};
