//! # Utilities Module
//!
//! Geometry helpers shared by steering and the grid search.

pub mod grid;
pub mod math;

pub use grid::*;
pub use math::*;
