//! # Agents Module
//!
//! Capabilities the pather is given rather than owns: deciding where an
//! entity may stand, and moving it towards a single point.
//!
//! Both are traits so games can plug in their own terrain rules and motion
//! integration (instant snapping, physics bodies, animation systems).

pub mod passability;
pub mod steering;

pub use passability::*;
pub use steering::*;
