//! # Pathing Module
//!
//! Grid A* search, path caching and per-tick path following.
//!
//! A request flows through [`GridPather::move_entity_to`]: the cache is
//! checked first, and on a miss [`GridSearch`] explores the implicit grid one
//! cell at a time, asking a [`SearchPolicy`] how to score cells and when to
//! stop. The resulting [`GridPathData`] is tracked per entity and consumed one
//! waypoint per tick by [`GridPather::timer_updated`].

pub mod cache;
pub mod data;
pub mod node;
pub mod observer;
pub mod pather;
pub mod policy;
pub mod search;

pub use cache::*;
pub use data::*;
pub use node::*;
pub use observer::*;
pub use pather::*;
pub use policy::*;
pub use search::*;
