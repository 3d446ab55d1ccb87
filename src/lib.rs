//! # Tickpath
//!
//! Real-time grid pathfinding for 2D games.
//!
//! ## Architecture Overview
//!
//! Entities live in continuous world space but path over an implicit uniform
//! grid derived from a cell size. No grid structure is ever built: cells are
//! discovered on demand while searching and their passability is asked of a
//! [`PassabilityAgent`].
//!
//! - **Game**: points, cells, directions, entities and the fixed-step timer
//! - **Agents**: the passability and steering capabilities the engine is given
//! - **Pathing**: the A* search, its scoring policies, the path cache and the
//!   [`GridPather`] that tracks entities and moves them once per tick
//!
//! ```
//! use std::collections::HashMap;
//! use tickpath::{
//!     DirectSteeringAgent, GameTimer, GridPather, OpenPassability, Point, QuickEntity,
//! };
//!
//! let mut pather = GridPather::new();
//! pather.set_timer(Some(GameTimer::new())).unwrap();
//! pather.set_passability_agent(Some(Box::new(OpenPassability))).unwrap();
//! pather.set_steering_agent(Some(Box::new(DirectSteeringAgent))).unwrap();
//!
//! let entity = QuickEntity::new(Point::new(16.0, 16.0), 3200.0);
//! let id = entity.id;
//! assert!(pather.move_entity_to(&entity, Point::new(80.0, 16.0)));
//! assert_eq!(pather.path_data(id).nodes().len(), 2);
//!
//! let mut entities = HashMap::from([(id, entity)]);
//! for _ in 0..3 {
//!     pather.timer_updated(&mut entities, 0.01);
//! }
//! assert!(!pather.is_tracking(id));
//! assert_eq!(entities[&id].centre_pos, Point::new(80.0, 16.0));
//! ```

pub mod agents;
pub mod game;
pub mod pathing;
pub mod utils;

pub use agents::*;
pub use game::*;
pub use pathing::*;
pub use utils::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Collaborators that must be bound before a path can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Timer,
    PassabilityAgent,
    SteeringAgent,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::Timer => "timer",
            Collaborator::PassabilityAgent => "passability agent",
            Collaborator::SteeringAgent => "steering agent",
        };
        f.write_str(name)
    }
}

/// Broad classes of [`PatherError`], telling callers what to do about one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Setup is incomplete; fix the pather before calling again.
    Configuration,
    /// The request can't be served right now; retry later.
    Validation,
    /// The search ran and gave up.
    SearchExhausted,
    /// The call was ignored and nothing changed.
    InvalidOperation,
    /// Reading configuration failed.
    Io,
}

/// Core error type for the Tickpath engine.
#[derive(thiserror::Error, Debug)]
pub enum PatherError {
    /// A required collaborator was never bound
    #[error("no {0} set")]
    MissingCollaborator(Collaborator),

    /// The entity is standing somewhere it may not be
    #[error("starting position {position} isn't passable")]
    StartNotPassable { position: Point },

    /// The entity isn't sitting in the centre of a cell
    #[error("start position {position} is not centred in a cell of size {cell_size}")]
    StartNotCellCentred { position: Point, cell_size: i32 },

    /// The entity's cell can't be represented on the grid
    #[error("start position {position} is outside the grid's range")]
    StartOutOfRange { position: Point },

    /// The search gave up before reaching the target
    #[error("iteration limit ({limit}) reached")]
    IterationLimit { limit: usize },

    /// Every reachable cell was explored without reaching the target
    #[error("impossible to reach target pos {target}")]
    Unreachable { target: Point },

    /// The operation can't happen while entities are being moved
    #[error("cannot {operation} while pathing active")]
    PathingActive { operation: &'static str },

    /// Cell sizes must be positive
    #[error("invalid cell size {0}")]
    InvalidCellSize(i32),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PatherError {
    /// Returns the class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatherError::MissingCollaborator(_) => ErrorCategory::Configuration,
            PatherError::StartNotPassable { .. }
            | PatherError::StartNotCellCentred { .. }
            | PatherError::StartOutOfRange { .. } => ErrorCategory::Validation,
            PatherError::IterationLimit { .. } | PatherError::Unreachable { .. } => {
                ErrorCategory::SearchExhausted
            }
            PatherError::PathingActive { .. } | PatherError::InvalidCellSize(_) => {
                ErrorCategory::InvalidOperation
            }
            PatherError::Io(_) | PatherError::Serde(_) => ErrorCategory::Io,
        }
    }
}

/// Result type used throughout the Tickpath codebase.
pub type PatherResult<T> = Result<T, PatherError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default grid spacing in world units
    pub const DEFAULT_CELL_SIZE: i32 = 32;

    /// Maximum number of nodes a single search may expand
    pub const ITERATION_LIMIT: usize = 1000;

    /// Fixed simulation updates per second
    pub const DEFAULT_TICK_RATE: u32 = 100;

    /// Distance within which steering counts a waypoint as reached
    pub const ARRIVAL_LENIENCE: f64 = 0.5;
}

/// Runtime configuration for a [`GridPather`].
///
/// # Examples
///
/// ```
/// use tickpath::PatherConfig;
///
/// let config = PatherConfig::from_json_str(r#"{ "cell_size": 16 }"#).unwrap();
/// assert_eq!(config.cell_size, 16);
/// assert_eq!(config.tick_rate, tickpath::config::DEFAULT_TICK_RATE);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatherConfig {
    /// Grid spacing in world units
    pub cell_size: i32,
    /// Fixed updates per second emitted by the timer
    pub tick_rate: u32,
    /// Scale applied to simulated time
    pub time_speed_multiplier: f64,
}

impl PatherConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> PatherResult<Self> {
        let config: PatherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PatherResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that the values can drive a pather.
    pub fn validate(&self) -> PatherResult<()> {
        if self.cell_size <= 0 {
            return Err(PatherError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }
}

impl Default for PatherConfig {
    fn default() -> Self {
        Self {
            cell_size: config::DEFAULT_CELL_SIZE,
            tick_rate: config::DEFAULT_TICK_RATE,
            time_speed_multiplier: 1.0,
        }
    }
}
