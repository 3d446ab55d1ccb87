//! # Grid Pather
//!
//! Entry point of the engine: validates movement requests, runs or reuses
//! searches, and moves every tracked entity one waypoint at a time as the
//! simulation ticks.
//!
//! Each entity has at most one active path. Requesting a new path replaces
//! the old one, and an entity whose path has been walked to the end is
//! dropped from tracking on the following tick. Collaborators and the cell
//! size can only be changed while nothing is being tracked.

use crate::{
    config, is_cell_centred, Cell, Collaborator, Entity, EntityId, EntityStore, GameTimer,
    GridPathData, GridSearch, NoopObserver, PassabilityAgent, PathCache, PathObserver,
    PatherConfig, PatherError, PatherResult, Point, PolicyKind, SteeringAgent,
};
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::time::Duration;

const LOG_TARGET: &str = "tickpath::gridpather";

fn missing_collaborator(collaborator: Collaborator) -> PatherError {
    warn!(target: LOG_TARGET, "no {} set", collaborator);
    PatherError::MissingCollaborator(collaborator)
}

/// Moves entities over an implicit grid.
///
/// # Examples
///
/// ```
/// use tickpath::{DirectSteeringAgent, GameTimer, GridPassability, GridPather, Point, QuickEntity};
///
/// let mut pather = GridPather::new();
/// pather.set_timer(Some(GameTimer::new())).unwrap();
/// pather.set_passability_agent(Some(Box::new(GridPassability::new(5, 5, 32)))).unwrap();
/// pather.set_steering_agent(Some(Box::new(DirectSteeringAgent))).unwrap();
///
/// let entity = QuickEntity::new(Point::new(16.0, 16.0), 100.0);
/// assert!(pather.move_entity_to(&entity, Point::new(144.0, 144.0)));
/// assert_eq!(pather.path_data(entity.id).nodes().len(), 8);
///
/// // Outside the grid.
/// assert!(!pather.move_entity_to(&entity, Point::new(176.0, 16.0)));
/// ```
pub struct GridPather {
    cell_size: i32,
    iteration_limit: usize,
    timer: Option<GameTimer>,
    passability_agent: Option<Box<dyn PassabilityAgent>>,
    steering_agent: Option<Box<dyn SteeringAgent>>,
    path_cache: Option<PathCache>,
    policy: PolicyKind,
    observer: Option<Box<dyn PathObserver>>,
    data: HashMap<EntityId, GridPathData>,
}

impl GridPather {
    /// Creates a pather with the default cell size, an empty cache and no
    /// collaborators bound.
    pub fn new() -> Self {
        Self {
            cell_size: config::DEFAULT_CELL_SIZE,
            iteration_limit: config::ITERATION_LIMIT,
            timer: None,
            passability_agent: None,
            steering_agent: None,
            path_cache: Some(PathCache::new()),
            policy: PolicyKind::default(),
            observer: None,
            data: HashMap::new(),
        }
    }

    /// Creates a pather from `config`, with a stopped timer already bound.
    pub fn with_config(config: &PatherConfig) -> PatherResult<Self> {
        config.validate()?;
        let mut timer = GameTimer::with_fps(config.tick_rate);
        timer.set_time_speed_multiplier(config.time_speed_multiplier);

        let mut pather = Self::new();
        pather.cell_size = config.cell_size;
        pather.timer = Some(timer);
        Ok(pather)
    }

    /// Finds a path for `entity` to `target` and starts moving it.
    ///
    /// Returns false if the pather isn't fully set up, the entity can't start
    /// from where it is, or no path was found. Any existing movement for the
    /// entity is only replaced when a path is found.
    pub fn move_entity_to(&mut self, entity: &dyn Entity, target: Point) -> bool {
        self.try_move_entity_to(entity, target).is_ok()
    }

    /// Like [`GridPather::move_entity_to`], reporting why a request failed.
    pub fn try_move_entity_to(&mut self, entity: &dyn Entity, target: Point) -> PatherResult<()> {
        if self.timer.is_none() {
            return Err(missing_collaborator(Collaborator::Timer));
        }
        let Some(passability) = self.passability_agent.as_deref() else {
            return Err(missing_collaborator(Collaborator::PassabilityAgent));
        };
        if self.steering_agent.is_none() {
            return Err(missing_collaborator(Collaborator::SteeringAgent));
        }

        let start_pos = entity.centre_pos();
        if !passability.is_passable(start_pos, entity) {
            debug!(
                target: LOG_TARGET,
                "starting position {} isn't passable for {}", start_pos, entity.id()
            );
            return Err(PatherError::StartNotPassable {
                position: start_pos,
            });
        }

        if !is_cell_centred(start_pos, self.cell_size) {
            warn!(
                target: LOG_TARGET,
                "currently incapable of dealing with non-cell-centred positions \
                 (the start position {} does not result in the entity {} being centred in a cell)",
                start_pos,
                entity.id()
            );
            return Err(PatherError::StartNotCellCentred {
                position: start_pos,
                cell_size: self.cell_size,
            });
        }

        if Cell::try_from_point(start_pos, self.cell_size).is_none() {
            warn!(
                target: LOG_TARGET,
                "start position {} of {} is outside the grid's range", start_pos, entity.id()
            );
            return Err(PatherError::StartOutOfRange {
                position: start_pos,
            });
        }

        debug!(target: LOG_TARGET, "looking for path to target pos {}", target);
        if let Some(cached) = self
            .path_cache
            .as_ref()
            .and_then(|cache| cache.get(entity, target, self.cell_size))
        {
            debug!(
                target: LOG_TARGET,
                "found cached path for {} to target pos {}", entity.id(), target
            );
            self.add_entity(entity.id(), cached);
            return Ok(());
        }

        let policy = self.policy.build(target, self.cell_size);
        let mut noop = NoopObserver;
        let observer: &mut dyn PathObserver = match self.observer.as_deref_mut() {
            Some(observer) => observer,
            None => &mut noop,
        };
        let outcome = GridSearch::new(self.cell_size)
            .with_iteration_limit(self.iteration_limit)
            .find_path(entity, policy.as_ref(), passability, observer)
            .map_err(|err| {
                if let PatherError::Unreachable { .. } = err {
                    debug!(
                        target: LOG_TARGET,
                        "impossible for {} to reach target pos {}", entity.id(), target
                    );
                }
                err
            })?;

        debug!(
            target: LOG_TARGET,
            "successfully found path ({} nodes) for {} to target pos {} after {} passability checks",
            outcome.nodes.len(),
            entity.id(),
            target,
            outcome.passability_checks
        );

        let path_data = GridPathData::new(target, outcome.nodes);
        if let Some(cache) = self.path_cache.as_mut() {
            cache.add_cached_data(entity, target, self.cell_size, &path_data);
        }
        self.add_entity(entity.id(), path_data);
        Ok(())
    }

    fn add_entity(&mut self, id: EntityId, path_data: GridPathData) {
        self.data.insert(id, path_data);
    }

    /// Stops moving the entity. Does nothing if it isn't being moved.
    pub fn cancel_entity_movement(&mut self, id: EntityId) {
        if self.data.remove(&id).is_some() {
            debug!(target: LOG_TARGET, "cancelled movement of {}", id);
        }
    }

    /// Forgets an entity that no longer exists.
    pub fn entity_destroyed(&mut self, id: EntityId) {
        self.cancel_entity_movement(id);
    }

    /// Returns a copy of the entity's active path, invalid if it has none.
    pub fn path_data(&self, id: EntityId) -> GridPathData {
        self.data.get(&id).cloned().unwrap_or_default()
    }

    pub fn is_tracking(&self, id: EntityId) -> bool {
        self.data.contains_key(&id)
    }

    /// Returns true while any entity is being moved.
    pub fn is_active(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn tracked_count(&self) -> usize {
        self.data.len()
    }

    pub fn tracked_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.data.keys().copied()
    }

    /// Advances every tracked entity by one tick of `delta` seconds.
    ///
    /// Each entity is steered towards its current waypoint and moves on to the
    /// next one when steering reports arrival. Entities whose path is complete
    /// or that are no longer in `entities` stop being tracked.
    pub fn timer_updated<S>(&mut self, entities: &mut S, delta: f64)
    where
        S: EntityStore + ?Sized,
    {
        let Some(steering) = self.steering_agent.as_deref_mut() else {
            return;
        };

        self.data.retain(|id, path_data| {
            let Some(node) = path_data.current_node().copied() else {
                trace!(target: LOG_TARGET, "{} finished its path", id);
                return false;
            };
            let Some(entity) = entities.entity_mut(*id) else {
                debug!(target: LOG_TARGET, "{} no longer exists", id);
                return false;
            };

            if steering.steer_to(entity, node.pos, delta) {
                path_data.advance();
                trace!(
                    target: LOG_TARGET,
                    "{} reached {}, now at node {:?}", id, node.pos, path_data.current_node_index()
                );
            }
            true
        });
    }

    /// Feeds `elapsed` wall time to the bound timer, updating entities once
    /// per tick it emits. Returns the number of ticks.
    pub fn advance<S>(&mut self, entities: &mut S, elapsed: Duration) -> usize
    where
        S: EntityStore + ?Sized,
    {
        let Some(mut timer) = self.timer.take() else {
            return 0;
        };
        let ticks = timer.advance(elapsed, |delta| self.timer_updated(&mut *entities, delta));
        self.timer = Some(timer);
        ticks
    }

    fn reject_while_active(&self, operation: &'static str) -> PatherResult<()> {
        if self.is_active() {
            warn!(target: LOG_TARGET, "cannot {} while pathing active", operation);
            return Err(PatherError::PathingActive { operation });
        }
        Ok(())
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Changes the grid spacing. Cached paths are discarded.
    pub fn set_cell_size(&mut self, cell_size: i32) -> PatherResult<()> {
        self.reject_while_active("set cell size")?;
        if cell_size <= 0 {
            warn!(target: LOG_TARGET, "invalid cell size {}", cell_size);
            return Err(PatherError::InvalidCellSize(cell_size));
        }
        if cell_size == self.cell_size {
            return Ok(());
        }

        self.cell_size = cell_size;
        if let Some(cache) = self.path_cache.as_mut() {
            cache.clear();
        }
        Ok(())
    }

    pub fn timer(&self) -> Option<&GameTimer> {
        self.timer.as_ref()
    }

    pub fn timer_mut(&mut self) -> Option<&mut GameTimer> {
        self.timer.as_mut()
    }

    pub fn set_timer(&mut self, timer: Option<GameTimer>) -> PatherResult<()> {
        self.reject_while_active("set timer")?;
        self.timer = timer;
        Ok(())
    }

    pub fn passability_agent(&self) -> Option<&dyn PassabilityAgent> {
        self.passability_agent.as_deref()
    }

    pub fn set_passability_agent(
        &mut self,
        agent: Option<Box<dyn PassabilityAgent>>,
    ) -> PatherResult<()> {
        self.reject_while_active("set passability agent")?;
        self.passability_agent = agent;
        Ok(())
    }

    pub fn steering_agent(&self) -> Option<&dyn SteeringAgent> {
        self.steering_agent.as_deref()
    }

    pub fn set_steering_agent(&mut self, agent: Option<Box<dyn SteeringAgent>>) -> PatherResult<()> {
        self.reject_while_active("set steering agent")?;
        self.steering_agent = agent;
        Ok(())
    }

    pub fn search_policy(&self) -> PolicyKind {
        self.policy
    }

    /// Chooses how future searches decide they have arrived.
    pub fn set_search_policy(&mut self, policy: PolicyKind) -> PatherResult<()> {
        self.reject_while_active("set search policy")?;
        if policy != self.policy {
            self.policy = policy;
            if let Some(cache) = self.path_cache.as_mut() {
                cache.clear();
            }
        }
        Ok(())
    }

    pub fn path_cache(&self) -> Option<&PathCache> {
        self.path_cache.as_ref()
    }

    pub fn path_cache_mut(&mut self) -> Option<&mut PathCache> {
        self.path_cache.as_mut()
    }

    /// Replaces the cache. None disables caching.
    pub fn set_path_cache(&mut self, cache: Option<PathCache>) {
        self.path_cache = cache;
    }

    /// Registers callbacks for search progress. None removes them.
    pub fn set_observer(&mut self, observer: Option<Box<dyn PathObserver>>) {
        self.observer = observer;
    }
}

impl Default for GridPather {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GridPather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridPather")
            .field("cell_size", &self.cell_size)
            .field("timer", &self.timer)
            .field("has_passability_agent", &self.passability_agent.is_some())
            .field("has_steering_agent", &self.steering_agent.is_some())
            .field("policy", &self.policy)
            .field("cached_paths", &self.path_cache.as_ref().map(PathCache::len))
            .field("tracked", &self.data.len())
            .finish()
    }
}
