//! # Grid Search
//!
//! A* over an implicit grid, expanded on demand in the four cardinal
//! directions.
//!
//! The open list is a binary heap ordered by total cost, with ties going to
//! whichever node was discovered first. When a cheaper route to an open node
//! is found the node is updated in place and pushed again; the superseded
//! heap entry is skipped when it surfaces since its node is closed by then.

use crate::{
    config, Cell, Direction, Entity, GridNode, NodeArena, NodeId, PassabilityAgent, PathNode,
    PathObserver, PatherError, PatherResult, SearchPolicy,
};
use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Waypoints from the first step to the goal, origin excluded
    pub nodes: Vec<PathNode>,
    /// Nodes expanded without reaching the goal
    pub iterations: usize,
    /// Calls made to the passability agent
    pub passability_checks: usize,
}

/// Grid A* engine parameters.
///
/// # Examples
///
/// ```
/// use tickpath::{GridSearch, NoopObserver, OpenPassability, Point, QuickEntity, TargetPolicy};
///
/// let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
/// let target = Point::new(16.0, 112.0);
/// let outcome = GridSearch::new(32)
///     .find_path(&entity, &TargetPolicy::new(target), &OpenPassability, &mut NoopObserver)
///     .unwrap();
///
/// assert_eq!(outcome.nodes.len(), 3);
/// assert_eq!(outcome.nodes[2].pos, target);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSearch {
    cell_size: i32,
    iteration_limit: usize,
}

impl GridSearch {
    /// Creates a search over cells of `cell_size` with the default iteration limit.
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size,
            iteration_limit: config::ITERATION_LIMIT,
        }
    }

    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    /// Searches from the entity's current cell until `policy` is satisfied.
    ///
    /// The entity is assumed to be centred in its cell; callers validate that.
    /// Fails with [`PatherError::StartOutOfRange`] if the entity's cell has no
    /// `i32` coordinates. Neighbours past the coordinate range are never
    /// expanded.
    pub fn find_path(
        &self,
        entity: &dyn Entity,
        policy: &dyn SearchPolicy,
        passability: &dyn PassabilityAgent,
        observer: &mut dyn PathObserver,
    ) -> PatherResult<SearchOutcome> {
        let start_pos = entity.centre_pos();
        let Some(start_cell) = Cell::try_from_point(start_pos, self.cell_size) else {
            return Err(PatherError::StartOutOfRange {
                position: start_pos,
            });
        };
        let mut arena = NodeArena::new();
        let mut open = OpenList::default();

        let origin = arena.insert_open(GridNode::new(start_cell, self.cell_size));
        open.push(&arena, origin);

        let mut iterations = 0;
        let mut passability_checks = 0;

        loop {
            let Some(selected) = open.pop_lowest(&arena) else {
                return Err(PatherError::Unreachable {
                    target: policy.target(),
                });
            };
            arena.close(selected);

            #[cfg(feature = "visualisation")]
            observer.node_added_to_closed_list(arena.get(selected).pos);

            if policy.is_path_complete(entity, start_pos, arena.get(selected)) {
                return Ok(SearchOutcome {
                    nodes: reconstruct(&arena, selected, observer),
                    iterations,
                    passability_checks,
                });
            }

            let selected_cell = arena.get(selected).cell;
            for direction in Direction::cardinal() {
                let Some(cell) = selected_cell.step(direction) else {
                    continue;
                };
                let existing = arena.find(cell);
                if existing.is_some_and(|id| arena.is_closed(id)) {
                    continue;
                }

                let candidate = GridNode::new(cell, self.cell_size);
                passability_checks += 1;
                if !passability.is_passable(candidate.pos, entity) {
                    continue;
                }

                match existing {
                    Some(id) => {
                        // Cheaper to reach through the selected node?
                        let start_cost = policy
                            .calculate_start_cost(arena.get(id), Some(arena.get(selected)));
                        if start_cost < arena.get(id).start_cost {
                            let node = arena.get_mut(id);
                            node.parent = Some(selected);
                            node.start_cost = start_cost;
                            open.push(&arena, id);
                        }
                    }
                    None => {
                        let mut node = candidate;
                        node.parent = Some(selected);
                        node.start_cost =
                            policy.calculate_start_cost(&node, Some(arena.get(selected)));
                        node.target_cost = policy.calculate_target_cost(&node);

                        #[cfg(feature = "visualisation")]
                        observer.node_added_to_open_list(node.pos);

                        let id = arena.insert_open(node);
                        open.push(&arena, id);
                    }
                }
            }

            iterations += 1;
            if iterations >= self.iteration_limit {
                warn!(
                    target: "tickpath::gridpather",
                    "iteration limit ({}) reached", self.iteration_limit
                );
                return Err(PatherError::IterationLimit {
                    limit: self.iteration_limit,
                });
            }
        }
    }
}

/// Walks back from the goal, reporting each node, and drops the origin.
fn reconstruct(arena: &NodeArena, goal: NodeId, observer: &mut dyn PathObserver) -> Vec<PathNode> {
    let mut path: Vec<PathNode> = arena
        .lineage(goal)
        .map(|node| {
            #[cfg(feature = "visualisation")]
            observer.node_chosen(node.pos);
            node.to_path_node()
        })
        .collect();
    #[cfg(not(feature = "visualisation"))]
    let _ = observer;

    path.reverse();
    if !path.is_empty() {
        path.remove(0);
    }
    path
}

#[derive(Debug)]
struct OpenEntry {
    total_cost: f64,
    sequence: u64,
    node: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .total_cost
            .total_cmp(&self.total_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Default)]
struct OpenList {
    heap: BinaryHeap<OpenEntry>,
    next_sequence: u64,
}

impl OpenList {
    fn push(&mut self, arena: &NodeArena, node: NodeId) {
        self.heap.push(OpenEntry {
            total_cost: arena.get(node).total_cost(),
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
    }

    /// Pops the cheapest node still on the open list.
    fn pop_lowest(&mut self, arena: &NodeArena) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            if !arena.is_closed(entry.node) {
                return Some(entry.node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridPassability, NoopObserver, Point, QuickEntity, TargetPolicy};
    use std::cell::Cell as Counter;

    fn entity_at(cell: Cell) -> QuickEntity {
        QuickEntity::new(cell.centre(32), 100.0)
    }

    fn search(
        grid: &GridPassability,
        from: Cell,
        to: Cell,
        limit: usize,
    ) -> PatherResult<SearchOutcome> {
        GridSearch::new(32).with_iteration_limit(limit).find_path(
            &entity_at(from),
            &TargetPolicy::new(to.centre(32)),
            grid,
            &mut NoopObserver,
        )
    }

    fn assert_connected(from: Cell, nodes: &[PathNode]) {
        let mut previous = from;
        for node in nodes {
            assert_eq!(previous.manhattan_distance(node.cell), 1);
            previous = node.cell;
        }
    }

    #[test]
    fn test_open_grid_corner_to_corner() {
        let grid = GridPassability::new(5, 5, 32);
        let outcome = search(&grid, Cell::new(0, 0), Cell::new(4, 4), 1000).unwrap();

        assert_eq!(outcome.nodes.len(), 8);
        assert_connected(Cell::new(0, 0), &outcome.nodes);
        assert_eq!(outcome.nodes.last().map(|n| n.pos), Some(Point::new(144.0, 144.0)));
    }

    #[test]
    fn test_start_costs_grow_one_cell_per_step() {
        let grid = GridPassability::new(5, 1, 32);
        let outcome = search(&grid, Cell::new(0, 0), Cell::new(3, 0), 1000).unwrap();
        let costs: Vec<f64> = outcome.nodes.iter().map(|n| n.start_cost).collect();
        assert_eq!(costs, vec![32.0, 64.0, 96.0]);
    }

    #[test]
    fn test_detours_around_wall() {
        // Wall down column 2 with a gap at the bottom.
        let mut grid = GridPassability::new(5, 5, 32);
        for y in 0..4 {
            grid.block(Cell::new(2, y));
        }
        let outcome = search(&grid, Cell::new(0, 0), Cell::new(4, 0), 1000).unwrap();

        assert_eq!(outcome.nodes.len(), 12);
        assert_connected(Cell::new(0, 0), &outcome.nodes);
        assert!(outcome.nodes.iter().all(|n| grid.is_cell_open(n.cell)));
        assert!(outcome.nodes.iter().any(|n| n.cell == Cell::new(2, 4)));
    }

    #[test]
    fn test_enclosed_target_is_unreachable() {
        let mut grid = GridPassability::new(5, 5, 32);
        for cell in [Cell::new(3, 4), Cell::new(4, 3), Cell::new(3, 3)] {
            grid.block(cell);
        }
        let err = search(&grid, Cell::new(0, 0), Cell::new(4, 4), 1000).unwrap_err();
        assert!(matches!(err, PatherError::Unreachable { target } if target == Point::new(144.0, 144.0)));
    }

    #[test]
    fn test_iteration_limit() {
        let grid = GridPassability::new(11, 1, 32);
        let err = search(&grid, Cell::new(0, 0), Cell::new(10, 0), 3).unwrap_err();
        assert!(matches!(err, PatherError::IterationLimit { limit: 3 }));

        let outcome = search(&grid, Cell::new(0, 0), Cell::new(10, 0), 1000).unwrap();
        assert_eq!(outcome.iterations, 10);
    }

    #[test]
    fn test_start_on_target_gives_empty_path() {
        let grid = GridPassability::new(3, 3, 32);
        let outcome = search(&grid, Cell::new(1, 1), Cell::new(1, 1), 1000).unwrap();
        assert!(outcome.nodes.is_empty());
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.passability_checks, 0);
    }

    #[test]
    fn test_closed_cells_are_not_rechecked() {
        let calls = Counter::new(0);
        let passability = |pos: Point, _: &dyn Entity| {
            calls.set(calls.get() + 1);
            let cell = Cell::from_point(pos, 32);
            (0..3).contains(&cell.x) && cell.y == 0
        };
        let outcome = GridSearch::new(32)
            .find_path(
                &entity_at(Cell::new(0, 0)),
                &TargetPolicy::new(Cell::new(2, 0).centre(32)),
                &passability,
                &mut NoopObserver,
            )
            .unwrap();

        // Origin: N, S, E, W. Cell (1, 0): N, S, E (W is closed).
        assert_eq!(outcome.passability_checks, 7);
        assert_eq!(calls.get(), 7);
        assert_eq!(outcome.nodes.len(), 2);
    }

    #[test]
    fn test_zero_heuristic_still_finds_shortest_path() {
        struct Dijkstra(Point);

        impl SearchPolicy for Dijkstra {
            fn target(&self) -> Point {
                self.0
            }

            fn calculate_start_cost(&self, node: &GridNode, parent: Option<&GridNode>) -> f64 {
                parent.map_or(0.0, |p| p.start_cost + p.pos.distance_to(node.pos))
            }

            fn calculate_target_cost(&self, _node: &GridNode) -> f64 {
                0.0
            }

            fn is_path_complete(&self, _: &dyn Entity, _: Point, node: &GridNode) -> bool {
                node.pos.fuzzy_eq(self.0)
            }
        }

        let grid = GridPassability::new(6, 6, 32);
        let outcome = GridSearch::new(32)
            .find_path(
                &entity_at(Cell::new(1, 1)),
                &Dijkstra(Cell::new(4, 5).centre(32)),
                &grid,
                &mut NoopObserver,
            )
            .unwrap();
        assert_eq!(outcome.nodes.len(), 7);
        assert_connected(Cell::new(1, 1), &outcome.nodes);
    }

    /// Dijkstra over edges whose cost depends on the cell being left.
    struct ExitCost {
        target: Cell,
    }

    impl ExitCost {
        fn exit_cost(cell: Cell) -> f64 {
            match (cell.x, cell.y) {
                (0, 1) => 10.0,
                (1, 1) => 20.0,
                _ => 1.0,
            }
        }
    }

    impl SearchPolicy for ExitCost {
        fn target(&self) -> Point {
            self.target.centre(32)
        }

        fn calculate_start_cost(&self, _node: &GridNode, parent: Option<&GridNode>) -> f64 {
            parent.map_or(0.0, |p| p.start_cost + Self::exit_cost(p.cell))
        }

        fn calculate_target_cost(&self, _node: &GridNode) -> f64 {
            0.0
        }

        fn is_path_complete(&self, _: &dyn Entity, _: Point, node: &GridNode) -> bool {
            node.cell == self.target
        }
    }

    #[test]
    fn test_open_node_takes_cheaper_parent() {
        // 2x3 grid with (0, 2) blocked. Cell (1, 1) is first opened from
        // (0, 1) at cost 11, then reached from (1, 0) at cost 2.
        let mut grid = GridPassability::new(2, 3, 32);
        grid.block(Cell::new(0, 2));

        let outcome = GridSearch::new(32)
            .find_path(
                &entity_at(Cell::new(0, 0)),
                &ExitCost {
                    target: Cell::new(1, 2),
                },
                &grid,
                &mut NoopObserver,
            )
            .unwrap();

        let cells: Vec<Cell> = outcome.nodes.iter().map(|n| n.cell).collect();
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)]);
        let costs: Vec<f64> = outcome.nodes.iter().map(|n| n.start_cost).collect();
        assert_eq!(costs, vec![1.0, 2.0, 22.0]);

        // (0, 0), (0, 1), (1, 0) and (1, 1) are each expanded once; the
        // superseded cost 11 entry for (1, 1) is discarded.
        assert_eq!(outcome.iterations, 4);
    }

    #[test]
    fn test_superseded_heap_entries_are_skipped() {
        let mut arena = NodeArena::new();
        let mut open = OpenList::default();
        let first = arena.insert_open(GridNode::new(Cell::new(0, 0), 32));
        let second = arena.insert_open(GridNode::new(Cell::new(1, 0), 32));
        open.push(&arena, first);
        open.push(&arena, second);
        open.push(&arena, first);

        assert_eq!(open.pop_lowest(&arena), Some(first));
        arena.close(first);
        assert_eq!(open.pop_lowest(&arena), Some(second));
        arena.close(second);
        assert_eq!(open.pop_lowest(&arena), None);
    }

    #[cfg(feature = "visualisation")]
    #[test]
    fn test_observer_sees_search() {
        use crate::RecordingObserver;

        let grid = GridPassability::new(4, 1, 32);
        let mut observer = RecordingObserver::default();
        let outcome = GridSearch::new(32)
            .find_path(
                &entity_at(Cell::new(0, 0)),
                &TargetPolicy::new(Cell::new(3, 0).centre(32)),
                &grid,
                &mut observer,
            )
            .unwrap();

        assert_eq!(outcome.nodes.len(), 3);
        assert_eq!(observer.closed.first(), Some(&Point::new(16.0, 16.0)));
        assert_eq!(observer.closed.len(), 4);
        assert_eq!(observer.opened.len(), 3);
        // Reported goal first, origin included.
        assert_eq!(
            observer.chosen,
            vec![
                Point::new(112.0, 16.0),
                Point::new(80.0, 16.0),
                Point::new(48.0, 16.0),
                Point::new(16.0, 16.0),
            ]
        );
    }
}
