//! # Grid Nodes
//!
//! Explored cells and the arena that owns them during one search.
//!
//! Nodes refer to their predecessor by [`NodeId`], a stable index into the
//! arena, so a path's lineage can be walked without shared ownership. Open
//! and closed membership is keyed by cell, so lookups don't scan lists.

use crate::{Cell, PathNode, Point};
use std::collections::HashMap;

/// Stable handle to a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One explored grid cell.
///
/// Two nodes describe the same cell when their positions are equal; the
/// arena enforces a single node per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode {
    pub pos: Point,
    pub cell: Cell,
    pub start_cost: f64,
    pub target_cost: f64,
    /// Predecessor on the cheapest known route, None for the origin.
    pub parent: Option<NodeId>,
}

impl GridNode {
    /// Creates an unscored node with no parent.
    pub fn new(cell: Cell, cell_size: i32) -> Self {
        Self {
            pos: cell.centre(cell_size),
            cell,
            start_cost: 0.0,
            target_cost: 0.0,
            parent: None,
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.start_cost + self.target_cost
    }

    /// Copies the node out of the search as a waypoint.
    pub fn to_path_node(&self) -> PathNode {
        PathNode {
            pos: self.pos,
            cell: self.cell,
            start_cost: self.start_cost,
            target_cost: self.target_cost,
        }
    }
}

/// Which search list a node is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeList {
    Open,
    Closed,
}

/// Owns every node created by a search.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<GridNode>,
    lists: Vec<NodeList>,
    by_cell: HashMap<Cell, NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` to the open list.
    ///
    /// The caller must ensure the cell isn't already in the arena.
    pub fn insert_open(&mut self, node: GridNode) -> NodeId {
        debug_assert!(!self.by_cell.contains_key(&node.cell));
        let id = NodeId(self.nodes.len());
        self.by_cell.insert(node.cell, id);
        self.nodes.push(node);
        self.lists.push(NodeList::Open);
        id
    }

    pub fn get(&self, id: NodeId) -> &GridNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut GridNode {
        &mut self.nodes[id.0]
    }

    /// Finds the node for `cell`, if one has been created.
    pub fn find(&self, cell: Cell) -> Option<NodeId> {
        self.by_cell.get(&cell).copied()
    }

    /// Returns the list `cell` is on, or None if it hasn't been discovered.
    pub fn list_of(&self, cell: Cell) -> Option<NodeList> {
        self.find(cell).map(|id| self.lists[id.0])
    }

    pub fn is_closed(&self, id: NodeId) -> bool {
        self.lists[id.0] == NodeList::Closed
    }

    /// Moves a node to the closed list.
    pub fn close(&mut self, id: NodeId) {
        self.lists[id.0] = NodeList::Closed;
    }

    /// Walks from `id` back to the origin, `id` first.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = &GridNode> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| {
            node.parent.map(|parent| self.get(parent))
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
