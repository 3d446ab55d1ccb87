//! # Search Instrumentation
//!
//! Optional callbacks fired as a search progresses, for debug overlays.
//! They observe only; nothing they do can change the search result. Calls
//! are compiled in only with the `visualisation` feature.

use crate::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives the cell centres a search touches.
pub trait PathObserver {
    /// A cell was discovered and put on the open list.
    fn node_added_to_open_list(&mut self, _centre_pos: Point) {}

    /// A cell was selected for expansion.
    fn node_added_to_closed_list(&mut self, _centre_pos: Point) {}

    /// A cell is part of the final path, reported from the target back to
    /// the origin.
    fn node_chosen(&mut self, _centre_pos: Point) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PathObserver for NoopObserver {}

/// Observer that keeps every reported position, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingObserver {
    pub opened: Vec<Point>,
    pub closed: Vec<Point>,
    pub chosen: Vec<Point>,
}

impl PathObserver for RecordingObserver {
    fn node_added_to_open_list(&mut self, centre_pos: Point) {
        self.opened.push(centre_pos);
    }

    fn node_added_to_closed_list(&mut self, centre_pos: Point) {
        self.closed.push(centre_pos);
    }

    fn node_chosen(&mut self, centre_pos: Point) {
        self.chosen.push(centre_pos);
    }
}

impl<T: PathObserver> PathObserver for Rc<RefCell<T>> {
    fn node_added_to_open_list(&mut self, centre_pos: Point) {
        self.borrow_mut().node_added_to_open_list(centre_pos);
    }

    fn node_added_to_closed_list(&mut self, centre_pos: Point) {
        self.borrow_mut().node_added_to_closed_list(centre_pos);
    }

    fn node_chosen(&mut self, centre_pos: Point) {
        self.borrow_mut().node_chosen(centre_pos);
    }
}
