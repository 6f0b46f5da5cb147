//! Bounded queue of waypoints the player walks through in order.

use std::collections::VecDeque;

use maze_chase_core::{ClickRejection, PixelPoint, PATH_CAPACITY};

/// Waypoints queued for the player, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathQueue {
    waypoints: VecDeque<PixelPoint>,
}

impl PathQueue {
    pub(crate) fn new() -> Self {
        Self {
            waypoints: VecDeque::with_capacity(PATH_CAPACITY),
        }
    }

    /// Number of queued waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether no waypoints are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Reports whether the queue reached [`PATH_CAPACITY`].
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.waypoints.len() >= PATH_CAPACITY
    }

    /// Most recently queued waypoint.
    #[must_use]
    pub fn last(&self) -> Option<PixelPoint> {
        self.waypoints.back().copied()
    }

    /// Iterator over the waypoints in walking order.
    pub fn iter(&self) -> impl Iterator<Item = PixelPoint> + '_ {
        self.waypoints.iter().copied()
    }

    /// Appends a waypoint, returning the new queue length.
    pub(crate) fn push(&mut self, waypoint: PixelPoint) -> Result<usize, ClickRejection> {
        if self.is_full() {
            return Err(ClickRejection::PathFull);
        }
        self.waypoints.push_back(waypoint);
        Ok(self.waypoints.len())
    }

    pub(crate) fn pop(&mut self) -> Option<PixelPoint> {
        self.waypoints.pop_front()
    }

    pub(crate) fn replace_with(&mut self, waypoint: PixelPoint) {
        self.waypoints.clear();
        self.waypoints.push_back(waypoint);
    }

    pub(crate) fn clear(&mut self) {
        self.waypoints.clear();
    }
}
