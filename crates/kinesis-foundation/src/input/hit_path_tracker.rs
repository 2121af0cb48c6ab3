//! Pointer capture for gesture routing.
//!
//! On touch-down the dispatcher records which node a pointer landed on. Later
//! phases of the same pointer are routed to that node by identity, even if the
//! finger has since left its bounds or the node moved.

use super::types::PointerId;
use kinesis_core::collections::map::HashMap;
use kinesis_core::NodeId;

#[derive(Debug, Default)]
pub struct HitPathTracker {
    captures: HashMap<PointerId, NodeId>,
}

impl HitPathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `pointer` to `node` for the rest of the touch episode.
    pub fn capture(&mut self, pointer: PointerId, node: NodeId) {
        self.captures.insert(pointer, node);
    }

    pub fn captured(&self, pointer: PointerId) -> Option<NodeId> {
        self.captures.get(&pointer).copied()
    }

    /// Ends the capture, returning the node it was bound to.
    pub fn release(&mut self, pointer: PointerId) -> Option<NodeId> {
        self.captures.remove(&pointer)
    }

    /// Drops every capture that targets `node`.
    pub fn release_node(&mut self, node: NodeId) {
        self.captures.retain(|_, captured| *captured != node);
    }

    pub fn clear(&mut self) {
        self.captures.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
