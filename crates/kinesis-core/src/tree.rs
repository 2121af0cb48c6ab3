//! Contract for the retained node tree the interaction engines read and write.
//!
//! The tree is owned by the host. Engines only ever hold a [`NodeId`] and look
//! the node up again on every access, so a removed node makes the engine a
//! no-op instead of leaving it with a dangling reference.

use crate::collections::map::HashSet;
use crate::error::CoreError;
use crate::geometry::{CornerRadii, Rect, Size};
use smallvec::SmallVec;

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    View,
    Text,
    /// Scrollable container; children are laid out in content space.
    Scroll,
}

/// Layout results produced by the external layout engine.
///
/// `x`/`y` are relative to the parent, `absolute_x`/`absolute_y` are in root
/// space ignoring any ancestor scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Layout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub absolute_x: f32,
    pub absolute_y: f32,
}

impl Layout {
    pub fn absolute_rect(&self) -> Rect {
        Rect::new(self.absolute_x, self.absolute_y, self.width, self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fields of a single node that the interaction core reads or mutates.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub visible: bool,
    pub display_none: bool,
    pub touchable: bool,
    pub layout: Layout,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub horizontal: bool,
    pub scroll_enabled: bool,
    pub opacity: f32,
    pub border_radii: CornerRadii,
    pub border_width: f32,
    pub font_size: f32,
    pub rotation_angle: f32,
    pub parent: Option<NodeId>,
    /// Children in paint order: later entries are drawn on top.
    pub children: SmallVec<[NodeId; 4]>,
    pub dirty: bool,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            visible: true,
            display_none: false,
            touchable: false,
            layout: Layout::default(),
            scroll_x: 0.0,
            scroll_y: 0.0,
            horizontal: false,
            scroll_enabled: true,
            opacity: 1.0,
            border_radii: CornerRadii::default(),
            border_width: 0.0,
            font_size: 14.0,
            rotation_angle: 0.0,
            parent: None,
            children: SmallVec::new(),
            dirty: false,
        }
    }

    pub fn is_scroll_container(&self) -> bool {
        self.kind == NodeKind::Scroll
    }

    /// Hidden nodes and their subtrees never receive touches.
    pub fn is_hit_testable(&self) -> bool {
        self.visible && !self.display_none
    }
}

/// Lookup and mutation entry points the engines need from the host tree.
pub trait NodeTree {
    fn root(&self) -> Option<NodeId>;

    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    /// Flags the node for the renderer. Unknown ids are ignored.
    fn mark_dirty(&mut self, id: NodeId);
}

/// Arena-backed [`NodeTree`].
///
/// Slots are never reused, so a stale id can never alias a newer node.
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: Vec<Option<SceneNode>>,
    root: Option<NodeId>,
    dirty: HashSet<NodeId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(SceneNode::new(id, kind)));
        id
    }

    pub fn set_root(&mut self, id: NodeId) -> Result<(), CoreError> {
        if self.node(id).is_none() {
            return Err(CoreError::MissingNode { id });
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), CoreError> {
        let previous_parent = self
            .node(child)
            .ok_or(CoreError::MissingNode { id: child })?
            .parent;
        if self.node(parent).is_none() {
            return Err(CoreError::MissingNode { id: parent });
        }
        if let Some(previous) = previous_parent.and_then(|previous| self.node_mut(previous)) {
            previous.children.retain(|id| *id != child);
        }
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Removes `id` and its whole subtree, returning the removed ids.
    pub fn remove_node(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut removed = Vec::new();
        let Some(parent) = self.node(id).map(|node| node.parent) else {
            return removed;
        };
        if let Some(parent) = parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current).and_then(Option::take) {
                stack.extend(node.children.iter().copied());
                self.dirty.remove(&current);
                removed.push(current);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        removed
    }

    /// Sets the parent-relative frame of a node.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) -> Result<(), CoreError> {
        let node = self.node_mut(id).ok_or(CoreError::MissingNode { id })?;
        node.layout.x = frame.x;
        node.layout.y = frame.y;
        node.layout.width = frame.width;
        node.layout.height = frame.height;
        Ok(())
    }

    /// Recomputes absolute positions from the parent-relative frames, the way
    /// the layout engine does after a layout pass.
    pub fn update_absolute_layout(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![(root, 0.0f32, 0.0f32)];
        while let Some((id, origin_x, origin_y)) = stack.pop() {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            node.layout.absolute_x = origin_x + node.layout.x;
            node.layout.absolute_y = origin_y + node.layout.y;
            let (x, y) = (node.layout.absolute_x, node.layout.absolute_y);
            stack.extend(node.children.iter().map(|child| (*child, x, y)));
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the set of nodes marked dirty since the last call, clearing
    /// their flags. Ids are returned in ascending order.
    pub fn take_dirty(&mut self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.dirty.drain().collect();
        ids.sort_unstable();
        for id in &ids {
            if let Some(node) = self.nodes.get_mut(*id).and_then(Option::as_mut) {
                node.dirty = false;
            }
        }
        ids
    }
}

impl NodeTree for SceneTree {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    fn mark_dirty(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id).and_then(Option::as_mut) {
            node.dirty = true;
            self.dirty.insert(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
