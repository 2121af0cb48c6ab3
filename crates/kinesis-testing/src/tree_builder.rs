//! Declarative construction of [`SceneTree`] fixtures.

use kinesis_core::{NodeId, NodeKind, NodeTree, Rect, SceneNode, SceneTree};

/// Builds a laid-out scene: frames are parent-relative and absolute positions
/// are resolved by [`build`](Self::build).
///
/// ```
/// use kinesis_core::{NodeTree, Rect};
/// use kinesis_testing::TreeBuilder;
///
/// let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
/// let list = builder.scroll(builder.root(), Rect::new(0.0, 100.0, 400.0, 300.0));
/// let row = builder.view(list, Rect::new(0.0, 40.0, 400.0, 40.0));
/// let tree = builder.build();
///
/// assert_eq!(tree.node(row).unwrap().layout.absolute_y, 140.0);
/// ```
///
/// Misuse (an unknown parent) panics, as fixtures should.
pub struct TreeBuilder {
    tree: SceneTree,
    root: NodeId,
}

impl TreeBuilder {
    pub fn new(root_frame: Rect) -> Self {
        let mut tree = SceneTree::new();
        let root = tree.create_node(NodeKind::View);
        if let Err(err) = tree.set_root(root).and_then(|()| tree.set_frame(root, root_frame)) {
            panic!("TreeBuilder: {err}");
        }
        Self { tree, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn view(&mut self, parent: NodeId, frame: Rect) -> NodeId {
        self.child(parent, NodeKind::View, frame)
    }

    pub fn text(&mut self, parent: NodeId, frame: Rect) -> NodeId {
        self.child(parent, NodeKind::Text, frame)
    }

    pub fn scroll(&mut self, parent: NodeId, frame: Rect) -> NodeId {
        self.child(parent, NodeKind::Scroll, frame)
    }

    /// A touchable view.
    pub fn button(&mut self, parent: NodeId, frame: Rect) -> NodeId {
        let id = self.view(parent, frame);
        self.touchable(id)
    }

    pub fn touchable(&mut self, id: NodeId) -> NodeId {
        self.edit(id, |node| node.touchable = true)
    }

    pub fn horizontal(&mut self, id: NodeId) -> NodeId {
        self.edit(id, |node| node.horizontal = true)
    }

    pub fn hidden(&mut self, id: NodeId) -> NodeId {
        self.edit(id, |node| node.visible = false)
    }

    /// Applies an arbitrary property edit.
    pub fn edit(&mut self, id: NodeId, f: impl FnOnce(&mut SceneNode)) -> NodeId {
        match self.tree.node_mut(id) {
            Some(node) => f(node),
            None => panic!("TreeBuilder: node {id} missing"),
        }
        id
    }

    /// `count` views of `extent` stacked along the main axis of `parent`.
    pub fn rows(&mut self, parent: NodeId, count: usize, extent: f32) -> Vec<NodeId> {
        let (horizontal, cross) = match self.tree.node(parent) {
            Some(node) if node.horizontal => (true, node.layout.height),
            Some(node) => (false, node.layout.width),
            None => panic!("TreeBuilder: node {parent} missing"),
        };
        (0..count)
            .map(|index| {
                let offset = index as f32 * extent;
                let frame = if horizontal {
                    Rect::new(offset, 0.0, extent, cross)
                } else {
                    Rect::new(0.0, offset, cross, extent)
                };
                self.view(parent, frame)
            })
            .collect()
    }

    pub fn build(mut self) -> SceneTree {
        self.tree.update_absolute_layout();
        self.tree
    }

    fn child(&mut self, parent: NodeId, kind: NodeKind, frame: Rect) -> NodeId {
        let id = self.tree.create_node(kind);
        let attached = self
            .tree
            .append_child(parent, id)
            .and_then(|()| self.tree.set_frame(id, frame));
        if let Err(err) = attached {
            panic!("TreeBuilder: {err}");
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_the_container_axis() {
        let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 300.0, 600.0));
        let column = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 300.0, 600.0));
        let strip = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 300.0, 100.0));
        builder.horizontal(strip);
        let vertical = builder.rows(column, 3, 50.0);
        let horizontal = builder.rows(strip, 2, 120.0);
        let tree = builder.build();

        let last = tree.node(vertical[2]).unwrap().layout;
        assert_eq!((last.y, last.width, last.height), (100.0, 300.0, 50.0));
        let second = tree.node(horizontal[1]).unwrap().layout;
        assert_eq!((second.x, second.width, second.height), (120.0, 120.0, 100.0));
    }
}
