//! Owner of the running animations.

use crate::animation::{Animation, AnimationId};
use crate::config::AnimationConfig;
use crate::driver::DriverKind;
use crate::error::AnimationError;
use crate::property::AnimatedProperty;
use indexmap::IndexMap;
use kinesis_core::{fire, NodeId, NodeTree};
use smallvec::SmallVec;

/// Advances animations once per frame and writes their values into the tree.
///
/// Animations tick in start order. A cancelled animation stays in the set
/// until the next [`tick_all`](Self::tick_all), which drops it and fires its
/// completion callback. The callback always receives `true`, whether the
/// animation ran out or was cancelled.
#[derive(Debug)]
pub struct AnimationTicker {
    animations: IndexMap<AnimationId, Animation>,
    next_id: u32,
}

impl Default for AnimationTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationTicker {
    pub fn new() -> Self {
        Self {
            animations: IndexMap::new(),
            next_id: 1,
        }
    }

    pub fn start(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "animation {id} started: node {} {} {:?}",
            animation.node(),
            animation.property().name(),
            animation.driver().kind()
        );
        self.animations.insert(id, animation);
        id
    }

    /// Builds an animation from host names, reading the start value from the
    /// node, and starts it.
    pub fn animate(
        &mut self,
        tree: &dyn NodeTree,
        node: NodeId,
        property: &str,
        driver: &str,
        config: AnimationConfig,
    ) -> Result<AnimationId, AnimationError> {
        let property = AnimatedProperty::from_name(property).ok_or_else(|| {
            AnimationError::UnknownProperty {
                name: property.to_owned(),
            }
        })?;
        let kind = DriverKind::from_name(driver).ok_or_else(|| AnimationError::UnknownDriver {
            name: driver.to_owned(),
        })?;
        self.animate_property(tree, node, property, kind, config)
    }

    pub fn animate_property(
        &mut self,
        tree: &dyn NodeTree,
        node: NodeId,
        property: AnimatedProperty,
        kind: DriverKind,
        config: AnimationConfig,
    ) -> Result<AnimationId, AnimationError> {
        let from = tree
            .node(node)
            .map(|scene| property.read(scene))
            .ok_or(AnimationError::MissingNode { id: node })?;
        let animation = Animation::new(node, property, config.driver(kind), from, config.to_value)
            .with_on_finish(config.on_finish);
        Ok(self.start(animation))
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(&id)
    }

    /// Returns `false` if the id is unknown or already finished.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        match self.animations.get_mut(&id) {
            Some(animation) if !animation.is_finished() => {
                animation.cancel();
                log::debug!("animation {id} cancelled");
                true
            }
            _ => false,
        }
    }

    /// Cancels every animation bound to `node`, returning how many were live.
    pub fn cancel_node(&mut self, node: NodeId) -> usize {
        let mut cancelled = 0;
        for animation in self.animations.values_mut() {
            if animation.node() == node && !animation.is_finished() {
                animation.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Advances every live animation, writes the values and retires the
    /// finished ones. Returns how many animations wrote a value.
    pub fn tick_all(&mut self, tree: &mut dyn NodeTree, timestamp: f64) -> usize {
        let mut advanced = 0;
        for animation in self.animations.values_mut() {
            if animation.is_finished() {
                continue;
            }
            let node = animation.node();
            if tree.node(node).is_none() {
                log::debug!("animation target {node} gone, cancelling");
                animation.cancel();
                continue;
            }
            let value = animation.tick(timestamp);
            if let Some(scene) = tree.node_mut(node) {
                animation.property().write(scene, value);
            }
            tree.mark_dirty(node);
            advanced += 1;
        }

        // Retire first; callbacks never see a finished animation in the set.
        let finished: SmallVec<[AnimationId; 4]> = self
            .animations
            .iter()
            .filter(|(_, animation)| animation.is_finished())
            .map(|(id, _)| *id)
            .collect();
        let mut done: SmallVec<[(AnimationId, Animation); 4]> = SmallVec::new();
        for id in finished {
            if let Some(animation) = self.animations.shift_remove(&id) {
                done.push((id, animation));
            }
        }
        for (id, mut animation) in done {
            log::debug!(
                "animation {id} finished (cancelled: {})",
                animation.is_cancelled()
            );
            fire(&animation.take_on_finish(), true);
        }
        advanced
    }

    pub fn has_active(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/ticker_tests.rs"]
mod tests;
