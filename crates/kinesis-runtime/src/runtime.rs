//! The frame driver: one explicit object owning every engine and the tree.

use crate::error::RuntimeError;
use crate::frame_stats::FrameStats;
use kinesis_animation::{AnimationConfig, AnimationId, AnimationTicker};
use kinesis_core::{Callback, ConfigValue, NodeId, NodeTree, Point, SceneTree, Size};
use kinesis_foundation::{
    GestureEvent, GestureId, InputError, ScrollCallbackKind, ScrollEngine, ScrollEngineId,
    ScrollEngineManager, TouchDispatcher, TouchEvent,
};

/// What one vsync tick advanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub scroll_engines: usize,
    pub animations: usize,
}

impl FrameReport {
    pub fn is_idle(&self) -> bool {
        self.scroll_engines == 0 && self.animations == 0
    }
}

/// Owns the touch dispatcher, the scroll engines, the animation ticker and
/// the node tree they all read and write.
///
/// Fields drop in declaration order, so every engine is gone before the tree.
pub struct Runtime<T: NodeTree> {
    dispatcher: TouchDispatcher,
    scroll: ScrollEngineManager,
    animations: AnimationTicker,
    stats: FrameStats,
    tree: T,
}

impl<T: NodeTree> Runtime<T> {
    pub fn new(tree: T) -> Self {
        Self {
            dispatcher: TouchDispatcher::new(),
            scroll: ScrollEngineManager::new(),
            animations: AnimationTicker::new(),
            stats: FrameStats::new(),
            tree,
        }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn dispatcher(&self) -> &TouchDispatcher {
        &self.dispatcher
    }

    pub fn scroll_engines(&self) -> &ScrollEngineManager {
        &self.scroll
    }

    pub fn animations(&self) -> &AnimationTicker {
        &self.animations
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Runs one display refresh: scroll engines first, then animations.
    pub fn on_vsync(&mut self, timestamp_ms: f64) -> FrameReport {
        let report = FrameReport {
            scroll_engines: self.scroll.tick_all(&mut self.tree, timestamp_ms),
            animations: self.animations.tick_all(&mut self.tree, timestamp_ms),
        };
        self.stats.record(timestamp_ms, !report.is_idle());
        log::trace!("vsync {timestamp_ms:.1}: {report:?}");
        report
    }

    /// Any engine dragging or animating, or an animation still alive.
    pub fn has_pending_work(&self) -> bool {
        self.scroll.has_active_engines() || self.animations.has_active()
    }

    pub fn on_touch(&mut self, event: &TouchEvent) {
        self.dispatcher.dispatch_touch(&self.tree, event);
    }

    pub fn set_press_callback(
        &mut self,
        node: NodeId,
        name: &str,
        callback: Callback<()>,
    ) -> Result<(), RuntimeError> {
        self.dispatcher
            .set_press_callback_by_name(node, name, callback)?;
        Ok(())
    }

    pub fn attach_gesture(&mut self, node: NodeId, type_name: &str) -> Result<GestureId, RuntimeError> {
        Ok(self.dispatcher.attach_gesture_by_name(node, type_name)?)
    }

    pub fn detach_gesture(&mut self, id: GestureId) -> Result<(), RuntimeError> {
        Ok(self.dispatcher.detach_gesture(id)?)
    }

    pub fn set_gesture_callback(
        &mut self,
        id: GestureId,
        name: &str,
        callback: Callback<GestureEvent>,
    ) -> Result<(), RuntimeError> {
        Ok(self.dispatcher.set_gesture_callback(id, name, callback)?)
    }

    pub fn set_gesture_config(
        &mut self,
        id: GestureId,
        key: &str,
        value: &ConfigValue,
    ) -> Result<(), RuntimeError> {
        Ok(self.dispatcher.set_gesture_config(id, key, value)?)
    }

    pub fn reset_gesture(&mut self, id: GestureId) -> Result<(), RuntimeError> {
        Ok(self.dispatcher.reset_gesture(id)?)
    }

    /// Creates the scroll engine for `node`, or returns the existing one.
    pub fn scroll_create(&mut self, node: NodeId) -> Result<ScrollEngineId, RuntimeError> {
        Ok(self.scroll.create(&self.tree, node)?)
    }

    pub fn scroll_destroy(&mut self, id: ScrollEngineId) -> bool {
        self.scroll.remove(id).is_some()
    }

    pub fn scroll_engine(&self, id: ScrollEngineId) -> Option<&ScrollEngine> {
        self.scroll.get(id)
    }

    /// Feeds a touch to one scroll engine. For a touch-down the result tells
    /// whether the engine took the drag.
    pub fn scroll_touch(&mut self, id: ScrollEngineId, event: &TouchEvent) -> Result<bool, RuntimeError> {
        let engine = self.scroll.engine_mut(id)?;
        Ok(engine.on_touch_event(&mut self.tree, event))
    }

    pub fn scroll_to(
        &mut self,
        id: ScrollEngineId,
        x: f32,
        y: f32,
        animated: bool,
    ) -> Result<(), RuntimeError> {
        self.scroll
            .engine_mut(id)?
            .scroll_to(&mut self.tree, x, y, animated);
        Ok(())
    }

    pub fn set_scroll_config(
        &mut self,
        id: ScrollEngineId,
        key: &str,
        value: &ConfigValue,
    ) -> Result<(), RuntimeError> {
        self.scroll.engine_mut(id)?.config.apply(key, value)?;
        Ok(())
    }

    pub fn update_scroll_bounds(
        &mut self,
        id: ScrollEngineId,
        viewport: Size,
        content: Size,
    ) -> Result<(), RuntimeError> {
        self.scroll.engine_mut(id)?.update_bounds(viewport, content);
        Ok(())
    }

    pub fn scroll_offset(&self, id: ScrollEngineId) -> Option<Point> {
        self.scroll.get(id).map(ScrollEngine::offset)
    }

    /// Binds `onScroll` or `onScrollEnd`.
    pub fn set_scroll_offset_callback(
        &mut self,
        id: ScrollEngineId,
        name: &str,
        callback: Callback<Point>,
    ) -> Result<(), RuntimeError> {
        let kind = scroll_callback_kind(name, true)?;
        let callbacks = &mut self.scroll.engine_mut(id)?.callbacks;
        match kind {
            ScrollCallbackKind::Scroll => callbacks.on_scroll = Some(callback),
            _ => callbacks.on_scroll_end = Some(callback),
        }
        Ok(())
    }

    /// Binds `onScrollBeginDrag` or `onScrollEndDrag`.
    pub fn set_scroll_drag_callback(
        &mut self,
        id: ScrollEngineId,
        name: &str,
        callback: Callback<()>,
    ) -> Result<(), RuntimeError> {
        let kind = scroll_callback_kind(name, false)?;
        let callbacks = &mut self.scroll.engine_mut(id)?.callbacks;
        match kind {
            ScrollCallbackKind::BeginDrag => callbacks.on_scroll_begin_drag = Some(callback),
            _ => callbacks.on_scroll_end_drag = Some(callback),
        }
        Ok(())
    }

    /// Starts animating `property` of `node` from its current value.
    pub fn animate(
        &mut self,
        node: NodeId,
        property: &str,
        driver: &str,
        config: AnimationConfig,
    ) -> Result<AnimationId, RuntimeError> {
        Ok(self
            .animations
            .animate(&self.tree, node, property, driver, config)?)
    }

    /// Host-keyed variant of [`animate`](Self::animate).
    pub fn animate_with(
        &mut self,
        node: NodeId,
        property: &str,
        driver: &str,
        params: &[(&str, ConfigValue)],
        on_finish: Option<Callback<bool>>,
    ) -> Result<AnimationId, RuntimeError> {
        let mut config = AnimationConfig {
            on_finish,
            ..AnimationConfig::default()
        };
        for (key, value) in params {
            config.apply(key, value)?;
        }
        self.animate(node, property, driver, config)
    }

    /// The animation stops now; its callback fires on the next vsync.
    pub fn cancel_animation(&mut self, id: AnimationId) -> bool {
        self.animations.cancel(id)
    }

    /// Drops everything the engines hold for `node`. Call for every node the
    /// host removes from its tree.
    pub fn forget_node(&mut self, node: NodeId) {
        self.dispatcher.remove_node(node);
        if let Some(engine) = self.scroll.remove_for_node(node) {
            log::debug!("dropped scroll engine {} with node {node}", engine.id());
        }
        self.animations.cancel_node(node);
    }
}

impl Runtime<SceneTree> {
    /// Removes `node` and its subtree from the tree and forgets them.
    pub fn remove_node(&mut self, node: NodeId) -> Vec<NodeId> {
        let removed = self.tree.remove_node(node);
        for id in &removed {
            self.forget_node(*id);
        }
        removed
    }
}

fn scroll_callback_kind(name: &str, carries_offset: bool) -> Result<ScrollCallbackKind, InputError> {
    ScrollCallbackKind::from_name(name)
        .filter(|kind| kind.carries_offset() == carries_offset)
        .ok_or_else(|| InputError::UnknownEvent {
            name: name.to_owned(),
        })
}
