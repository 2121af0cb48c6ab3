use super::engine::{ScrollEngine, ScrollEngineId};
use crate::error::InputError;
use indexmap::IndexMap;
use kinesis_core::{CoreError, NodeId, NodeTree};

/// Owns every scroll engine, at most one per node. Engines tick in creation
/// order.
#[derive(Debug)]
pub struct ScrollEngineManager {
    engines: IndexMap<ScrollEngineId, ScrollEngine>,
    next_id: u32,
}

impl Default for ScrollEngineManager {
    fn default() -> Self {
        Self {
            engines: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl ScrollEngineManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the engine bound to `node`, creating it on first request.
    pub fn create(&mut self, tree: &dyn NodeTree, node: NodeId) -> Result<ScrollEngineId, InputError> {
        if let Some(existing) = self.find_by_node(node) {
            return Ok(existing);
        }
        let scene_node = tree.node(node).ok_or(CoreError::MissingNode { id: node })?;
        let id = ScrollEngineId(self.next_id);
        self.next_id += 1;
        self.engines.insert(id, ScrollEngine::for_node(id, scene_node));
        log::debug!("created scroll engine {id} for node {node}");
        Ok(id)
    }

    pub fn get(&self, id: ScrollEngineId) -> Option<&ScrollEngine> {
        self.engines.get(&id)
    }

    pub fn get_mut(&mut self, id: ScrollEngineId) -> Option<&mut ScrollEngine> {
        self.engines.get_mut(&id)
    }

    pub fn engine_mut(&mut self, id: ScrollEngineId) -> Result<&mut ScrollEngine, InputError> {
        self.engines
            .get_mut(&id)
            .ok_or(InputError::MissingEngine { id })
    }

    pub fn remove(&mut self, id: ScrollEngineId) -> Option<ScrollEngine> {
        self.engines.shift_remove(&id)
    }

    pub fn remove_for_node(&mut self, node: NodeId) -> Option<ScrollEngine> {
        let id = self.find_by_node(node)?;
        self.remove(id)
    }

    pub fn find_by_node(&self, node: NodeId) -> Option<ScrollEngineId> {
        self.engines
            .values()
            .find(|engine| engine.node() == node)
            .map(ScrollEngine::id)
    }

    /// Ticks every animating engine; returns how many were advanced.
    pub fn tick_all(&mut self, tree: &mut dyn NodeTree, timestamp_ms: f64) -> usize {
        let mut advanced = 0;
        for engine in self.engines.values_mut() {
            if engine.needs_tick() {
                engine.tick(tree, timestamp_ms);
                advanced += 1;
            }
        }
        advanced
    }

    /// Any engine under a finger or animating.
    pub fn has_active_engines(&self) -> bool {
        self.engines.values().any(ScrollEngine::is_active)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
