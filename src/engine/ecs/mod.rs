pub mod body;
pub mod command_queue;
pub mod scene_codec;
pub mod system;


use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::engine::{EngineError, EngineResult};

pub use body::{BodyKind, CelestialBody};
pub use command_queue::{Command, CommandQueue};
pub use scene_codec::{SceneCodec, SceneDescription};
pub use system::SystemWorld;

new_key_type! {
    /// Stable handle to a body in the `World`.
    pub struct BodyId;
}

/// World-owned record for a body plus its topology.
#[derive(Debug)]
pub struct BodyNode {
    pub body: CelestialBody,
    pub children: Vec<BodyId>,
}

/// Flat store of celestial bodies.
///
/// Insertion order is kept and a parent must exist before its children are added, so walking
/// `ids()` front to back always visits parents first.
#[derive(Debug, Default)]
pub struct World {
    nodes: SlotMap<BodyId, BodyNode>,
    order: Vec<BodyId>,
    names: HashMap<String, BodyId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body. `body.parent` must already be in the world; names are unique.
    pub fn add_body(&mut self, body: CelestialBody) -> EngineResult<BodyId> {
        if self.names.contains_key(&body.name) {
            return Err(EngineError::DuplicateBody(body.name));
        }
        if let Some(parent) = body.parent {
            if !self.nodes.contains_key(parent) {
                return Err(EngineError::UnknownParent {
                    body: body.name,
                    parent: format!("{:?}", parent),
                });
            }
        }

        let name = body.name.clone();
        let parent = body.parent;
        let id = self.nodes.insert(BodyNode {
            body,
            children: Vec::new(),
        });

        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.push(id);
            }
        }

        self.order.push(id);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Convenience: add `body` as a child of `parent`.
    pub fn add_child(&mut self, parent: BodyId, mut body: CelestialBody) -> EngineResult<BodyId> {
        body.parent = Some(parent);
        self.add_body(body)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion (parent-first) order.
    pub fn ids(&self) -> &[BodyId] {
        &self.order
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.nodes.get(id).map(|n| &n.body)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.nodes.get_mut(id).map(|n| &mut n.body)
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    /// Case-insensitive lookup, falling back from an exact match.
    pub fn resolve(&self, name: &str) -> EngineResult<BodyId> {
        if let Some(id) = self.find(name) {
            return Ok(id);
        }
        self.order
            .iter()
            .copied()
            .find(|&id| {
                self.get(id)
                    .is_some_and(|b| b.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| EngineError::BodyNotFound(name.to_string()))
    }

    pub fn name_of(&self, id: BodyId) -> Option<&str> {
        self.get(id).map(|b| b.name.as_str())
    }

    pub fn parent_of(&self, id: BodyId) -> Option<BodyId> {
        self.get(id).and_then(|b| b.parent)
    }

    pub fn children_of(&self, id: BodyId) -> &[BodyId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.nodes.get(id).map(|n| (id, &n.body)))
    }

    /// Bodies of `kind`, in scene order.
    pub fn ids_of_kind(&self, kind: BodyKind) -> Vec<BodyId> {
        self.iter()
            .filter(|(_, b)| b.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }
}
