use glam::{Quat, Vec3};
use mutfak_core::Transform;
use tracing::trace;

use crate::error::SceneError;
use crate::node::{NodeAllocator, NodeId};

/// A named object in the scene
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    /// Inactive nodes stay addressable but are out of play
    pub active: bool,
}

/// Identifier of a registered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub u32);

/// A spawnable blueprint for nodes (a prefab)
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    /// Scale given to every instance
    pub scale: Vec3,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Owns every node and template. There is no hierarchy: every transform is
/// in world space.
#[derive(Debug, Default)]
pub struct Scene {
    allocator: NodeAllocator,
    nodes: Vec<Option<Node>>,
    templates: Vec<Template>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Node management ----

    /// Spawn an active node.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;
        if idx >= self.nodes.len() {
            self.nodes.resize_with(idx + 1, || None);
        }
        self.nodes[idx] = Some(Node {
            name: name.into(),
            transform,
            active: true,
        });
        id
    }

    /// Remove a node. Returns `true` if it was alive.
    pub fn despawn(&mut self, id: NodeId) -> bool {
        if !self.allocator.deallocate(id) {
            return false;
        }
        self.nodes[id.index as usize] = None;
        true
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.allocator.is_alive(id)
    }

    /// Number of alive nodes, active or not.
    pub fn node_count(&self) -> usize {
        self.allocator.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get(id.index as usize)?.as_ref()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get_mut(id.index as usize)?.as_mut()
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|node| &node.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|node| &mut node.transform)
    }

    /// Position of a node, when it is alive.
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.transform(id).map(|t| t.position)
    }

    /// Activate or deactivate a node. Returns `false` for dead handles.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.active = active;
                true
            }
            None => false,
        }
    }

    /// Whether a node is alive and active.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.active)
    }

    /// First alive node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// Iterate over all alive nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().filter_map(|(idx, slot)| {
            let node = slot.as_ref()?;
            let id = NodeId {
                index: idx as u32,
                generation: self.allocator_generation(idx),
            };
            Some((id, node))
        })
    }

    fn allocator_generation(&self, idx: usize) -> u32 {
        self.allocator.generation(idx)
    }

    // ---- Templates ----

    pub fn register_template(&mut self, template: Template) -> TemplateId {
        let id = TemplateId(self.templates.len() as u32);
        self.templates.push(template);
        id
    }

    pub fn template(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id.0 as usize)
    }

    /// Spawn a node from a template at the given pose. The instance takes the
    /// template's scale; from here on the scene owns it.
    pub fn instantiate(
        &mut self,
        template: TemplateId,
        position: Vec3,
        rotation: Quat,
    ) -> Result<NodeId, SceneError> {
        let template_data = self
            .template(template)
            .ok_or(SceneError::UnknownTemplate(template))?;
        let name = template_data.name.clone();
        let transform =
            Transform::from_position_rotation(position, rotation).with_scale(template_data.scale);

        let id = self.spawn(name, transform);
        trace!("Instantiated template {:?} as {}", template, id);
        Ok(id)
    }
}
