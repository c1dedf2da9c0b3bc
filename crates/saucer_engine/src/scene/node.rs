//! Scene node data and the per-kind behavior interface

use slotmap::new_key_type;

use super::camera::Camera;
use super::tags::Tags;
use crate::foundation::math::{Quat, Transform};

new_key_type! {
    /// Stable handle to a node in a [`super::SceneGraph`]
    pub struct NodeId;
}

/// Opaque asset keys handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Renderable {
    /// Geometry key
    pub mesh: String,
    /// Material (shader) key
    pub material: String,
    /// Texture key
    pub texture: String,
}

impl Renderable {
    /// Create a descriptor from asset keys
    pub fn new(mesh: impl Into<String>, material: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: material.into(),
            texture: texture.into(),
        }
    }
}

/// Per-frame input shared by every update hook
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Active camera
    pub camera: &'a dyn Camera,
}

/// The parts of a node its own update hook may change
pub struct NodeState<'a> {
    /// Node name, for diagnostics
    pub name: &'a str,
    /// Local transform
    pub transform: &'a mut Transform,
    /// Tag set; adding [`Tags::DELETE`] schedules removal
    pub tags: &'a mut Tags,
}

/// Capability interface implemented by the closed set of node kinds.
///
/// Every method has a default that suits a plain decorative node.
pub trait NodeBehavior {
    /// Per-frame hook, run before the node's children and weapons
    fn update(&mut self, _node: &mut NodeState<'_>, _ctx: &FrameContext<'_>) {}

    /// Rotation applied to the node's own geometry. Children always inherit
    /// the transform's rotation instead.
    fn geometry_rotation(&self, transform: &Transform) -> Quat {
        transform.rotation
    }

    /// Whether the weapon carrying `weapon_tags` should be drawn this frame
    fn weapon_active(&self, _weapon_tags: Tags) -> bool {
        false
    }
}

impl NodeBehavior for () {}

/// One node of the scene tree
#[derive(Debug, Clone)]
pub struct SceneNode<K> {
    pub(super) name: String,
    pub(super) renderable: Option<Renderable>,
    /// Local transform relative to the parent
    pub transform: Transform,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) weapons: Vec<NodeId>,
    pub(super) tags: Tags,
    /// Kind-specific state and behavior
    pub kind: K,
}

impl<K> SceneNode<K> {
    pub(super) fn new(name: String, renderable: Option<Renderable>, kind: K) -> Self {
        Self {
            name,
            renderable,
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
            weapons: Vec::new(),
            tags: Tags::empty(),
            kind,
        }
    }

    /// Unique node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asset descriptor, `None` for grouping nodes
    pub const fn renderable(&self) -> Option<&Renderable> {
        self.renderable.as_ref()
    }

    /// Owning parent (the weapon owner for weapon nodes), `None` for the root
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owned children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Weapons drawn under this node when active
    pub fn weapons(&self) -> &[NodeId] {
        &self.weapons
    }

    /// Current tag set
    pub const fn tags(&self) -> Tags {
        self.tags
    }

    /// Whether every tag in `tags` is set
    pub const fn has_tag(&self, tags: Tags) -> bool {
        self.tags.contains(tags)
    }

    /// Add tags
    pub fn add_tag(&mut self, tags: Tags) {
        self.tags.insert(tags);
    }

    /// Whether the node is scheduled for removal
    pub const fn is_marked_for_deletion(&self) -> bool {
        self.tags.contains(Tags::DELETE)
    }
}
