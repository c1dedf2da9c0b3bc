//! Arena-backed scene tree
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeId`]. Each node
//! owns an ordered child list and a weapon list; the root always exists.
//!
//! ## Frame phases
//!
//! 1. [`SceneGraph::update`] runs every node's hook in pre-order (node, then
//!    children, then weapons). Hooks can only touch their own node, so the
//!    tree shape is fixed for the whole pass. Nodes that end up tagged
//!    [`Tags::DELETE`] are unlinked and despawned with their subtrees in a
//!    sweep after the pass completes.
//! 2. [`SceneGraph::draw`] walks the stable tree in the same order and submits
//!    one object per renderable node to a [`RenderSink`].

use slotmap::SlotMap;

use super::camera::Camera;
use super::node::{FrameContext, NodeBehavior, NodeId, NodeState, Renderable, SceneNode};
use super::render_queue::{RenderSink, RenderableObject};
use super::tags::Tags;
use crate::foundation::math::{Mat4, Vec3};

/// Scene tree over node kinds `K`
#[derive(Debug, Clone)]
pub struct SceneGraph<K> {
    nodes: SlotMap<NodeId, SceneNode<K>>,
    root: NodeId,
}

impl<K: NodeBehavior + Default> Default for SceneGraph<K> {
    fn default() -> Self {
        Self::with_root(K::default())
    }
}

impl<K: NodeBehavior> SceneGraph<K> {
    /// Create a tree holding only a root of the given kind
    pub fn with_root(kind: K) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new("root".to_string(), None, kind));
        Self { nodes, root }
    }

    /// The root node
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node by id
    pub fn get(&self, id: NodeId) -> Option<&SceneNode<K>> {
        self.nodes.get(id)
    }

    /// Mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode<K>> {
        self.nodes.get_mut(id)
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All live nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode<K>)> {
        self.nodes.iter()
    }

    /// Create a node as the last child of the root.
    ///
    /// Names are expected to be unique; lookups return the first match.
    pub fn create_node(&mut self, name: impl Into<String>, renderable: Option<Renderable>, kind: K) -> NodeId {
        self.spawn(self.root, name.into(), renderable, kind, false)
    }

    /// Create a node as the last child of `parent`; `None` if `parent` is gone
    pub fn create_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        renderable: Option<Renderable>,
        kind: K,
    ) -> Option<NodeId> {
        self.contains(parent)
            .then(|| self.spawn(parent, name.into(), renderable, kind, false))
    }

    /// Create a weapon node under `owner`.
    ///
    /// Weapons are updated after the owner's children and are drawn only while
    /// the owner's [`NodeBehavior::weapon_active`] accepts their tags.
    pub fn create_weapon(
        &mut self,
        owner: NodeId,
        name: impl Into<String>,
        renderable: Option<Renderable>,
        tags: Tags,
        kind: K,
    ) -> Option<NodeId> {
        if !self.contains(owner) {
            return None;
        }
        let id = self.spawn(owner, name.into(), renderable, kind, true);
        if let Some(node) = self.nodes.get_mut(id) {
            node.add_tag(tags);
        }
        Some(id)
    }

    fn spawn(&mut self, parent: NodeId, name: String, renderable: Option<Renderable>, kind: K, weapon: bool) -> NodeId {
        log::trace!("Spawning node '{name}'");
        let mut node = SceneNode::new(name, renderable, kind);
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        if let Some(parent) = self.nodes.get_mut(parent) {
            if weapon {
                parent.weapons.push(id);
            } else {
                parent.children.push(id);
            }
        }
        id
    }

    /// Schedule `id` and its subtree for removal at the end of the next update
    pub fn mark_for_deletion(&mut self, id: NodeId) -> bool {
        self.nodes.get_mut(id).map(|node| node.add_tag(Tags::DELETE)).is_some()
    }

    /// Every node reachable from the root in traversal order
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.weapons.iter().rev());
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// First node named `name` in traversal order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.pre_order()
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(|node| node.name == name))
    }

    /// Children of `parent` carrying every tag in `tags`, in child order
    pub fn children_tagged(&self, parent: NodeId, tags: Tags) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(parent)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |id| self.nodes.get(*id).is_some_and(|child| child.has_tag(tags)))
    }

    /// World matrix of `id` (translation and rotation of every ancestor),
    /// recomputed on each call
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut matrix = Mat4::identity();
        let mut current = Some(id);
        while let Some(cursor) = current {
            let node = self.nodes.get(cursor)?;
            matrix = node.transform.rigid_matrix() * matrix;
            current = node.parent;
        }
        Some(matrix)
    }

    /// World-space position of `id`
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id)
            .map(|m| Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]))
    }

    /// Run one update pass, then sweep deleted nodes.
    ///
    /// Returns the number of nodes removed by the sweep.
    pub fn update(&mut self, ctx: &FrameContext<'_>) -> usize {
        for id in self.pre_order() {
            if let Some(node) = self.nodes.get_mut(id) {
                let SceneNode {
                    name,
                    transform,
                    tags,
                    kind,
                    ..
                } = node;
                let mut state = NodeState {
                    name: name.as_str(),
                    transform,
                    tags,
                };
                kind.update(&mut state, ctx);
            }
        }
        self.sweep_deleted()
    }

    /// Unlink every node tagged [`Tags::DELETE`] from its parent, then despawn
    /// it with its whole subtree. The root is never removed.
    pub fn sweep_deleted(&mut self) -> usize {
        if let Some(root) = self.nodes.get_mut(self.root) {
            if root.is_marked_for_deletion() {
                log::warn!("Ignoring delete tag on the scene root");
                root.tags.remove(Tags::DELETE);
            }
        }

        let marked: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_marked_for_deletion())
            .map(|(id, _)| id)
            .collect();
        if marked.is_empty() {
            return 0;
        }

        for &id in &marked {
            let parent = self.nodes.get(id).and_then(SceneNode::parent);
            if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
                parent.children.retain(|child| *child != id);
                parent.weapons.retain(|weapon| *weapon != id);
            }
        }

        let mut removed = 0;
        let mut stack = marked;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                removed += 1;
                stack.extend(node.children);
                stack.extend(node.weapons);
            }
        }
        log::debug!("Swept {removed} scene nodes");
        removed
    }

    /// Submit every renderable node to `sink`, returning the submission count.
    ///
    /// `world = parent · translate · rotate` is passed down; each node's scale
    /// only affects its own submission. No sorting and no culling.
    pub fn draw(&self, camera: &dyn Camera, sink: &mut dyn RenderSink) -> usize {
        sink.begin_frame(&camera.view_projection());
        let mut submitted = 0;
        self.draw_node(self.root, &Mat4::identity(), sink, &mut submitted);
        submitted
    }

    fn draw_node(&self, id: NodeId, parent_world: &Mat4, sink: &mut dyn RenderSink, submitted: &mut usize) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let transform = &node.transform;

        if let Some(renderable) = &node.renderable {
            let geometry = parent_world
                * Mat4::new_translation(&transform.position)
                * node.kind.geometry_rotation(transform).to_homogeneous()
                * transform.scale_matrix();
            sink.submit(RenderableObject {
                node: id,
                renderable: renderable.clone(),
                transform: geometry,
            });
            *submitted += 1;
        }

        let world = parent_world * transform.rigid_matrix();
        for &child in &node.children {
            self.draw_node(child, &world, sink, submitted);
        }
        for &weapon in &node.weapons {
            let active = self
                .nodes
                .get(weapon)
                .is_some_and(|w| node.kind.weapon_active(w.tags));
            if active {
                self.draw_node(weapon, &world, sink, submitted);
            }
        }
    }
}
