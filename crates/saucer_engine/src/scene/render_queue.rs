//! Renderer contract and the in-crate render queue
//!
//! The draw traversal emits one [`RenderableObject`] per visible node. The
//! renderer on the other side owns all graphics-API state and knows nothing
//! about the tree.

use super::node::{NodeId, Renderable};
use crate::foundation::math::Mat4;

/// One geometry submission produced by the draw traversal
#[derive(Debug, Clone)]
pub struct RenderableObject {
    /// Node that produced the submission
    pub node: NodeId,

    /// Asset keys
    pub renderable: Renderable,

    /// Final world transform, including the node's own scale
    pub transform: Mat4,
}

/// Consumer of draw traversal output
pub trait RenderSink {
    /// Called once before any submission of a frame
    fn begin_frame(&mut self, _view_projection: &Mat4) {}

    /// Receive one visible node
    fn submit(&mut self, object: RenderableObject);
}

/// Objects sharing a material
#[derive(Debug, Clone)]
pub struct RenderBatch {
    /// Material key shared by the batch
    pub material: String,

    /// Objects in submission order
    pub objects: Vec<RenderableObject>,
}

/// Frame-local list of submissions, kept in traversal order.
///
/// Used as the headless renderer and as a test probe.
#[derive(Debug)]
pub struct RenderQueue {
    view_projection: Mat4,
    objects: Vec<RenderableObject>,
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self {
            view_projection: Mat4::identity(),
            objects: Vec::new(),
        }
    }
}

impl RenderQueue {
    /// Create an empty render queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions in traversal order
    pub fn objects(&self) -> &[RenderableObject] {
        &self.objects
    }

    /// View-projection passed to the last `begin_frame`
    pub const fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Group submissions by material, batches in first-seen order
    pub fn batches(&self) -> Vec<RenderBatch> {
        let mut batches: Vec<RenderBatch> = Vec::new();
        for object in &self.objects {
            match batches.iter_mut().find(|b| b.material == object.renderable.material) {
                Some(batch) => batch.objects.push(object.clone()),
                None => batches.push(RenderBatch {
                    material: object.renderable.material.clone(),
                    objects: vec![object.clone()],
                }),
            }
        }
        batches
    }

    /// Number of submissions this frame
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl RenderSink for RenderQueue {
    fn begin_frame(&mut self, view_projection: &Mat4) {
        self.view_projection = *view_projection;
        self.objects.clear();
    }

    fn submit(&mut self, object: RenderableObject) {
        self.objects.push(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(material: &str) -> RenderableObject {
        RenderableObject {
            node: NodeId::default(),
            renderable: Renderable::new("mesh", material, "texture"),
            transform: Mat4::identity(),
        }
    }

    #[test]
    fn test_batches_keep_first_seen_order() {
        let mut queue = RenderQueue::new();
        queue.begin_frame(&Mat4::identity());
        queue.submit(object("lit"));
        queue.submit(object("unlit"));
        queue.submit(object("lit"));

        let batches = queue.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].material, "lit");
        assert_eq!(batches[0].objects.len(), 2);
        assert_eq!(batches[1].material, "unlit");
    }

    #[test]
    fn test_begin_frame_clears_previous_frame() {
        let mut queue = RenderQueue::new();
        queue.submit(object("lit"));
        queue.begin_frame(&Mat4::identity());
        assert_eq!(queue.object_count(), 0);
    }
}
