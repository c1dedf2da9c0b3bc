//! Scene management system
//!
//! A tree of transformable nodes updated and drawn once per frame.
//!
//! ## Architecture
//!
//! ```text
//! Generated content / gameplay
//!      ↓
//! SceneGraph (update → sweep → draw)
//!      ↓
//! RenderSink (external renderer)
//! ```
//!
//! Node kinds are a closed set chosen by the game; each implements
//! [`NodeBehavior`] to hook into the traversals.

mod camera;
mod node;
mod render_queue;
mod scene_graph;
mod tags;

pub use camera::{Camera, FollowCamera};
pub use node::{FrameContext, NodeBehavior, NodeId, NodeState, Renderable, SceneNode};
pub use render_queue::{RenderBatch, RenderQueue, RenderSink, RenderableObject};
pub use scene_graph::SceneGraph;
pub use tags::{TagParseError, Tags};
