//! # Saucer Engine
//!
//! The generative and structural core of a real-time farm scene.
//!
//! ## Features
//!
//! - **Poisson-disk sampling**: near-uniform point sets with an approximate
//!   minimum separation, driven by a single injected RNG
//! - **Bucket grid**: fixed 2D spatial buckets with bounded window queries
//! - **Scene nodes**: an arena-backed node tree with pre-order update/draw
//!   traversals and tag-driven deferred deletion
//! - **Renderer contract**: draw traversal emits world transforms and asset
//!   descriptors to any [`scene::RenderSink`]
//!
//! ## Quick Start
//!
//! ```rust
//! use saucer_engine::prelude::*;
//!
//! let mut rng = seeded_rng(7);
//! let points = PoissonSampler::new(32)
//!     .with_domain(SampleDomain::Rectangle)
//!     .generate(&mut rng);
//! assert!(points.len() <= 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig},
        foundation::{
            math::{Mat4, Quat, Transform, Vec2, Vec3},
            random::{seeded_rng, WorldRng},
            time::{Stopwatch, Timer},
        },
        scene::{
            Camera, FollowCamera, FrameContext, NodeBehavior, NodeId, NodeState, RenderQueue, RenderSink,
            Renderable, SceneGraph, SceneNode, Tags,
        },
        spatial::{BucketGrid, Bucketed, GridCell, GridWindow, PoissonSampler, SampleDomain},
    };
}
