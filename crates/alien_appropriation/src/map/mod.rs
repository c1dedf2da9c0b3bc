//! Procedural farm layout
//!
//! Generation runs in four steps: ground tiles, a Poisson scatter of hay and
//! cluster origins over a bucket grid, tree/barn clusters around each origin,
//! and finally one scene node per surviving point.

mod cluster;
mod generator;
mod placed;

pub use cluster::{barn_rotation, grow_cluster, ClusterOutcome, CLUSTER_SCAN_WINDOW};
pub use generator::{MapGenerator, MapSummary, Placement};
pub use placed::{PlacedObject, PlacementGrid, PlacementKind};
