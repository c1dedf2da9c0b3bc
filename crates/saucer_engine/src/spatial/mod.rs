//! Spatial partitioning and sampling
//!
//! Provides the bucket grid used to organise generated content and the
//! Poisson-disk sampler that produces evenly spaced placements.

mod bucket_grid;
mod poisson;

pub use bucket_grid::{BucketGrid, Bucketed, GridCell, GridWindow};
pub use poisson::{PoissonSampler, SampleDomain, DEFAULT_OFFSPRING};
