//! Tree and barn clusters grown around origin points

use rand::Rng;
use saucer_engine::foundation::math::{utils, Vec2};
use saucer_engine::spatial::{GridWindow, PoissonSampler};

use super::placed::{PlacedObject, PlacementGrid, PlacementKind};

/// Cells cleared around an origin: offsets `{-1, 0}` on each axis.
///
/// This is the origin's own cell plus the three cells toward lower `a`/`b`.
/// Points in the other five neighbours are left alone even when they fall
/// inside the exclusion radius.
pub const CLUSTER_SCAN_WINDOW: GridWindow = GridWindow::new(-1, 0);

/// Percent chance that a cluster is a barn yard
const BARN_CHANCE: u32 = 20;

/// Offspring per active point when sampling cluster members
const CLUSTER_OFFSPRING: u32 = 70;

/// Summary of one cluster pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOutcome {
    /// Member kind (`Tree` or `Barn`)
    pub kind: PlacementKind,
    /// Exclusion radius in world units
    pub radius: f32,
    /// Existing points switched to `Default`
    pub suppressed: usize,
    /// Members filed into the grid
    pub placed: usize,
    /// Members that fell outside the grid
    pub dropped: usize,
}

/// Grow one cluster around `origin`, drawing every random number from `rng`.
pub fn grow_cluster<R: Rng + ?Sized>(grid: &mut PlacementGrid, origin: &PlacedObject, rng: &mut R) -> ClusterOutcome {
    let cell_size = grid.cell_size();
    let kind = if rng.gen_range(0..100) < BARN_CHANCE {
        PlacementKind::Barn
    } else {
        PlacementKind::Tree
    };
    let radius = match kind {
        PlacementKind::Barn => cell_size,
        _ => (1.0 + rng.gen_range(0..5) as f32 / 5.0) * cell_size,
    };

    let mut suppressed = 0;
    for point in grid.neighbors_mut(origin.cell, CLUSTER_SCAN_WINDOW) {
        if point.kind != PlacementKind::Default && (point.position - origin.position).norm() < radius {
            point.kind = PlacementKind::Default;
            suppressed += 1;
        }
    }

    let count = match kind {
        PlacementKind::Barn => rng.gen_range(1..=6),
        _ => rng.gen_range(10..=39),
    };
    let samples = PoissonSampler::new(count)
        .with_offspring(CLUSTER_OFFSPRING)
        .generate(rng);

    let half_extent = Vec2::repeat(radius / 2.0);
    let (mut placed, mut dropped) = (0, 0);
    for sample in samples {
        let position = origin.position + sample * radius - half_extent;
        let mut member = PlacedObject::new(position, grid.cell_of(position), kind);
        if kind == PlacementKind::Barn {
            member = member.with_rotation(barn_rotation(rng.gen_range(0..3), origin.position, position));
        }
        if grid.insert(member).is_some() {
            placed += 1;
        } else {
            dropped += 1;
        }
    }

    log::trace!(
        "{kind} cluster at {:?}: r = {radius}, {placed} placed, {dropped} dropped, {suppressed} suppressed",
        origin.cell
    );
    ClusterOutcome {
        kind,
        radius,
        suppressed,
        placed,
        dropped,
    }
}

/// Barn yaw in degrees for one of three policies: `0` faces 0°, `1` faces
/// 90°, anything else faces along the signed angle between the origin's
/// position vector and the origin-to-barn vector.
pub fn barn_rotation(policy: u32, origin: Vec2, barn: Vec2) -> f32 {
    match policy {
        0 => 0.0,
        1 => 90.0,
        _ => utils::oriented_angle(origin, barn - origin).map_or(0.0, utils::rad_to_deg),
    }
}
