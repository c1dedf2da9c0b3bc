use rand::Rng;
use saucer_engine::foundation::math::{constants::HALF_PI, utils, Transform, Vec2, Vec3};
use saucer_engine::scene::{NodeId, SceneGraph, Tags};
use saucer_engine::spatial::{PoissonSampler, SampleDomain};

use super::cluster::grow_cluster;
use super::placed::{PlacedObject, PlacementGrid, PlacementKind};
use crate::assets;
use crate::config::MapConfig;
use crate::nodes::{EntityState, NodeKind};

/// Percent chance that a scattered point seeds a cluster
const ORIGIN_CHANCE: u32 = 15;

/// Offspring per active point for the base scatter
const SCATTER_OFFSPRING: u32 = 50;

/// Height of a hay bale's centre above the ground
const HAY_LIFT: f32 = 0.5;

/// One instantiated prop
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Scene node created for the prop
    pub node: NodeId,
    /// Node name
    pub name: String,
    /// Prop kind
    pub kind: PlacementKind,
    /// Local transform given to the node
    pub transform: Transform,
}

/// Counts and records produced by one generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSummary {
    /// Ground tiles laid
    pub ground_tiles: usize,
    /// Hay bales spawned
    pub hay: usize,
    /// Trees spawned
    pub trees: usize,
    /// Barns spawned
    pub barns: usize,
    /// Grid points skipped (origins and suppressed points)
    pub skipped: usize,
    /// Every spawned prop in grid order
    pub placements: Vec<Placement>,
}

/// Builds farm content from a [`MapConfig`] and a single random source.
///
/// Every draw comes from the owned generator, so the same seed and config
/// reproduce the same grid and the same node set.
#[derive(Debug)]
pub struct MapGenerator<R> {
    config: MapConfig,
    rng: R,
}

impl<R: Rng> MapGenerator<R> {
    /// Create a generator
    pub const fn new(config: MapConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Generation settings
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Give back the random source
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Lay ground tiles, populate the grid, and instantiate it into `scene`
    pub fn generate(&mut self, scene: &mut SceneGraph<NodeKind>) -> MapSummary {
        let ground = self.scatter_ground(scene);
        let grid = self.populate();
        let mut summary = self.instantiate(grid, scene);
        summary.ground_tiles = ground.len();
        log::info!(
            "Map generated: {} ground tiles, {} hay, {} trees, {} barns ({} points skipped)",
            summary.ground_tiles,
            summary.hay,
            summary.trees,
            summary.barns,
            summary.skipped
        );
        summary
    }

    /// Regular layer of ground tiles, one per `ground_tile` units on each axis
    pub fn scatter_ground(&self, scene: &mut SceneGraph<NodeKind>) -> Vec<NodeId> {
        let MapConfig {
            width,
            height,
            ground_tile,
            ..
        } = self.config;
        if ground_tile == 0 {
            return Vec::new();
        }

        let mut tiles = Vec::new();
        for i in 0..width / ground_tile {
            for j in 0..height / ground_tile {
                let id = scene.create_node(format!("Ground{i}_{j}"), Some(assets::ground()), NodeKind::Plain);
                if let Some(node) = scene.get_mut(id) {
                    node.transform = Transform::from_position(Vec3::new(
                        (i * ground_tile) as f32,
                        0.0,
                        (j * ground_tile) as f32,
                    ));
                }
                tiles.push(id);
            }
        }
        log::debug!("Laid {} ground tiles", tiles.len());
        tiles
    }

    /// Base scatter followed by clustering around every origin point.
    ///
    /// A zero grid dimension yields an empty grid.
    pub fn populate(&mut self) -> PlacementGrid {
        let mut grid = self.scatter();
        self.grow_clusters(&mut grid);
        grid
    }

    fn scatter(&mut self) -> PlacementGrid {
        let grid_width = self.config.grid_width();
        let grid_height = self.config.grid_height();
        let mut grid = PlacementGrid::new(grid_width as usize, grid_height as usize, self.config.cell_size as f32);
        if grid_width == 0 || grid_height == 0 {
            log::warn!("Map of {}x{} has no grid cells", self.config.width, self.config.height);
            return grid;
        }

        let Some(count) = self.config.scatter_count() else {
            log::warn!("Map of {grid_width}x{grid_height} cells is too large to scatter");
            return grid;
        };
        let samples = PoissonSampler::new(count)
            .with_offspring(SCATTER_OFFSPRING)
            .with_domain(SampleDomain::Rectangle)
            .with_min_distance(self.config.scatter_min_distance())
            .generate(&mut self.rng);

        let extent = Vec2::new(self.config.width as f32, self.config.height as f32);
        let mut rejected = 0;
        for sample in samples {
            let position = sample.component_mul(&extent);
            let kind = if self.rng.gen_range(0..100) < ORIGIN_CHANCE {
                PlacementKind::OriginPoint
            } else {
                PlacementKind::Hay
            };
            if grid.insert(PlacedObject::new(position, grid.cell_of(position), kind)).is_none() {
                rejected += 1;
            }
        }
        log::debug!(
            "Scattered {} of {count} points on a {grid_width}x{grid_height} grid ({rejected} out of bounds)",
            grid.len()
        );
        grid
    }

    fn grow_clusters(&mut self, grid: &mut PlacementGrid) {
        let cells: Vec<_> = grid.cells().collect();
        let mut clusters = 0;
        for cell in cells {
            // Buckets grow while clusters run; members are never origins.
            let mut index = 0;
            while let Some(point) = grid.bucket(cell).get(index).copied() {
                if point.kind == PlacementKind::OriginPoint {
                    grow_cluster(grid, &point, &mut self.rng);
                    clusters += 1;
                }
                index += 1;
            }
        }
        log::debug!("Grew {clusters} clusters");
    }

    /// Turn every `Hay`, `Tree`, and `Barn` point into a scene node.
    ///
    /// Consumes the grid; origins and suppressed points are skipped.
    pub fn instantiate(&mut self, grid: PlacementGrid, scene: &mut SceneGraph<NodeKind>) -> MapSummary {
        let mut summary = MapSummary::default();

        for (serial, (cell, point)) in grid.into_cells().enumerate() {
            if !point.kind.is_instantiated() {
                summary.skipped += 1;
                continue;
            }

            let ground = Vec3::new(point.position.x, 0.0, point.position.y);
            let (transform, kind, tags) = match point.kind {
                PlacementKind::Hay => {
                    summary.hay += 1;
                    (
                        Transform::from_position(ground + Vec3::y() * HAY_LIFT)
                            .with_rotation(utils::rotation_z(HALF_PI)),
                        NodeKind::Entity(EntityState::grounded()),
                        Tags::CAN_PICK_UP | Tags::CAN_COLLECT,
                    )
                }
                PlacementKind::Tree => {
                    summary.trees += 1;
                    let scale = 1.25 + self.rng.gen_range(0..5) as f32 / 10.0;
                    (
                        Transform::from_position(ground).with_uniform_scale(scale),
                        NodeKind::Plain,
                        Tags::empty(),
                    )
                }
                _ => {
                    summary.barns += 1;
                    let mut scale_axis = || 1.3 + self.rng.gen_range(0..80) as f32 / 100.0;
                    let scale = Vec3::new(scale_axis(), scale_axis(), scale_axis());
                    (
                        Transform::from_position(ground)
                            .with_rotation(utils::rotation_y(utils::deg_to_rad(point.rotation)))
                            .with_scale(scale),
                        NodeKind::Plain,
                        Tags::empty(),
                    )
                }
            };

            let name = format!("{}{}_{}_{serial}", point.kind, cell.a, cell.b);
            let node = scene.create_node(name.clone(), Some(assets::prop(point.kind.asset_prefix())), kind);
            if let Some(created) = scene.get_mut(node) {
                created.transform = transform.clone();
                created.add_tag(tags);
            }
            log::trace!("Placed {name}");
            summary.placements.push(Placement {
                node,
                name,
                kind: point.kind,
                transform,
            });
        }
        summary
    }
}
