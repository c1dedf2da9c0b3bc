//! Map generation against real scene graphs
//!
//! Covers determinism for a fixed seed, grid bounds, degenerate sizes, and the
//! transform each prop kind receives.

use crate::config::MapConfig;
use crate::map::{MapGenerator, MapSummary, PlacedObject, PlacementGrid, PlacementKind};
use crate::nodes::NodeKind;
use approx::assert_relative_eq;
use saucer_engine::foundation::math::{constants::HALF_PI, utils, Quat, Vec2, Vec3};
use saucer_engine::foundation::random::seeded_rng;
use saucer_engine::scene::{SceneGraph, Tags};

fn small_map() -> MapConfig {
    MapConfig {
        width: 100,
        height: 100,
        cell_size: 20,
        ground_tile: 50,
        ..MapConfig::default()
    }
}

fn generate(config: &MapConfig, seed: u64) -> (SceneGraph<NodeKind>, MapSummary) {
    let mut scene = SceneGraph::<NodeKind>::default();
    let summary = MapGenerator::new(config.clone(), seeded_rng(seed)).generate(&mut scene);
    (scene, summary)
}

/// Asserts `value == base + i * step` for some whole `i` in `0..=max_step`
fn assert_stepped(value: f32, base: f32, step: f32, max_step: u32) {
    let steps = (value - base) / step;
    assert_relative_eq!(steps, steps.round(), epsilon = 1e-3);
    assert!((0.0..=max_step as f32).contains(&steps.round()), "{value} off the {base} + i*{step} ladder");
}

fn assert_rotation(actual: &Quat, expected: &Quat) {
    assert_relative_eq!(actual.angle_to(expected), 0.0, epsilon = 1e-4);
}

fn point(grid: &PlacementGrid, x: f32, y: f32, kind: PlacementKind) -> PlacedObject {
    let position = Vec2::new(x, y);
    PlacedObject::new(position, grid.cell_of(position), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_world_has_five_by_five_grid() {
        let config = small_map();
        assert_eq!(config.grid_width(), 5);
        assert_eq!(config.grid_height(), 5);

        let grid = MapGenerator::new(config, seeded_rng(7)).populate();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_grid_and_entities() {
        let config = small_map();

        let first: Vec<_> = MapGenerator::new(config.clone(), seeded_rng(42))
            .populate()
            .into_cells()
            .collect();
        let second: Vec<_> = MapGenerator::new(config.clone(), seeded_rng(42))
            .populate()
            .into_cells()
            .collect();
        assert_eq!(first, second);

        let (_, summary_a) = generate(&config, 42);
        let (_, summary_b) = generate(&config, 42);
        let names_a: Vec<_> = summary_a.placements.iter().map(|p| (&p.name, &p.transform)).collect();
        let names_b: Vec<_> = summary_b.placements.iter().map(|p| (&p.name, &p.transform)).collect();
        assert_eq!(names_a, names_b);
        assert_eq!(summary_a.hay, summary_b.hay);
        assert_eq!(summary_a.trees, summary_b.trees);
        assert_eq!(summary_a.barns, summary_b.barns);
    }

    #[test]
    fn test_retained_points_stay_inside_grid() {
        let config = MapConfig {
            width: 400,
            height: 300,
            ..MapConfig::default()
        };
        for seed in 0..4 {
            let grid = MapGenerator::new(config.clone(), seeded_rng(seed)).populate();
            for (cell, point) in grid.iter_cells() {
                assert!(cell.a >= 0 && (cell.a as u32) < config.grid_width(), "{cell:?}");
                assert!(cell.b >= 0 && (cell.b as u32) < config.grid_height(), "{cell:?}");
                assert_eq!(point.cell, cell);
            }
        }
    }

    #[test]
    fn test_no_origin_points_survive_clustering() {
        let grid = MapGenerator::new(small_map(), seeded_rng(3)).populate();
        assert!(grid.iter().all(|point| point.kind != PlacementKind::OriginPoint));
    }

    #[test]
    fn test_zero_sized_map_is_empty() {
        let config = MapConfig {
            width: 0,
            height: 0,
            ..MapConfig::default()
        };
        let (scene, summary) = generate(&config, 1);
        assert_eq!(summary, MapSummary::default());
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_ground_tiles_cover_the_map() {
        let (scene, summary) = generate(&small_map(), 11);
        assert_eq!(summary.ground_tiles, 4);
        assert!(scene.find_by_name("Ground0_0").is_some());
        assert!(scene.find_by_name("Ground1_1").is_some());
        assert!(scene.find_by_name("Ground2_0").is_none());
    }

    #[test]
    fn test_instantiated_nodes_match_summary() {
        let (scene, summary) = generate(&small_map(), 5);
        assert_eq!(summary.placements.len(), summary.hay + summary.trees + summary.barns);

        for placement in &summary.placements {
            let node = scene.get(placement.node).expect("placed node exists");
            assert_eq!(node.name(), placement.name);
            assert_eq!(node.transform, placement.transform);
            let transform = &placement.transform;
            match placement.kind {
                PlacementKind::Hay => {
                    assert!(node.has_tag(Tags::CAN_PICK_UP | Tags::CAN_COLLECT));
                    assert!(node.kind.as_entity().is_some_and(|e| e.is_grounded()));
                    assert_relative_eq!(transform.position.y, 0.5);
                    assert_rotation(&transform.rotation, &utils::rotation_z(HALF_PI));
                    assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
                }
                PlacementKind::Tree => {
                    assert!(node.tags().is_empty());
                    assert_relative_eq!(transform.position.y, 0.0);
                    assert_relative_eq!(transform.scale.x, transform.scale.y);
                    assert_relative_eq!(transform.scale.x, transform.scale.z);
                    assert_stepped(transform.scale.x, 1.25, 0.1, 4);
                }
                PlacementKind::Barn => {
                    assert!(node.tags().is_empty());
                    assert_relative_eq!(transform.position.y, 0.0);
                    for axis in transform.scale.iter() {
                        assert_stepped(*axis, 1.3, 0.01, 79);
                    }
                }
                other => panic!("{other:?} should not be instantiated"),
            }
        }
    }

    #[test]
    fn test_instantiate_applies_kind_transforms() {
        let mut grid = PlacementGrid::new(5, 5, 20.0);
        for object in [
            point(&grid, 10.0, 30.0, PlacementKind::Hay),
            point(&grid, 50.0, 50.0, PlacementKind::Tree),
            point(&grid, 70.0, 10.0, PlacementKind::Barn).with_rotation(90.0),
            point(&grid, 90.0, 90.0, PlacementKind::OriginPoint),
            point(&grid, 30.0, 70.0, PlacementKind::Default),
        ] {
            assert!(grid.insert(object).is_some());
        }

        let mut scene = SceneGraph::<NodeKind>::default();
        let summary = MapGenerator::new(MapConfig::default(), seeded_rng(8)).instantiate(grid, &mut scene);
        assert_eq!((summary.hay, summary.trees, summary.barns), (1, 1, 1));
        assert_eq!(summary.skipped, 2);
        assert_eq!(scene.node_count(), 4);

        let find = |kind: PlacementKind| {
            summary
                .placements
                .iter()
                .find(|placement| placement.kind == kind)
                .map(|placement| &placement.transform)
                .expect("placement of kind")
        };

        let hay = find(PlacementKind::Hay);
        assert_eq!(hay.position, Vec3::new(10.0, 0.5, 30.0));
        assert_rotation(&hay.rotation, &utils::rotation_z(HALF_PI));

        let tree = find(PlacementKind::Tree);
        assert_eq!(tree.position, Vec3::new(50.0, 0.0, 50.0));
        assert_rotation(&tree.rotation, &Quat::identity());
        assert_stepped(tree.scale.x, 1.25, 0.1, 4);

        let barn = find(PlacementKind::Barn);
        assert_eq!(barn.position, Vec3::new(70.0, 0.0, 10.0));
        assert_rotation(&barn.rotation, &utils::rotation_y(HALF_PI));
        for axis in barn.scale.iter() {
            assert_stepped(*axis, 1.3, 0.01, 79);
        }
    }
}
