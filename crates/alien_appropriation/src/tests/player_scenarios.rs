//! Player behaviour through full frames of a running game

use crate::config::{GameConfig, MapConfig};
use crate::player::{CollectibleKind, MAX_ENERGY};
use crate::Game;
use approx::assert_relative_eq;
use rand::Rng;
use saucer_engine::foundation::random::seeded_rng;
use saucer_engine::scene::Tags;

fn small_game() -> Game {
    let config = GameConfig {
        map: MapConfig {
            width: 100,
            height: 100,
            cell_size: 20,
            ground_tile: 50,
            ..MapConfig::default()
        },
        ..GameConfig::default()
    };
    Game::new(&config).expect("game builds")
}

fn submitted_meshes(game: &Game) -> Vec<String> {
    game.render_queue()
        .objects()
        .iter()
        .map(|object| object.renderable.mesh.clone())
        .collect()
}

fn orbiting_hay(game: &Game) -> usize {
    game.scene()
        .children_tagged(game.player().node(), Tags::ORBITING_HAY)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bombs_from_three_hay() {
        let mut game = small_game();
        for _ in 0..3 {
            assert!(game.collect(CollectibleKind::Hay).is_some());
        }
        assert_eq!(orbiting_hay(&game), 3);

        let first = game.drop_bomb().expect("first bomb");
        let second = game.drop_bomb().expect("second bomb");

        let state = game.player_state().expect("player state");
        assert_eq!(state.hay_collected(), 1);
        assert_eq!(state.bomb_counter(), 2);
        assert_eq!(game.scene().find_by_name("hayBomb1"), Some(first));
        assert_eq!(game.scene().find_by_name("hayBomb2"), Some(second));
        for bomb in [first, second] {
            assert!(game.scene().get(bomb).is_some_and(|node| node.has_tag(Tags::BOMB)));
        }

        // Orbiting hay is only marked until the next sweep.
        assert_eq!(orbiting_hay(&game), 3);
        let stats = game.frame();
        assert_eq!(stats.removed, 2);
        assert_eq!(orbiting_hay(&game), 1);
        assert!(game.scene().contains(first));
        assert!(game.scene().contains(second));
    }

    #[test]
    fn test_orbiting_names_stay_unique_after_drops() {
        let mut game = small_game();
        for _ in 0..3 {
            game.collect(CollectibleKind::Hay);
        }
        game.drop_bomb();
        game.frame();
        let latest = game.collect(CollectibleKind::Hay).expect("collected");

        let scene = game.scene();
        let mut names: Vec<&str> = scene
            .get(game.player().node())
            .expect("player node")
            .children()
            .iter()
            .filter_map(|&id| scene.get(id).map(|node| node.name()))
            .collect();
        assert_eq!(names.len(), 3);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 3, "duplicate child names: {names:?}");

        assert_eq!(scene.find_by_name("orbiting_hay4"), Some(latest));
        let state = game.player_state().expect("player state");
        assert_eq!(state.hay_collected(), 3);
        assert_eq!(state.hay_picked_up(), 4);
    }

    #[test]
    fn test_drop_bomb_with_empty_hold_is_a_no_op() {
        let mut game = small_game();
        let nodes_before = game.scene().node_count();

        assert!(game.drop_bomb().is_none());

        let state = game.player_state().expect("player state");
        assert_eq!(state.hay_collected(), 0);
        assert_eq!(state.bomb_counter(), 0);
        assert_eq!(game.scene().node_count(), nodes_before);
    }

    #[test]
    fn test_bombs_fall_to_the_ground() {
        let mut game = small_game();
        game.collect(CollectibleKind::Hay);
        let bomb = game.drop_bomb().expect("bomb");

        for _ in 0..600 {
            game.frame();
        }
        let node = game.scene().get(bomb).expect("bomb still in scene");
        assert_relative_eq!(node.transform.position.y, 0.0);
        assert!(node.kind.as_entity().is_some_and(|entity| entity.is_grounded()));
    }

    #[test]
    fn test_collected_cows_do_not_count_as_hay() {
        let mut game = small_game();
        game.collect(CollectibleKind::Cow);
        game.collect(CollectibleKind::Cow);

        let state = game.player_state().expect("player state");
        assert_eq!(state.cows_collected(), 2);
        assert_eq!(state.hay_collected(), 0);
        assert_eq!(orbiting_hay(&game), 0);
        assert!(game.scene().find_by_name("orbiting_cow2").is_some());
        assert!(game.drop_bomb().is_none());
    }

    #[test]
    fn test_low_energy_shuts_weapons_off_in_one_frame() {
        let mut game = small_game();
        let state = game.player_state_mut().expect("player state");
        state.set_energy(5.0);
        state.set_tractor_beam(true);
        state.set_shielding(true);

        game.frame();

        let state = game.player_state().expect("player state");
        assert!(!state.tractor_beam_on());
        assert!(!state.shielding_on());
        assert_relative_eq!(state.energy(), 10.0);
    }

    #[test]
    fn test_energy_stays_in_range_under_random_toggles() {
        let mut game = small_game();
        let mut rng = seeded_rng(99);
        for _ in 0..300 {
            let state = game.player_state_mut().expect("player state");
            if rng.gen_bool(0.3) {
                state.toggle_tractor_beam();
            }
            if rng.gen_bool(0.3) {
                state.toggle_shields();
            }
            game.frame();
            let energy = game.player_state().expect("player state").energy();
            assert!((0.0..=MAX_ENERGY).contains(&energy), "energy {energy}");
        }
    }

    #[test]
    fn test_weapons_draw_only_while_active() {
        let mut game = small_game();
        game.frame();
        let meshes = submitted_meshes(&game);
        assert!(meshes.iter().any(|mesh| mesh == "saucerMesh"));
        assert!(!meshes.iter().any(|mesh| mesh == "tractorBeamMesh"));
        assert!(!meshes.iter().any(|mesh| mesh == "shieldMesh"));

        game.player_state_mut().expect("player state").set_tractor_beam(true);
        game.frame();
        let meshes = submitted_meshes(&game);
        assert!(meshes.iter().any(|mesh| mesh == "tractorBeamMesh"));
        assert!(!meshes.iter().any(|mesh| mesh == "shieldMesh"));
    }

    #[test]
    fn test_player_rides_ahead_of_the_camera() {
        let mut game = small_game();
        game.frame();
        game.frame();

        let camera = game.scene().world_position(game.rig()).expect("rig");
        let player = game.scene().world_position(game.player().node()).expect("player");
        let forward = game.player_state().expect("player state").forward_factor();
        assert_relative_eq!((player - camera).norm(), forward, epsilon = 1e-3);
    }
}
