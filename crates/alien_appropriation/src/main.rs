//! Headless run of Alien Appropriation
//!
//! Usage: `alien_appropriation [config.toml|config.ron]`

use alien_appropriation::player::CollectibleKind;
use alien_appropriation::{AppError, Game, GameConfig};
use saucer_engine::config::Config;
use saucer_engine::foundation::{logging, time::Stopwatch};

fn main() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    logging::init_with_level(config.engine.level_filter()?);
    log::info!("Starting Alien Appropriation (seed {})", config.simulation.seed);

    let stopwatch = Stopwatch::start_new();
    let mut game = Game::new(&config)?;
    log::info!(
        "Scene ready in {:.1} ms with {} nodes",
        stopwatch.elapsed_millis(),
        game.scene().node_count()
    );

    if let Some(player) = game.player_state_mut() {
        player.set_tractor_beam(true);
    }

    let simulation = &config.simulation;
    for _ in 0..simulation.frames {
        let stats = game.frame();
        if simulation.collect_every > 0 && stats.frame % u64::from(simulation.collect_every) == 0 {
            game.collect(CollectibleKind::Hay);
        }
        if simulation.bomb_every > 0 && stats.frame % u64::from(simulation.bomb_every) == 0 {
            game.drop_bomb();
        }
        log::debug!(
            "Frame {}: {} submitted, {} removed",
            stats.frame,
            stats.submitted,
            stats.removed
        );
    }

    if let Some(player) = game.player_state() {
        log::info!(
            "Finished {} frames: energy {:.0}, hay {}, cows {}, bombs {}",
            simulation.frames,
            player.energy(),
            player.hay_collected(),
            player.cows_collected(),
            player.bomb_counter()
        );
    }
    log::info!(
        "Last frame drew {} objects in {} material batches",
        game.render_queue().object_count(),
        game.render_queue().batches().len()
    );
    Ok(())
}
