//! Scene setup and the per-frame loop

use saucer_engine::foundation::{random::seeded_rng, time::Timer};
use saucer_engine::scene::{FollowCamera, FrameContext, NodeId, RenderQueue, SceneGraph};

use crate::config::GameConfig;
use crate::error::AppError;
use crate::map::{MapGenerator, MapSummary};
use crate::nodes::NodeKind;
use crate::player::{CollectibleKind, Player, PlayerState};

/// Result of one simulated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Nodes removed by the delete sweep
    pub removed: usize,
    /// Objects submitted to the renderer
    pub submitted: usize,
}

/// A running game: scene, camera, player, and the generated map
pub struct Game {
    scene: SceneGraph<NodeKind>,
    camera: FollowCamera,
    rig: NodeId,
    player: Player,
    timer: Timer,
    render_queue: RenderQueue,
    summary: MapSummary,
}

impl Game {
    /// Build the scene: camera rig, player with weapons, then the map
    pub fn new(config: &GameConfig) -> Result<Self, AppError> {
        let mut scene = SceneGraph::<NodeKind>::default();
        let rig = scene.create_node("camera", None, NodeKind::CameraRig);
        let player = Player::spawn(&mut scene, rig, &config.player)
            .ok_or_else(|| AppError::Setup("camera rig missing when spawning the player".to_string()))?;

        let mut generator = MapGenerator::new(config.map.clone(), seeded_rng(config.simulation.seed));
        let summary = generator.generate(&mut scene);

        let mut camera = FollowCamera::default();
        camera.set_velocity(config.simulation.camera_velocity);

        Ok(Self {
            scene,
            camera,
            rig,
            player,
            timer: Timer::fixed(config.simulation.delta_time),
            render_queue: RenderQueue::new(),
            summary,
        })
    }

    /// Advance one frame: move the camera, update, sweep, then draw
    pub fn frame(&mut self) -> FrameStats {
        let delta_time = self.timer.tick();
        self.camera.advance(delta_time);

        let ctx = FrameContext {
            delta_time,
            camera: &self.camera,
        };
        let removed = self.scene.update(&ctx);
        let submitted = self.scene.draw(&self.camera, &mut self.render_queue);

        FrameStats {
            frame: self.timer.frame_count(),
            removed,
            submitted,
        }
    }

    /// Bring one `kind` aboard
    pub fn collect(&mut self, kind: CollectibleKind) -> Option<NodeId> {
        self.player.add_collected(&mut self.scene, kind)
    }

    /// Drop a hay bomb if any hay is aboard
    pub fn drop_bomb(&mut self) -> Option<NodeId> {
        self.player.drop_bomb(&mut self.scene)
    }

    /// Player state
    pub fn player_state(&self) -> Option<&PlayerState> {
        self.player.state(&self.scene)
    }

    /// Mutable player state, e.g. to switch weapons
    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        self.player.state_mut(&mut self.scene)
    }

    /// The scene tree
    pub const fn scene(&self) -> &SceneGraph<NodeKind> {
        &self.scene
    }

    /// The camera rig node the player hangs from
    pub const fn rig(&self) -> NodeId {
        self.rig
    }

    /// The player handle
    pub const fn player(&self) -> Player {
        self.player
    }

    /// Mutable camera, for steering
    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    /// Output of the most recent draw
    pub const fn render_queue(&self) -> &RenderQueue {
        &self.render_queue
    }

    /// What map generation produced
    pub const fn summary(&self) -> &MapSummary {
        &self.summary
    }
}
