//! The player's saucer
//!
//! [`PlayerState`] holds the per-frame logic (banking, energy, weapons) and is
//! stored inside the player's scene node. [`Player`] is a handle to that node
//! for operations that add or remove other nodes, such as dropping bombs.

use saucer_engine::foundation::math::{
    constants::{HALF_PI, PI},
    utils, Quat, Transform, Vec3,
};
use saucer_engine::scene::{NodeId, SceneGraph, SceneNode, Tags};

use crate::assets;
use crate::config::PlayerConfig;
use crate::nodes::{EntityState, NodeKind};

/// Upper bound of the energy pool
pub const MAX_ENERGY: f32 = 100.0;
/// Energy regained every frame
pub const ENERGY_REGEN: f32 = 5.0;
/// At or below this level both weapons shut off
pub const LOW_ENERGY: f32 = 10.0;
/// Per-frame cost of the tractor beam
pub const TRACTOR_BEAM_DRAIN: f32 = 10.0;
/// Per-frame cost of the shield
pub const SHIELD_DRAIN: f32 = 6.0;

const TILT_STEP: f32 = PI / 20.0;
const BANK_ANGLE: f32 = PI / 16.0;
const ORBIT_RADIUS: f32 = 2.0;
const ORBIT_HEIGHT: f32 = 1.0;
const ORBIT_SCALE: f32 = 0.25;

/// Hull damage sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageType {
    /// Charging bull
    Bull,
    /// Farmer's missile
    Missile,
    /// Farmer's gun
    Gun,
}

impl DamageType {
    /// Hull points removed by one hit
    pub const fn amount(self) -> f32 {
        match self {
            Self::Bull => 10.0,
            Self::Missile => 20.0,
            Self::Gun => 5.0,
        }
    }
}

/// Things the tractor beam can bring aboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Hay bale; can be dropped again as a bomb
    Hay,
    /// Cow
    Cow,
}

/// Per-frame player logic
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    forward_factor: f32,
    tilt_x: f32,
    tilt_y: f32,
    energy: f32,
    hull_strength: f32,
    tractor_beam_on: bool,
    shielding_on: bool,
    hay_collected: u32,
    hay_picked_up: u32,
    cows_collected: u32,
    bomb_counter: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl PlayerState {
    /// Fresh player with weapons off and an empty hold
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            forward_factor: config.forward_factor,
            tilt_x: 0.0,
            tilt_y: 0.0,
            energy: config.energy.clamp(0.0, MAX_ENERGY),
            hull_strength: config.hull_strength,
            tractor_beam_on: false,
            shielding_on: false,
            hay_collected: 0,
            hay_picked_up: 0,
            cows_collected: 0,
            bomb_counter: 0,
        }
    }

    /// One frame of player logic against its own node transform.
    pub fn update(&mut self, transform: &mut Transform, camera_velocity: Vec3) {
        self.tilt_from_velocity(camera_velocity);
        transform.position = -self.forward_factor * Vec3::z();
        transform.rotate_local(utils::rotation_y(utils::deg_to_rad(1.0)));
        self.step_energy();
    }

    /// Derive banking from the camera's raw velocity
    pub fn tilt_from_velocity(&mut self, velocity: Vec3) {
        self.tilt_x = (-velocity.x * HALF_PI).clamp(-1.0, 1.0);
        self.tilt_y = (velocity.z * HALF_PI).clamp(-1.0, 1.0);
    }

    /// Weapon check followed by regeneration.
    ///
    /// At or below [`LOW_ENERGY`] both weapons switch off and nothing drains;
    /// otherwise each active weapon drains its cost. Regeneration and the
    /// clamp to `[0, MAX_ENERGY]` always follow.
    pub fn step_energy(&mut self) {
        if self.energy <= LOW_ENERGY {
            if self.tractor_beam_on || self.shielding_on {
                log::debug!("Energy at {:.0}, weapons offline", self.energy);
            }
            self.tractor_beam_on = false;
            self.shielding_on = false;
        } else {
            if self.tractor_beam_on {
                self.energy -= TRACTOR_BEAM_DRAIN;
            }
            if self.shielding_on {
                self.energy -= SHIELD_DRAIN;
            }
        }
        self.energy = (self.energy + ENERGY_REGEN).clamp(0.0, MAX_ENERGY);
    }

    /// Rotation of the saucer mesh: roll from `tilt_x`, pitch from `tilt_y`
    pub fn banking_rotation(&self) -> Quat {
        utils::rotation_z(BANK_ANGLE * self.tilt_x.sin()) * utils::rotation_x(BANK_ANGLE * self.tilt_y.sin())
    }

    /// Nudge the roll left
    pub fn tilt_left(&mut self) {
        self.tilt_x = (self.tilt_x + TILT_STEP).min(HALF_PI);
    }

    /// Nudge the roll right
    pub fn tilt_right(&mut self) {
        self.tilt_x = (self.tilt_x - TILT_STEP).max(-HALF_PI);
    }

    /// Nudge the pitch forward
    pub fn tilt_forward(&mut self) {
        self.tilt_y = (self.tilt_y + TILT_STEP).min(HALF_PI);
    }

    /// Nudge the pitch backward
    pub fn tilt_backward(&mut self) {
        self.tilt_y = (self.tilt_y - TILT_STEP).max(-HALF_PI);
    }

    /// Apply one hit to the hull
    pub fn take_damage(&mut self, damage: DamageType) {
        self.hull_strength = (self.hull_strength - damage.amount()).max(0.0);
    }

    /// Flip the tractor beam
    pub fn toggle_tractor_beam(&mut self) {
        self.tractor_beam_on = !self.tractor_beam_on;
    }

    /// Flip the shield
    pub fn toggle_shields(&mut self) {
        self.shielding_on = !self.shielding_on;
    }

    /// Switch the tractor beam
    pub fn set_tractor_beam(&mut self, on: bool) {
        self.tractor_beam_on = on;
    }

    /// Switch the shield
    pub fn set_shielding(&mut self, on: bool) {
        self.shielding_on = on;
    }

    /// Set energy, clamped to `[0, MAX_ENERGY]`
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy.clamp(0.0, MAX_ENERGY);
    }

    /// Current energy
    pub const fn energy(&self) -> f32 {
        self.energy
    }

    /// Current hull strength
    pub const fn hull_strength(&self) -> f32 {
        self.hull_strength
    }

    /// Roll input in `[-1, 1]` (or `±π/2` after manual nudges)
    pub const fn tilt_x(&self) -> f32 {
        self.tilt_x
    }

    /// Pitch input in `[-1, 1]` (or `±π/2` after manual nudges)
    pub const fn tilt_y(&self) -> f32 {
        self.tilt_y
    }

    /// Whether the tractor beam is on
    pub const fn tractor_beam_on(&self) -> bool {
        self.tractor_beam_on
    }

    /// Whether the shield is on
    pub const fn shielding_on(&self) -> bool {
        self.shielding_on
    }

    /// Hay bales in the hold
    pub const fn hay_collected(&self) -> u32 {
        self.hay_collected
    }

    /// Hay bales ever brought aboard, including ones since dropped
    pub const fn hay_picked_up(&self) -> u32 {
        self.hay_picked_up
    }

    /// Cows in the hold
    pub const fn cows_collected(&self) -> u32 {
        self.cows_collected
    }

    /// Bombs dropped so far
    pub const fn bomb_counter(&self) -> u32 {
        self.bomb_counter
    }

    /// Hover distance ahead of the camera
    pub const fn forward_factor(&self) -> f32 {
        self.forward_factor
    }
}

/// Handle to the player node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    node: NodeId,
}

impl Player {
    /// Spawn the saucer under `rig` together with its tractor beam and shield.
    ///
    /// Returns `None` if `rig` is not in the scene.
    pub fn spawn(scene: &mut SceneGraph<NodeKind>, rig: NodeId, config: &PlayerConfig) -> Option<Self> {
        let state = PlayerState::new(config);
        let node = scene.create_child(rig, "player", Some(assets::saucer()), NodeKind::Player(state))?;
        scene.create_weapon(node, "TRACTORBEAM", Some(assets::tractor_beam()), Tags::TRACTOR_BEAM, NodeKind::Plain)?;
        scene.create_weapon(node, "SHIELD", Some(assets::shield()), Tags::SHIELD, NodeKind::Plain)?;
        log::debug!("Player spawned under camera rig");
        Some(Self { node })
    }

    /// Wrap an existing player node
    pub const fn from_node(node: NodeId) -> Self {
        Self { node }
    }

    /// The player's scene node
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Player state, `None` if the node is gone or not a player
    pub fn state<'a>(&self, scene: &'a SceneGraph<NodeKind>) -> Option<&'a PlayerState> {
        scene.get(self.node)?.kind.as_player()
    }

    /// Mutable player state
    pub fn state_mut<'a>(&self, scene: &'a mut SceneGraph<NodeKind>) -> Option<&'a mut PlayerState> {
        scene.get_mut(self.node)?.kind.as_player_mut()
    }

    /// Drop one hay bale as a bomb.
    ///
    /// With an empty hold this does nothing and returns `None`. Otherwise one
    /// orbiting hay child is scheduled for deletion and a falling bomb entity
    /// is spawned at the player's world position.
    pub fn drop_bomb(&self, scene: &mut SceneGraph<NodeKind>) -> Option<NodeId> {
        let position = scene.world_position(self.node)?;
        let state = self.state_mut(scene)?;
        if state.hay_collected == 0 {
            return None;
        }
        state.hay_collected -= 1;
        state.bomb_counter += 1;
        let bomb_number = state.bomb_counter;

        let orbiting = scene
            .children_tagged(self.node, Tags::ORBITING_HAY)
            .find(|id| !scene.get(*id).is_some_and(SceneNode::is_marked_for_deletion));
        if let Some(orbiting) = orbiting {
            scene.mark_for_deletion(orbiting);
        }

        let bomb = scene.create_node(
            format!("hayBomb{bomb_number}"),
            Some(assets::hay()),
            NodeKind::Entity(EntityState::falling()),
        );
        if let Some(node) = scene.get_mut(bomb) {
            node.transform.position = position;
            node.add_tag(Tags::BOMB);
        }
        log::debug!("Dropped bomb #{bomb_number} at {position:?}");
        Some(bomb)
    }

    /// Bring `kind` aboard: bump the matching counter and add a small
    /// decorative node orbiting the saucer.
    pub fn add_collected(&self, scene: &mut SceneGraph<NodeKind>, kind: CollectibleKind) -> Option<NodeId> {
        let state = self.state_mut(scene)?;
        let (name, renderable, tags) = match kind {
            CollectibleKind::Hay => {
                state.hay_collected += 1;
                state.hay_picked_up += 1;
                (format!("orbiting_hay{}", state.hay_picked_up), assets::hay(), Tags::ORBITING_HAY)
            }
            CollectibleKind::Cow => {
                state.cows_collected += 1;
                (format!("orbiting_cow{}", state.cows_collected), assets::cow(), Tags::empty())
            }
        };

        let child = scene.create_child(self.node, name, Some(renderable), NodeKind::Plain)?;
        let slot = scene.get(self.node).map_or(0, |node| node.children().len()) as f32;
        if let Some(node) = scene.get_mut(child) {
            node.add_tag(tags);
            node.transform = Transform::from_position(Vec3::new(
                ORBIT_RADIUS * slot.cos(),
                ORBIT_HEIGHT,
                ORBIT_RADIUS * slot.sin(),
            ))
            .with_uniform_scale(ORBIT_SCALE);
        }
        log::debug!("Collected {kind:?}");
        Some(child)
    }
}
