//! Node kinds of the farm scene

use saucer_engine::foundation::math::{Quat, Transform, Vec3};
use saucer_engine::scene::{Camera, FrameContext, NodeBehavior, NodeState, Tags};

use crate::player::PlayerState;

/// Downward acceleration for ungrounded entities, units/s²
pub const GRAVITY: f32 = 9.81;

/// Height of the ground plane
pub const GROUND_LEVEL: f32 = 0.0;

/// Every kind of node the game places in the scene
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    /// Decorative or grouping node with no behavior
    #[default]
    Plain,
    /// Interactive prop (hay bales, bombs)
    Entity(EntityState),
    /// Mirrors the camera pose so its children move with the view
    CameraRig,
    /// The player's saucer
    Player(PlayerState),
}

impl NodeKind {
    /// Player state, if this is the player
    pub const fn as_player(&self) -> Option<&PlayerState> {
        match self {
            Self::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable player state, if this is the player
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match self {
            Self::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Entity state, if this is an entity
    pub const fn as_entity(&self) -> Option<&EntityState> {
        match self {
            Self::Entity(state) => Some(state),
            _ => None,
        }
    }
}

impl NodeBehavior for NodeKind {
    fn update(&mut self, node: &mut NodeState<'_>, ctx: &FrameContext<'_>) {
        match self {
            Self::Plain => {}
            Self::Entity(entity) => entity.update(node.transform, ctx.delta_time),
            Self::CameraRig => {
                node.transform.position = ctx.camera.position();
                node.transform.rotation = ctx.camera.orientation();
            }
            Self::Player(player) => player.update(node.transform, ctx.camera.velocity()),
        }
    }

    fn geometry_rotation(&self, transform: &Transform) -> Quat {
        match self {
            Self::Player(player) => player.banking_rotation(),
            _ => transform.rotation,
        }
    }

    fn weapon_active(&self, weapon_tags: Tags) -> bool {
        match self {
            Self::Player(player) => {
                (player.tractor_beam_on() && weapon_tags.contains(Tags::TRACTOR_BEAM))
                    || (player.shielding_on() && weapon_tags.contains(Tags::SHIELD))
            }
            _ => false,
        }
    }
}

/// State of an interactive prop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityState {
    grounded: bool,
    vertical_velocity: f32,
}

impl EntityState {
    /// Entity resting on the ground
    pub const fn grounded() -> Self {
        Self {
            grounded: true,
            vertical_velocity: 0.0,
        }
    }

    /// Entity that falls until it reaches the ground
    pub const fn falling() -> Self {
        Self {
            grounded: false,
            vertical_velocity: 0.0,
        }
    }

    /// Whether the entity is resting
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn update(&mut self, transform: &mut Transform, delta_time: f32) {
        if self.grounded {
            return;
        }
        self.vertical_velocity -= GRAVITY * delta_time;
        transform.position += Vec3::y() * (self.vertical_velocity * delta_time);
        if transform.position.y <= GROUND_LEVEL {
            transform.position.y = GROUND_LEVEL;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }
    }
}
