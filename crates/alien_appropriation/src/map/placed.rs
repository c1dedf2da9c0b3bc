use std::fmt;

use saucer_engine::foundation::math::Vec2;
use saucer_engine::spatial::{BucketGrid, Bucketed, GridCell};

/// What a grid point will become
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Collectible hay bale
    Hay,
    /// Tree (cluster member)
    Tree,
    /// Barn (cluster member)
    Barn,
    /// Seed of a cluster; never instantiated
    OriginPoint,
    /// Suppressed by a cluster's exclusion radius; never instantiated
    Default,
}

impl PlacementKind {
    /// Asset prefix used for `{prefix}Mesh` / `{prefix}Texture` keys
    pub const fn asset_prefix(self) -> &'static str {
        match self {
            Self::Hay => "hay",
            Self::Tree => "tree",
            Self::Barn => "barn",
            Self::OriginPoint => "originPoint",
            Self::Default => "default",
        }
    }

    /// Whether points of this kind become scene nodes
    pub const fn is_instantiated(self) -> bool {
        matches!(self, Self::Hay | Self::Tree | Self::Barn)
    }
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_prefix())
    }
}

/// A generated point waiting to be turned into a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedObject {
    /// World-space `(x, z)` position
    pub position: Vec2,
    /// Grid cell, `floor(position / cell_size)`
    pub cell: GridCell,
    /// Current classification
    pub kind: PlacementKind,
    /// Yaw in degrees (barns only)
    pub rotation: f32,
}

impl PlacedObject {
    /// Unrotated point in `cell`
    pub const fn new(position: Vec2, cell: GridCell, kind: PlacementKind) -> Self {
        Self {
            position,
            cell,
            kind,
            rotation: 0.0,
        }
    }

    /// Builder: yaw in degrees
    #[must_use]
    pub const fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

impl Bucketed for PlacedObject {
    fn position(&self) -> Vec2 {
        self.position
    }
}

/// Generation grid of placed objects
pub type PlacementGrid = BucketGrid<PlacedObject>;
