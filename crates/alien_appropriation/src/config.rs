//! Game configuration
//!
//! Defaults reproduce the stock farm: 20-unit grid cells, one sample per cell,
//! 100-unit ground tiles, and a saucer hovering 40 units ahead of the camera.

use saucer_engine::config::{Config, ConfigError, Deserialize, EngineConfig, Serialize};
use saucer_engine::foundation::math::Vec3;
use saucer_engine::spatial::PoissonSampler;

/// Largest accepted `grid_width × grid_height`
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Largest accepted scatter acceleration grid, in cells
pub const MAX_SCATTER_CELLS: u64 = 1 << 22;

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine settings (logging)
    pub engine: EngineConfig,

    /// Map generation settings
    pub map: MapConfig,

    /// Player settings
    pub player: PlayerConfig,

    /// Headless simulation settings
    pub simulation: SimulationConfig,
}

/// Map generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// World width in world units
    pub width: u32,

    /// World height (depth) in world units
    pub height: u32,

    /// Side of one placement grid cell
    pub cell_size: u32,

    /// Scatter samples per grid cell
    pub density: f32,

    /// Side of one ground tile
    pub ground_tile: u32,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Distance the saucer hovers in front of the camera
    pub forward_factor: f32,

    /// Starting energy (0 - 100)
    pub energy: f32,

    /// Starting hull strength
    pub hull_strength: f32,
}

/// Headless simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random draw
    pub seed: u64,

    /// Frames to simulate
    pub frames: u32,

    /// Fixed frame time (seconds)
    pub delta_time: f32,

    /// Camera velocity for the whole run
    pub camera_velocity: Vec3,

    /// Collect one hay bale every N frames (0 disables)
    pub collect_every: u32,

    /// Drop a bomb every N frames (0 disables)
    pub bomb_every: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            cell_size: 20,
            density: 1.0,
            ground_tile: 100,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            forward_factor: 40.0,
            energy: 100.0,
            hull_strength: 100.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frames: 120,
            delta_time: 1.0 / 60.0,
            camera_velocity: Vec3::new(0.2, 0.0, -0.4),
            collect_every: 20,
            bomb_every: 45,
        }
    }
}

impl MapConfig {
    /// Grid columns, `width / cell_size`
    pub const fn grid_width(&self) -> u32 {
        match self.width.checked_div(self.cell_size) {
            Some(columns) => columns,
            None => 0,
        }
    }

    /// Grid rows, `height / cell_size`
    pub const fn grid_height(&self) -> u32 {
        match self.height.checked_div(self.cell_size) {
            Some(rows) => rows,
            None => 0,
        }
    }

    /// Points requested from the base scatter,
    /// `(grid_width + 1)(grid_height + 1) · density`.
    ///
    /// `None` when the cell product does not fit in `usize`.
    pub fn scatter_count(&self) -> Option<usize> {
        let columns = usize::try_from(self.grid_width()).ok()?.checked_add(1)?;
        let rows = usize::try_from(self.grid_height()).ok()?.checked_add(1)?;
        let cells = columns.checked_mul(rows)?;
        Some((cells as f64 * f64::from(self.density)) as usize)
    }

    /// Normalised separation of the base scatter, `1 / (density · min(grid))`
    pub fn scatter_min_distance(&self) -> f32 {
        1.0 / (self.density * self.grid_width().min(self.grid_height()) as f32)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(invalid("map.cell_size", "must be positive"));
        }
        if self.ground_tile == 0 {
            return Err(invalid("map.ground_tile", "must be positive"));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(invalid("map.density", format!("{} is not a positive number", self.density)));
        }
        let cells = u64::from(self.grid_width()) * u64::from(self.grid_height());
        if cells > MAX_GRID_CELLS {
            return Err(invalid(
                "map.width",
                format!("{cells} grid cells exceed the limit of {MAX_GRID_CELLS}"),
            ));
        }
        if cells > 0 {
            let side = PoissonSampler::new(1)
                .with_min_distance(self.scatter_min_distance())
                .grid_side() as u64;
            if side.saturating_mul(side) > MAX_SCATTER_CELLS {
                return Err(invalid(
                    "map.density",
                    format!("{} needs a {side}x{side} scatter grid", self.density),
                ));
            }
        }
        Ok(())
    }
}

impl PlayerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.energy) {
            return Err(invalid("player.energy", format!("{} outside 0..=100", self.energy)));
        }
        if !self.forward_factor.is_finite() {
            return Err(invalid("player.forward_factor", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.map.validate()?;
        self.player.validate()?;
        if !(self.simulation.delta_time.is_finite() && self.simulation.delta_time > 0.0) {
            return Err(invalid("simulation.delta_time", "must be a positive number"));
        }
        Ok(())
    }
}
