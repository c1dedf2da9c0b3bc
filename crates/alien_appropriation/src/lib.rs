//! # Alien Appropriation
//!
//! A saucer hovers over procedurally generated farmland, lifting hay and cows
//! with its tractor beam and dropping hay bombs back down.
//!
//! The crate wires the game's node kinds, player logic, and map generator onto
//! `saucer_engine`'s scene graph and spatial tools.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod error;
pub mod game;
pub mod map;
pub mod nodes;
pub mod player;

pub use config::GameConfig;
pub use error::AppError;
pub use game::{FrameStats, Game};

#[cfg(test)]
mod tests;
