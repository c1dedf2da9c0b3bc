//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and transforms
//! - Seeded randomness
//! - Time management
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod random;
pub mod time;
