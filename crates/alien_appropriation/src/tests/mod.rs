//! End-to-end tests driving a whole [`Game`](crate::Game)

mod map_generation;
mod player_scenarios;
