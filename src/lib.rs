//! Horror maze simulation core.
//!
//! A player collects three colored pickups in a randomly generated maze, returns to spawn to
//! assemble an artifact and throws it at a pursuing antagonist, while sanity drains and the
//! fog thickens.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod logging;
pub mod map;
pub mod systems;
