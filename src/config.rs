use bevy_ecs::resource::Resource;
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::constants::{maze, movement, placement, ANTAGONIST_SPAWN, PLAYER_SPAWN};
use crate::error::{GameError, GameResult};

/// Environment variables with this prefix override [`GameConfig`] fields, e.g. `HORROR_MAZE_SEED=7`.
pub const ENV_PREFIX: &str = "HORROR_MAZE_";

/// Tunables for a game session.
///
/// Defaults mirror [`crate::constants`]; only values that a driver or a test may
/// reasonably want to vary live here.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for every random decision. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Half-extent of the maze.
    pub maze_size: i32,
    /// Chance that an interior cell receives a wall.
    pub wall_probability: f64,
    /// Candidates drawn per placement before giving up.
    pub max_placement_attempts: u32,
    /// Full maze + pickup regenerations tried before a level build fails.
    pub max_level_attempts: u32,
    /// Whether a reset builds a fresh maze or keeps the current walls.
    pub regenerate_maze_on_reset: bool,
    /// Longest elapsed time integrated in a single tick.
    pub max_frame_seconds: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            maze_size: maze::MAZE_SIZE,
            wall_probability: maze::WALL_PROBABILITY,
            max_placement_attempts: placement::MAX_ATTEMPTS,
            max_level_attempts: placement::MAX_LEVEL_ATTEMPTS,
            regenerate_maze_on_reset: true,
            max_frame_seconds: movement::MAX_FRAME_SECONDS,
        }
    }
}

impl GameConfig {
    /// Loads the configuration, layering `HORROR_MAZE_*` environment variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if a variable cannot be parsed, and `GameError::InvalidState`
    /// if the result fails [`GameConfig::validate`].
    pub fn from_env() -> GameResult<Self> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    ///
    /// Both spawn points must lie inside the maze's movement bounds, the wall probability must
    /// be a number and the frame cap must be finite and positive.
    pub fn validate(&self) -> GameResult<()> {
        if !self.max_frame_seconds.is_finite() || self.max_frame_seconds <= 0.0 {
            return Err(GameError::InvalidState(format!(
                "max_frame_seconds must be finite and positive, got {}",
                self.max_frame_seconds
            )));
        }
        if self.wall_probability.is_nan() {
            return Err(GameError::InvalidState("wall_probability must be a number".to_string()));
        }

        let limit = self.maze_size.saturating_sub(1) as f32;
        let reach = [PLAYER_SPAWN, ANTAGONIST_SPAWN]
            .iter()
            .map(|spawn| spawn.x.abs().max(spawn.z.abs()))
            .fold(0.0, f32::max);
        if reach >= limit {
            return Err(GameError::InvalidState(format!(
                "maze_size {} is too small to hold both spawn points",
                self.maze_size
            )));
        }
        Ok(())
    }

    /// The provider stack used by [`GameConfig::from_env`].
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(GameConfig::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// A default configuration with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
