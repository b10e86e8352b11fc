//! Centralized error types for the simulation core.
//!
//! Gameplay conditions (collisions, capture, low sanity) are never errors; they are
//! modeled as state transitions. The only failure the simulation itself can produce
//! is a placement pass that cannot find room for an entity.

/// Main error type for the simulation.
///
/// This is the error type returned from public APIs on [`crate::game::Game`].
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<figment::Error> for GameError {
    fn from(error: figment::Error) -> Self {
        GameError::Config(Box::new(error))
    }
}

/// Errors raised by the rejection-sampling placement loop.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No candidate satisfied the clearance rules within the attempt budget.
    #[error("No valid position for {subject} after {attempts} attempts")]
    Exhausted { subject: &'static str, attempts: u32 },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
