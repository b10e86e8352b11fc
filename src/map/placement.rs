//! Clearance rules and bounded rejection sampling for entity placement.

use glam::Vec3;
use rand::Rng;
use tracing::trace;

use crate::constants::placement;
use crate::error::PlacementError;
use crate::map::builder::Wall;

/// Everything a candidate position is checked against.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub spawn: Vec3,
    pub antagonist_spawn: Vec3,
    pub walls: &'a [Wall],
    /// Entities already placed in the same pass.
    pub existing: &'a [Vec3],
}

impl<'a> PlacementContext<'a> {
    pub fn new(spawn: Vec3, antagonist_spawn: Vec3, walls: &'a [Wall], existing: &'a [Vec3]) -> Self {
        Self {
            spawn,
            antagonist_spawn,
            walls,
            existing,
        }
    }

    /// The same context with a different set of already-placed entities.
    pub fn with_existing<'b>(&self, existing: &'b [Vec3]) -> PlacementContext<'b>
    where
        'a: 'b,
    {
        PlacementContext {
            spawn: self.spawn,
            antagonist_spawn: self.antagonist_spawn,
            walls: self.walls,
            existing,
        }
    }
}

/// Checks a candidate against every clearance rule.
pub fn is_valid(position: Vec3, context: &PlacementContext) -> bool {
    if position.distance(context.spawn) < placement::SPAWN_CLEARANCE {
        return false;
    }
    if position.distance(context.antagonist_spawn) < placement::SPAWN_CLEARANCE {
        return false;
    }
    if context
        .walls
        .iter()
        .any(|wall| position.distance(wall.position) < placement::WALL_CLEARANCE)
    {
        return false;
    }

    !context
        .existing
        .iter()
        .any(|other| position.distance(*other) < placement::ENTITY_CLEARANCE)
}

/// Draws uniform candidates in `[-extent, extent]` on X and Z (at `height`) until one is valid.
///
/// # Errors
///
/// Returns [`PlacementError::Exhausted`] once `max_attempts` candidates have been rejected.
pub fn find_valid_position<R: Rng + ?Sized>(
    rng: &mut R,
    context: &PlacementContext,
    extent: f32,
    height: f32,
    max_attempts: u32,
    subject: &'static str,
) -> Result<Vec3, PlacementError> {
    for attempt in 1..=max_attempts {
        let candidate = Vec3::new(
            rng.random_range(-extent..=extent),
            height,
            rng.random_range(-extent..=extent),
        );

        if is_valid(candidate, context) {
            trace!(subject, attempt, position = ?candidate, "Placement found");
            return Ok(candidate);
        }
    }

    Err(PlacementError::Exhausted {
        subject,
        attempts: max_attempts,
    })
}
