use bevy_ecs::{
    query::{With, Without},
    resource::Resource,
    system::{Query, ResMut, Single},
};
use rand::Rng;
use tracing::trace;

use crate::constants::sanity;
use crate::systems::{Antagonist, GameRng, PlayerControlled, Position};

/// The player's sanity, kept within `0..=MAX_SANITY`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Sanity(pub f32);

impl Default for Sanity {
    fn default() -> Self {
        Self(sanity::MAX_SANITY)
    }
}

impl Sanity {
    /// The value shown to the player.
    pub fn display(&self) -> u8 {
        self.0.clamp(0.0, sanity::MAX_SANITY).round() as u8
    }

    /// Fog density matching the current sanity.
    pub fn fog_intensity(&self) -> f32 {
        fog_intensity(self.0)
    }
}

/// Drains sanity while the antagonist is within `PROXIMITY_RADIUS`.
pub fn decay(distance_to_antagonist: f32, sanity: f32) -> f32 {
    if distance_to_antagonist < sanity::PROXIMITY_RADIUS {
        (sanity - sanity::PROXIMITY_DRAIN).max(0.0)
    } else {
        sanity
    }
}

/// Occasionally knocks a point off sanity. Returns the new sanity and the matching fog intensity.
pub fn tick<R: Rng + ?Sized>(sanity: f32, rng: &mut R) -> (f32, f32) {
    let sanity = if rng.random_bool(sanity::RANDOM_DRAIN_CHANCE) {
        (sanity - sanity::RANDOM_DRAIN).max(0.0)
    } else {
        sanity
    };
    (sanity, fog_intensity(sanity))
}

/// Base fog at or above `FOG_THRESHOLD`, thickening linearly as sanity falls below it.
pub fn fog_intensity(sanity: f32) -> f32 {
    if sanity >= sanity::FOG_THRESHOLD {
        sanity::BASE_FOG
    } else {
        sanity::BASE_FOG + (sanity::FOG_THRESHOLD - sanity.max(0.0)) * sanity::FOG_PER_POINT
    }
}

/// Applies proximity and random sanity drain for this tick.
pub fn sanity_system(
    mut sanity: ResMut<Sanity>,
    mut rng: ResMut<GameRng>,
    player: Single<&Position, With<PlayerControlled>>,
    antagonist: Query<&Position, (With<Antagonist>, Without<PlayerControlled>)>,
) {
    let before = sanity.0;

    if let Ok(antagonist) = antagonist.single() {
        sanity.0 = decay(antagonist.0.distance(player.0), sanity.0);
    }

    let (after, fog) = tick(sanity.0, &mut rng.0);
    sanity.0 = after.min(sanity::MAX_SANITY);

    if sanity.0 != before {
        trace!(sanity = sanity.0, fog, "Sanity drained");
    }
}
