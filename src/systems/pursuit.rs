use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res, Single},
};
use glam::Vec3;
use tracing::{debug, trace};

use crate::constants::{pursuit, sanity::MAX_SANITY};
use crate::events::StageTransition;
use crate::systems::{Antagonist, Facing, PlayerControlled, Position, Sanity};

/// The outcome of one pursuit step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitStep {
    pub position: Vec3,
    /// Unit vector from the antagonist's old position toward the player.
    pub facing: Vec3,
    pub captured: bool,
}

/// Antagonist speed per tick: `BASE_SPEED` at full sanity, ten times that at zero.
pub fn antagonist_speed(sanity: f32) -> f32 {
    let sanity = sanity.clamp(0.0, MAX_SANITY);
    pursuit::BASE_SPEED * (1.0 + ((MAX_SANITY - sanity) / MAX_SANITY) * pursuit::SPEED_SCALE)
}

/// Whether the antagonist at `distance` from the player has caught them. Exactly `CAPTURE_RADIUS` is not a capture.
pub fn is_capture(distance: f32) -> bool {
    distance < pursuit::CAPTURE_RADIUS
}

/// Moves the antagonist straight toward the player and reports whether it is now within capture range.
///
/// Capture is judged on the post-step distance.
pub fn pursuit_step(antagonist: Vec3, player: Vec3, sanity: f32) -> PursuitStep {
    let facing = (player - antagonist).normalize_or_zero();
    let position = antagonist + facing * antagonist_speed(sanity);

    PursuitStep {
        position,
        facing,
        captured: is_capture(position.distance(player)),
    }
}

/// Chases the player. Does nothing while no antagonist exists.
pub fn pursuit_system(
    sanity: Res<Sanity>,
    player: Single<&Position, With<PlayerControlled>>,
    mut antagonist: Query<(&mut Position, &mut Facing), (With<Antagonist>, Without<PlayerControlled>)>,
    mut transitions: EventWriter<StageTransition>,
) {
    let Ok((mut position, mut facing)) = antagonist.single_mut() else {
        return;
    };

    let result = pursuit_step(position.0, player.0, sanity.0);
    position.0 = result.position;
    if result.facing != Vec3::ZERO {
        facing.0 = result.facing;
    }

    trace!(position = ?result.position, speed = antagonist_speed(sanity.0), "Antagonist advanced");

    if result.captured {
        debug!(distance = result.position.distance(player.0), "Antagonist reached the player");
        transitions.write(StageTransition::Captured);
    }
}
