use bevy_ecs::{
    query::With,
    system::{Res, Single},
};
use glam::Vec3;
use tracing::trace;

use crate::constants::movement;
use crate::map::builder::{Maze, WallKind};
use crate::systems::{DeltaTime, LookDirection, MovementIntent, PlayerControlled, Position, Velocity};

/// Why a proposed displacement was discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blocked {
    /// The move would leave the maze's inner boundary.
    OutOfBounds,
    /// The move came within collision range of a wall.
    Wall { index: usize, kind: WallKind },
}

/// The outcome of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStep {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Set when the step was rolled back to the starting position.
    pub blocked: Option<Blocked>,
}

/// Damps, accelerates and clamps the local-frame velocity for one tick.
///
/// Damping is `v -= v * DAMPING * dt`, floored so that a very long frame can at most bring
/// the velocity to rest. Acceleration only applies along axes whose keys are held.
pub fn integrate_velocity(velocity: Vec3, intent: MovementIntent, dt: f32) -> Vec3 {
    let damping = (1.0 - movement::DAMPING * dt).max(0.0);
    let mut velocity = Vec3::new(velocity.x * damping, velocity.y, velocity.z * damping);

    let direction = intent.direction();
    if intent.longitudinal() {
        velocity.z -= direction.z * movement::ACCELERATION * dt;
    }
    if intent.lateral() {
        velocity.x -= direction.x * movement::ACCELERATION * dt;
    }

    velocity.x = velocity.x.clamp(-movement::MAX_VELOCITY, movement::MAX_VELOCITY);
    velocity.z = velocity.z.clamp(-movement::MAX_VELOCITY, movement::MAX_VELOCITY);
    velocity
}

/// Converts a local-frame velocity into a world-space displacement for this tick.
///
/// Positive `x` velocity moves the view left and positive `z` moves it backward, matching the
/// first-person controller the velocity is integrated for.
pub fn displacement(velocity: Vec3, look: LookDirection, dt: f32) -> Vec3 {
    look.right() * (-velocity.x * dt) + look.forward() * (-velocity.z * dt)
}

/// Checks a proposed position against the maze bounds and then every wall.
///
/// The first wall in range wins; there is no sliding or minimum-translation resolution.
pub fn check_collision(proposed: Vec3, maze: &Maze) -> Option<Blocked> {
    let limit = maze.boundary_limit();
    if proposed.x.abs() > limit || proposed.z.abs() > limit {
        return Some(Blocked::OutOfBounds);
    }

    maze.walls().iter().enumerate().find_map(|(index, wall)| {
        let kind = wall.kind();
        let radius = movement::PLAYER_RADIUS + kind.collision_radius();
        (proposed.distance(wall.position) < radius).then_some(Blocked::Wall { index, kind })
    })
}

/// Runs one full movement step: velocity integration, displacement and collision rollback.
///
/// When the displaced position is illegal, the returned position is `position` exactly.
/// The velocity is kept either way.
pub fn movement_step(
    intent: MovementIntent,
    look: LookDirection,
    dt: f32,
    position: Vec3,
    velocity: Vec3,
    maze: &Maze,
) -> MovementStep {
    let velocity = integrate_velocity(velocity, intent, dt);
    let proposed = position + displacement(velocity, look, dt);

    match check_collision(proposed, maze) {
        Some(blocked) => MovementStep {
            position,
            velocity,
            blocked: Some(blocked),
        },
        None => MovementStep {
            position: proposed,
            velocity,
            blocked: None,
        },
    }
}

/// Moves the player according to the held input, rolling back illegal moves.
pub fn player_movement_system(
    delta_time: Res<DeltaTime>,
    intent: Res<MovementIntent>,
    look: Res<LookDirection>,
    maze: Res<Maze>,
    player: Single<(&mut Position, &mut Velocity), With<PlayerControlled>>,
) {
    let (mut position, mut velocity) = player.into_inner();
    let result = movement_step(*intent, *look, delta_time.seconds, position.0, velocity.0, &maze);

    if let Some(blocked) = result.blocked {
        trace!(position = ?position.0, ?blocked, "Player move rolled back");
    }

    velocity.0 = result.velocity;
    position.0 = result.position;
}
