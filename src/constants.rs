//! This module contains all the constants used in the simulation.

use glam::Vec3;

/// The fixed simulation rate the headless driver ticks at.
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Where the player (camera) starts, and where the artifact is assembled.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(2.0, 1.6, 2.0);
/// Where the antagonist appears on every start and reset.
pub const ANTAGONIST_SPAWN: Vec3 = Vec3::new(-18.0, 1.5, -18.0);

/// Maze generation parameters.
pub mod maze {
    /// Half-extent of the maze; the world spans roughly `[-MAZE_SIZE, MAZE_SIZE]` on X and Z.
    pub const MAZE_SIZE: i32 = 20;
    /// Chance that any interior cell receives a wall.
    pub const WALL_PROBABILITY: f64 = 0.3;
    /// Distance between neighbouring cell centers, in world units.
    pub const CELL_SPACING: f32 = 2.0;
    /// Interior walls closer than this to either spawn point are removed.
    pub const CLEARANCE_RADIUS: f32 = 3.0;
    /// Vertical center of every wall.
    pub const WALL_CENTER_Y: f32 = 1.5;
    /// Height of every wall.
    pub const WALL_HEIGHT: f32 = 3.0;
    /// Thickness of a single wall block, and of the boundary walls along their short axis.
    pub const WALL_THICKNESS: f32 = 2.0;
}

/// Rejection-sampling parameters used for pickup placement.
pub mod placement {
    /// Minimum distance from either spawn point.
    pub const SPAWN_CLEARANCE: f32 = 5.0;
    /// Minimum distance from any wall center.
    pub const WALL_CLEARANCE: f32 = 2.0;
    /// Minimum distance from entities placed earlier in the same pass.
    pub const ENTITY_CLEARANCE: f32 = 3.0;
    /// Candidates are drawn within `[-(size - PLACEMENT_MARGIN), size - PLACEMENT_MARGIN]` on X and Z,
    /// one unit inside the player's movement bounds.
    pub const PLACEMENT_MARGIN: f32 = 2.0;
    /// Height at which pickups float.
    pub const PICKUP_HEIGHT: f32 = 1.0;
    /// Upper bound on candidates drawn for a single placement.
    pub const MAX_ATTEMPTS: u32 = 10_000;
    /// Upper bound on full maze + pickup regenerations when building a level.
    pub const MAX_LEVEL_ATTEMPTS: u32 = 8;
}

/// Player movement integration.
pub mod movement {
    /// Exponential damping factor applied to velocity every second.
    pub const DAMPING: f32 = 5.0;
    /// Acceleration applied along held input axes.
    pub const ACCELERATION: f32 = 7.0;
    /// Per-axis velocity clamp.
    pub const MAX_VELOCITY: f32 = 7.0;
    pub const PLAYER_RADIUS: f32 = 0.5;
    pub const WALL_RADIUS: f32 = 1.0;
    pub const BOUNDARY_WALL_RADIUS: f32 = 1.5;
    /// Longest frame the simulation integrates in one go.
    pub const MAX_FRAME_SECONDS: f32 = 0.1;
}

/// Antagonist pursuit.
pub mod pursuit {
    /// Speed per tick at full sanity.
    pub const BASE_SPEED: f32 = 0.01;
    /// At zero sanity the antagonist moves `1 + SPEED_SCALE` times faster.
    pub const SPEED_SCALE: f32 = 9.0;
    pub const CAPTURE_RADIUS: f32 = 1.5;
}

/// Sanity depletion and its visual distortion.
pub mod sanity {
    pub const MAX_SANITY: f32 = 100.0;
    /// The antagonist drains sanity while it is closer than this.
    pub const PROXIMITY_RADIUS: f32 = 5.0;
    pub const PROXIMITY_DRAIN: f32 = 0.1;
    /// Chance per tick of a random one-point drop.
    pub const RANDOM_DRAIN_CHANCE: f64 = 0.01;
    pub const RANDOM_DRAIN: f32 = 1.0;
    pub const BASE_FOG: f32 = 0.15;
    /// Below this sanity the fog starts thickening.
    pub const FOG_THRESHOLD: f32 = 30.0;
    pub const FOG_PER_POINT: f32 = 0.01;
}

/// Pickups and the combined artifact.
pub mod pickup {
    pub const COLLECT_RADIUS: f32 = 1.0;
    /// How close to spawn the player must be to combine the pickups.
    pub const COMBINE_RADIUS: f32 = 3.0;
    /// Distance the thrown artifact covers per tick.
    pub const THROW_SPEED: f32 = 0.5;
    pub const HIT_RADIUS: f32 = 1.0;
}
