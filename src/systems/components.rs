use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec3;

/// A tag component for the entity driven by player input (the camera).
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component for the pursuing antagonist.
#[derive(Default, Component)]
pub struct Antagonist;

/// World-space position of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec3);

/// Velocity in the player's local frame: `x` is the right axis, `z` the backward axis.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec3);

/// Unit vector an entity is facing. For the antagonist this always points at the player.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec3);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec3::NEG_Z)
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
}

impl PlayerBundle {
    pub fn at(position: Vec3) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(position),
            velocity: Velocity::default(),
        }
    }
}

#[derive(Bundle)]
pub struct AntagonistBundle {
    pub antagonist: Antagonist,
    pub position: Position,
    pub facing: Facing,
}

impl AntagonistBundle {
    pub fn at(position: Vec3) -> Self {
        Self {
            antagonist: Antagonist,
            position: Position(position),
            facing: Facing::default(),
        }
    }
}

/// Elapsed time for the current tick, already clamped by the driver.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    pub seconds: f32,
}

/// The game's random source; seeded from [`crate::config::GameConfig::seed`] when set.
#[derive(Resource, Debug)]
pub struct GameRng(pub rand::rngs::SmallRng);
