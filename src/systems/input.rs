use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Held movement keys, as reported by the input collaborator.
    ///
    /// Conflicting flags are legal; opposite axes cancel out when the direction is computed.
    #[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MovementIntent: u8 {
        const FORWARD = 1 << 0;
        const BACKWARD = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl MovementIntent {
    /// Normalized input direction: `z` is forward minus backward, `x` is right minus left.
    pub fn direction(self) -> Vec3 {
        let axis = |positive: MovementIntent, negative: MovementIntent| {
            self.contains(positive) as i8 as f32 - self.contains(negative) as i8 as f32
        };
        Vec3::new(
            axis(MovementIntent::RIGHT, MovementIntent::LEFT),
            0.0,
            axis(MovementIntent::FORWARD, MovementIntent::BACKWARD),
        )
        .normalize_or_zero()
    }

    /// Whether forward or backward is held.
    pub fn longitudinal(self) -> bool {
        self.intersects(MovementIntent::FORWARD | MovementIntent::BACKWARD)
    }

    /// Whether left or right is held.
    pub fn lateral(self) -> bool {
        self.intersects(MovementIntent::LEFT | MovementIntent::RIGHT)
    }
}

/// The direction the camera is looking, supplied by the input collaborator.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LookDirection(pub Vec3);

impl Default for LookDirection {
    fn default() -> Self {
        Self(Vec3::NEG_Z)
    }
}

impl LookDirection {
    /// Horizontal forward axis. Falls back to -Z when looking straight up or down.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.0.x, 0.0, self.0.z).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Horizontal right axis, perpendicular to [`LookDirection::forward`].
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y)
    }
}

/// Whether the pointer is captured. The simulation only advances while locked.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerLock(pub bool);
