use bevy_ecs::event::Event;

use crate::systems::PickupColor;

/// Signals emitted to the UI and audio collaborators.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The pointer was captured; the simulation is running.
    Locked,
    /// The pointer was released; the simulation is suspended.
    Unlocked,
    PickupCollected(PickupColor),
    ArtifactCreated,
    ArtifactThrown,
    GameOver,
    Won,
    /// A fresh round was set up.
    Reset,
}

/// Requests raised by gameplay systems and resolved by the stage system at the end of the tick.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTransition {
    /// The antagonist reached the player.
    Captured,
    /// The thrown artifact reached the antagonist.
    ArtifactHit,
}
