use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::events::{LifecycleEvent, StageTransition};
use crate::systems::{Antagonist, MovementIntent, PickupManager, PointerLock, Sanity};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// Waiting for the first primary action.
    #[default]
    Idle,
    /// The main gameplay loop is active, as long as the pointer is locked.
    Playing,
    /// The antagonist caught the player.
    GameOver,
    /// The artifact hit the antagonist.
    Won,
}

impl GameStage {
    /// Whether the round is over and a primary action should start a new one.
    pub fn is_finished(self) -> bool {
        matches!(self, GameStage::GameOver | GameStage::Won)
    }
}

/// Run condition for the gameplay systems: only while playing with the pointer locked.
pub fn simulation_active(stage: Res<GameStage>, lock: Res<PointerLock>) -> bool {
    *stage == GameStage::Playing && lock.0
}

/// Resolves transition requests raised during the tick.
///
/// The first request handled ends the round; anything after it in the same tick is ignored.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    mut lock: ResMut<PointerLock>,
    mut intent: ResMut<MovementIntent>,
    mut sanity: ResMut<Sanity>,
    mut pickups: ResMut<PickupManager>,
    antagonists: Query<Entity, With<Antagonist>>,
    mut commands: Commands,
    mut transitions: EventReader<StageTransition>,
    mut events: EventWriter<LifecycleEvent>,
) {
    for transition in transitions.read() {
        if *stage != GameStage::Playing {
            debug!(?transition, stage = ?*stage, "Ignoring stage transition");
            continue;
        }

        match transition {
            StageTransition::Captured => {
                info!("The antagonist caught the player");
                *stage = GameStage::GameOver;
                sanity.0 = 0.0;
                events.write(LifecycleEvent::GameOver);
            }
            StageTransition::ArtifactHit => {
                info!("The artifact struck the antagonist");
                *stage = GameStage::Won;
                for entity in &antagonists {
                    commands.entity(entity).despawn();
                }
                pickups.clear_artifact();
                events.write(LifecycleEvent::Won);
            }
        }

        *intent = MovementIntent::empty();
        if lock.0 {
            lock.0 = false;
            events.write(LifecycleEvent::Unlocked);
        }
    }
}
