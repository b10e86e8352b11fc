use std::fmt;

use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    resource::Resource,
    system::{Query, Res, ResMut, Single},
};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use tracing::{debug, info, trace};

use crate::constants::{pickup, placement};
use crate::error::PlacementError;
use crate::events::{LifecycleEvent, StageTransition};
use crate::map::builder::Maze;
use crate::map::placement::{find_valid_position, PlacementContext};
use crate::systems::{Antagonist, PlayerControlled, Position};

/// The three collectible colors. All of them are needed to assemble the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PickupColor {
    Red,
    Blue,
    Yellow,
}

impl PickupColor {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The symbol used for this color in the objective text.
    pub fn symbol(self) -> &'static str {
        match self {
            PickupColor::Red => "🔴",
            PickupColor::Blue => "🔵",
            PickupColor::Yellow => "🟡",
        }
    }
}

/// An uncollected pickup lying in the maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub color: PickupColor,
    pub position: Vec3,
}

/// Lifecycle of the combined artifact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArtifactState {
    /// Not every pickup has been brought back to spawn yet.
    #[default]
    Unavailable,
    /// Assembled and carried by the player, waiting to be thrown.
    Ready { position: Vec3 },
    /// Travelling along a straight line at `THROW_SPEED` per tick.
    InFlight { position: Vec3, direction: Vec3 },
}

impl ArtifactState {
    pub fn position(&self) -> Option<Vec3> {
        match *self {
            ArtifactState::Unavailable => None,
            ArtifactState::Ready { position } | ArtifactState::InFlight { position, .. } => Some(position),
        }
    }
}

/// What advancing the artifact did this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStep {
    /// Nothing is in flight.
    Grounded,
    Moved(Vec3),
    /// The artifact came within `HIT_RADIUS` of the antagonist.
    Hit(Vec3),
}

/// The current objective, rendered as the HUD's objective text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    Collect(SmallVec<[PickupColor; 3]>),
    ReturnToSpawn,
    Throw,
    InFlight,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Collect(remaining) => {
                write!(f, "Collect:")?;
                for color in remaining {
                    write!(f, " {}", color.symbol())?;
                }
                Ok(())
            }
            Objective::ReturnToSpawn => write!(f, "Return to spawn to create the Rainbow Block!"),
            Objective::Throw => write!(f, "Throw the Rainbow Block at Smiley! (Click to throw)"),
            Objective::InFlight => write!(f, "The Rainbow Block is in flight..."),
        }
    }
}

/// Owns the pickups, which colors have been collected, and the artifact built from them.
#[derive(Resource, Debug, Clone, Default)]
pub struct PickupManager {
    pickups: Vec<Pickup>,
    collected: SmallVec<[PickupColor; 3]>,
    artifact: ArtifactState,
}

impl PickupManager {
    /// Places one pickup per color, each clear of the spawns, the walls and the pickups before it.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Exhausted`] if any color cannot be placed within `max_attempts`.
    pub fn spawn_pickups<R: Rng + ?Sized>(maze: &Maze, rng: &mut R, max_attempts: u32) -> Result<Self, PlacementError> {
        let mut pickups: Vec<Pickup> = Vec::with_capacity(PickupColor::COUNT);
        let mut placed: Vec<Vec3> = Vec::with_capacity(PickupColor::COUNT);

        for color in PickupColor::iter() {
            let context = PlacementContext::new(maze.spawn, maze.antagonist_spawn, maze.walls(), &placed);
            let position = find_valid_position(
                &mut *rng,
                &context,
                maze.placement_extent(),
                placement::PICKUP_HEIGHT,
                max_attempts,
                color.name(),
            )?;

            debug!(color = color.name(), ?position, "Pickup placed");
            placed.push(position);
            pickups.push(Pickup { color, position });
        }

        Ok(Self::with_pickups(pickups))
    }

    /// A manager holding exactly the given pickups, none collected.
    pub fn with_pickups(pickups: Vec<Pickup>) -> Self {
        Self {
            pickups,
            collected: SmallVec::new(),
            artifact: ArtifactState::Unavailable,
        }
    }

    /// Collects every pickup within `COLLECT_RADIUS` of the player and returns their colors,
    /// in placement order.
    ///
    /// Matching pickups are gathered first and then dropped from the active set in one pass,
    /// so the remaining pickups keep their order.
    pub fn check_collection(&mut self, player: Vec3) -> SmallVec<[PickupColor; 3]> {
        let hits: SmallVec<[usize; 3]> = self
            .pickups
            .iter()
            .enumerate()
            .filter(|(_, pickup)| player.distance(pickup.position) < pickup::COLLECT_RADIUS)
            .map(|(index, _)| index)
            .collect();

        let colors: SmallVec<[PickupColor; 3]> = hits.iter().map(|&index| self.pickups[index].color).collect();
        for &color in &colors {
            if !self.collected.contains(&color) {
                self.collected.push(color);
            }
        }

        if !hits.is_empty() {
            self.pickups = self
                .pickups
                .iter()
                .enumerate()
                .filter(|(index, _)| !hits.contains(index))
                .map(|(_, pickup)| *pickup)
                .collect();
        }

        colors
    }

    pub fn all_collected(&self) -> bool {
        PickupColor::iter().all(|color| self.collected.contains(&color))
    }

    pub fn is_collected(&self, color: PickupColor) -> bool {
        self.collected.contains(&color)
    }

    /// Assembles the artifact at the player's position once everything is collected and the
    /// player is back within `COMBINE_RADIUS` of spawn. Returns `true` only on the call that
    /// creates it.
    pub fn try_create_artifact(&mut self, player: Vec3, spawn: Vec3) -> bool {
        if !matches!(self.artifact, ArtifactState::Unavailable) || !self.all_collected() {
            return false;
        }
        if player.distance(spawn) >= pickup::COMBINE_RADIUS {
            return false;
        }

        self.artifact = ArtifactState::Ready { position: player };
        true
    }

    /// Keeps a ready artifact with the player.
    pub fn carry_artifact(&mut self, player: Vec3) {
        if let ArtifactState::Ready { position } = &mut self.artifact {
            *position = player;
        }
    }

    /// Launches a ready artifact from `origin` along `direction`.
    ///
    /// Returns `false` (and changes nothing) if there is no ready artifact or the direction is degenerate.
    pub fn throw_artifact(&mut self, origin: Vec3, direction: Vec3) -> bool {
        if !matches!(self.artifact, ArtifactState::Ready { .. }) {
            return false;
        }
        let Some(direction) = direction.try_normalize() else {
            return false;
        };

        self.artifact = ArtifactState::InFlight {
            position: origin,
            direction,
        };
        true
    }

    /// Advances an in-flight artifact by one step and tests it against the antagonist, if there is one.
    pub fn advance_artifact(&mut self, antagonist: Option<Vec3>) -> FlightStep {
        let ArtifactState::InFlight { position, direction } = &mut self.artifact else {
            return FlightStep::Grounded;
        };

        *position += *direction * pickup::THROW_SPEED;
        match antagonist {
            Some(target) if position.distance(target) < pickup::HIT_RADIUS => FlightStep::Hit(*position),
            _ => FlightStep::Moved(*position),
        }
    }

    /// Drops the artifact entirely, cancelling any flight.
    pub fn clear_artifact(&mut self) {
        self.artifact = ArtifactState::Unavailable;
    }

    pub fn artifact(&self) -> ArtifactState {
        self.artifact
    }

    /// Pickups still lying in the maze, in placement order.
    pub fn remaining(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn objective(&self) -> Objective {
        match self.artifact {
            ArtifactState::InFlight { .. } => Objective::InFlight,
            ArtifactState::Ready { .. } => Objective::Throw,
            ArtifactState::Unavailable if self.all_collected() => Objective::ReturnToSpawn,
            ArtifactState::Unavailable => Objective::Collect(
                PickupColor::iter()
                    .filter(|color| !self.collected.contains(color))
                    .collect(),
            ),
        }
    }
}

/// Collects pickups under the player and assembles the artifact at spawn.
pub fn pickup_collection_system(
    maze: Res<Maze>,
    mut pickups: ResMut<PickupManager>,
    player: Single<&Position, With<PlayerControlled>>,
    mut events: EventWriter<LifecycleEvent>,
) {
    let position = player.0;

    for color in pickups.check_collection(position) {
        info!(color = color.name(), objective = %pickups.objective(), "Pickup collected");
        events.write(LifecycleEvent::PickupCollected(color));
    }

    if pickups.try_create_artifact(position, maze.spawn) {
        info!(?position, "Artifact assembled");
        events.write(LifecycleEvent::ArtifactCreated);
    }

    pickups.carry_artifact(position);
}

/// Moves a thrown artifact one step and reports a hit on the antagonist.
pub fn artifact_flight_system(
    mut pickups: ResMut<PickupManager>,
    antagonist: Query<&Position, (With<Antagonist>, Without<PlayerControlled>)>,
    mut transitions: EventWriter<StageTransition>,
) {
    let target = antagonist.single().ok().map(|position| position.0);

    match pickups.advance_artifact(target) {
        FlightStep::Grounded => {}
        FlightStep::Moved(position) => trace!(?position, "Artifact in flight"),
        FlightStep::Hit(position) => {
            debug!(?position, "Artifact hit the antagonist");
            transitions.write(StageTransition::ArtifactHit);
        }
    }
}
