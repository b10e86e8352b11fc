//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::constants::{ANTAGONIST_SPAWN, PLAYER_SPAWN};
use crate::error::{GameError, GameResult};
use crate::events::{LifecycleEvent, StageTransition};
use crate::map::builder::{Maze, Wall};
use crate::systems::{
    artifact_flight_system, pickup_collection_system, player_movement_system, pursuit_system, sanity_system,
    simulation_active, stage_system, Antagonist, AntagonistBundle, ArtifactState, DeltaTime, GameRng, GameStage,
    LookDirection, MovementIntent, Pickup, PickupManager, PlayerBundle, PlayerControlled, PointerLock, Position,
    Sanity, Velocity,
};

/// System set for all gameplay systems to ensure the stage resolves after the simulation step.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// Everything the rendering and UI collaborators read after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub stage: GameStage,
    pub locked: bool,
    pub player: Vec3,
    pub antagonist: Option<Vec3>,
    pub pickups: Vec<Pickup>,
    pub artifact: Option<Vec3>,
    pub sanity: u8,
    pub fog_intensity: f32,
    pub objective: String,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns a `World` holding the player, the antagonist and every shared resource, and a
/// `Schedule` that runs one simulation step per [`Game::tick`]. The driver feeds input through
/// the setters and reads state back through the getters or [`Game::snapshot`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a game in the `Idle` stage with a freshly generated level.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidState` if the configuration fails [`GameConfig::validate`], and
    /// `GameError::Placement` if no level could be generated within `config.max_level_attempts` tries.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let (maze, pickups) = Self::build_level(&config, None, &mut rng)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::setup_schedule(&mut schedule);

        world.spawn(PlayerBundle::at(maze.spawn));
        world.spawn(AntagonistBundle::at(maze.antagonist_spawn));

        world.insert_resource(maze);
        world.insert_resource(pickups);
        world.insert_resource(GameRng(rng));
        world.insert_resource(config);

        info!("Game initialized");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<LifecycleEvent>(world);
        EventRegistry::register_event::<StageTransition>(world);

        world.insert_resource(GameStage::default());
        world.insert_resource(PointerLock::default());
        world.insert_resource(MovementIntent::empty());
        world.insert_resource(LookDirection::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Sanity::default());
    }

    fn setup_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (
                    player_movement_system,
                    pickup_collection_system,
                    artifact_flight_system,
                    pursuit_system,
                    sanity_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                stage_system.in_set(GameplaySet::Respond),
            ))
            .configure_sets((GameplaySet::Update.run_if(simulation_active), GameplaySet::Respond).chain());
    }

    /// Generates a maze (unless `keep` is given) and places the pickups in it, regenerating the
    /// whole level whenever placement runs out of attempts.
    fn build_level<R: Rng + ?Sized>(
        config: &GameConfig,
        keep: Option<&Maze>,
        rng: &mut R,
    ) -> GameResult<(Maze, PickupManager)> {
        let attempts = config.max_level_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let maze = match keep {
                Some(maze) => maze.clone(),
                None => Maze::generate(
                    config.maze_size,
                    config.wall_probability,
                    PLAYER_SPAWN,
                    ANTAGONIST_SPAWN,
                    &mut *rng,
                ),
            };

            match PickupManager::spawn_pickups(&maze, &mut *rng, config.max_placement_attempts) {
                Ok(pickups) => {
                    debug!(attempt, walls = maze.walls().len(), "Level built");
                    return Ok((maze, pickups));
                }
                Err(error) => {
                    warn!(attempt, %error, "Level placement failed, regenerating");
                    last_error = Some(error);
                }
            }
        }

        Err(match last_error {
            Some(error) => GameError::Placement(error),
            None => GameError::InvalidState("level build made no attempts".to_string()),
        })
    }

    /// Advances the simulation by `dt` seconds, clamped to the configured maximum frame time.
    ///
    /// Nothing moves unless the stage is `Playing` and the pointer is locked. Lifecycle events
    /// survive two ticks, so the driver should call [`Game::drain_events`] every frame.
    pub fn tick(&mut self, dt: f32) {
        let max = self.world.resource::<GameConfig>().max_frame_seconds;
        let seconds = if dt.is_finite() { dt.min(max).max(0.0) } else { 0.0 };
        self.world.insert_resource(DeltaTime { seconds });

        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<StageTransition>>().update();
        self.world.resource_mut::<Events<LifecycleEvent>>().update();
    }

    /// Takes every lifecycle event emitted since the previous call and still buffered, oldest first.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        self.world.resource_mut::<Events<LifecycleEvent>>().drain().collect()
    }

    fn emit(&mut self, event: LifecycleEvent) {
        self.world.resource_mut::<Events<LifecycleEvent>>().send(event);
    }

    /// Leaves `Idle` and captures the pointer. Has no effect in any other stage.
    pub fn start(&mut self) {
        if self.stage() != GameStage::Idle {
            return;
        }
        info!("Game started");
        *self.world.resource_mut::<GameStage>() = GameStage::Playing;
        self.lock();
    }

    /// Captures the pointer, resuming the simulation while playing.
    pub fn lock(&mut self) {
        {
            let mut lock = self.world.resource_mut::<PointerLock>();
            if lock.0 {
                return;
            }
            lock.0 = true;
        }
        debug!("Pointer locked");
        self.emit(LifecycleEvent::Locked);
    }

    /// Releases the pointer, suspending the simulation.
    pub fn unlock(&mut self) {
        {
            let mut lock = self.world.resource_mut::<PointerLock>();
            if !lock.0 {
                return;
            }
            lock.0 = false;
        }
        debug!("Pointer unlocked");
        self.emit(LifecycleEvent::Unlocked);
    }

    /// Handles a click: start, re-lock, throw or restart depending on the current stage.
    ///
    /// # Errors
    ///
    /// Only a restart can fail, when the new level cannot be placed.
    pub fn primary_action(&mut self) -> GameResult<()> {
        match self.stage() {
            GameStage::Idle => self.start(),
            GameStage::Playing if !self.is_locked() => self.lock(),
            GameStage::Playing => {
                self.throw_artifact();
            }
            GameStage::GameOver | GameStage::Won => {
                self.reset()?;
                self.lock();
            }
        }
        Ok(())
    }

    /// Throws a ready artifact from the player's position along the look direction.
    ///
    /// Returns `false` if the game is not running or there is nothing to throw.
    pub fn throw_artifact(&mut self) -> bool {
        if self.stage() != GameStage::Playing || !self.is_locked() {
            return false;
        }

        let origin = self.player_position();
        let direction = self.world.resource::<LookDirection>().0;
        let thrown = self
            .world
            .resource_mut::<PickupManager>()
            .throw_artifact(origin, direction);

        if thrown {
            info!(?origin, ?direction, "Artifact thrown");
            self.emit(LifecycleEvent::ArtifactThrown);
        }
        thrown
    }

    /// Starts a fresh round in the `Playing` stage.
    ///
    /// The player returns to spawn at rest with full sanity, the antagonist is (re)spawned,
    /// the pickups are placed anew and any artifact is discarded. The maze is regenerated
    /// unless `regenerate_maze_on_reset` is off. The pointer lock is left as it is.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Placement` if no level could be placed; the world is left untouched.
    pub fn reset(&mut self) -> GameResult<()> {
        let config = self.world.resource::<GameConfig>().clone();
        let keep = (!config.regenerate_maze_on_reset).then(|| self.world.resource::<Maze>().clone());

        let (maze, pickups) = {
            let mut rng = self.world.resource_mut::<GameRng>();
            Self::build_level(&config, keep.as_ref(), &mut rng.0)?
        };

        let (spawn, antagonist_spawn) = (maze.spawn, maze.antagonist_spawn);
        self.world.insert_resource(maze);
        self.world.insert_resource(pickups);
        self.world.insert_resource(Sanity::default());
        self.world.insert_resource(MovementIntent::empty());
        *self.world.resource_mut::<GameStage>() = GameStage::Playing;

        let mut players = self
            .world
            .query_filtered::<(&mut Position, &mut Velocity), With<PlayerControlled>>();
        for (mut position, mut velocity) in players.iter_mut(&mut self.world) {
            position.0 = spawn;
            velocity.0 = Vec3::ZERO;
        }

        let mut antagonists = self.world.query_filtered::<&mut Position, With<Antagonist>>();
        let mut respawned = false;
        for mut position in antagonists.iter_mut(&mut self.world) {
            position.0 = antagonist_spawn;
            respawned = true;
        }
        if !respawned {
            self.world.spawn(AntagonistBundle::at(antagonist_spawn));
        }

        info!("Game reset");
        self.emit(LifecycleEvent::Reset);
        Ok(())
    }

    /// Replaces the held movement keys.
    pub fn set_intent(&mut self, intent: MovementIntent) {
        *self.world.resource_mut::<MovementIntent>() = intent;
    }

    pub fn press(&mut self, keys: MovementIntent) {
        self.world.resource_mut::<MovementIntent>().insert(keys);
    }

    pub fn release(&mut self, keys: MovementIntent) {
        self.world.resource_mut::<MovementIntent>().remove(keys);
    }

    /// The window lost focus: every held key is released.
    pub fn focus_lost(&mut self) {
        debug!("Focus lost, clearing movement intent");
        self.set_intent(MovementIntent::empty());
    }

    pub fn set_look_direction(&mut self, direction: Vec3) {
        self.world.resource_mut::<LookDirection>().0 = direction;
    }

    /// Teleports the player, leaving its velocity untouched.
    pub fn set_player_position(&mut self, position: Vec3) {
        let mut players = self.world.query_filtered::<&mut Position, With<PlayerControlled>>();
        for mut current in players.iter_mut(&mut self.world) {
            current.0 = position;
        }
    }

    /// Teleports the antagonist, if there is one.
    pub fn set_antagonist_position(&mut self, position: Vec3) {
        let mut antagonists = self.world.query_filtered::<&mut Position, With<Antagonist>>();
        for mut current in antagonists.iter_mut(&mut self.world) {
            current.0 = position;
        }
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn is_locked(&self) -> bool {
        self.world.resource::<PointerLock>().0
    }

    pub fn intent(&self) -> MovementIntent {
        *self.world.resource::<MovementIntent>()
    }

    pub fn sanity(&self) -> f32 {
        self.world.resource::<Sanity>().0
    }

    pub fn sanity_display(&self) -> u8 {
        self.world.resource::<Sanity>().display()
    }

    pub fn fog_intensity(&self) -> f32 {
        self.world.resource::<Sanity>().fog_intensity()
    }

    pub fn player_position(&mut self) -> Vec3 {
        let mut players = self.world.query_filtered::<&Position, With<PlayerControlled>>();
        players
            .single(&self.world)
            .map(|position| position.0)
            .unwrap_or(PLAYER_SPAWN)
    }

    pub fn player_velocity(&mut self) -> Vec3 {
        let mut players = self.world.query_filtered::<&Velocity, With<PlayerControlled>>();
        players
            .single(&self.world)
            .map(|velocity| velocity.0)
            .unwrap_or(Vec3::ZERO)
    }

    /// `None` once the antagonist has been defeated.
    pub fn antagonist_position(&mut self) -> Option<Vec3> {
        let mut antagonists = self.world.query_filtered::<&Position, With<Antagonist>>();
        antagonists.single(&self.world).ok().map(|position| position.0)
    }

    /// Pickups still lying in the maze.
    pub fn pickups(&self) -> &[Pickup] {
        self.world.resource::<PickupManager>().remaining()
    }

    pub fn artifact(&self) -> ArtifactState {
        self.world.resource::<PickupManager>().artifact()
    }

    pub fn maze(&self) -> &Maze {
        self.world.resource::<Maze>()
    }

    pub fn walls(&self) -> &[Wall] {
        self.maze().walls()
    }

    /// The HUD's objective line for the current stage.
    pub fn objective(&self) -> String {
        match self.stage() {
            GameStage::Idle => "Click to start".to_string(),
            GameStage::GameOver => "The Smiley got you! Click to try again".to_string(),
            GameStage::Won => "You defeated Smiley! Click to play again".to_string(),
            GameStage::Playing => self.world.resource::<PickupManager>().objective().to_string(),
        }
    }

    pub fn snapshot(&mut self) -> FrameSnapshot {
        FrameSnapshot {
            stage: self.stage(),
            locked: self.is_locked(),
            player: self.player_position(),
            antagonist: self.antagonist_position(),
            pickups: self.pickups().to_vec(),
            artifact: self.artifact().position(),
            sanity: self.sanity_display(),
            fog_intensity: self.fog_intensity(),
            objective: self.objective(),
        }
    }
}
