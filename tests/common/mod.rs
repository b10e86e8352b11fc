#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec3;
use horror_maze::{
    config::GameConfig,
    constants::{maze::MAZE_SIZE, ANTAGONIST_SPAWN, PLAYER_SPAWN},
    events::{LifecycleEvent, StageTransition},
    game::Game,
    map::builder::{Maze, Wall},
    systems::{
        AntagonistBundle, DeltaTime, GameRng, GameStage, LookDirection, MovementIntent, PickupManager, PlayerBundle,
        PointerLock, Sanity,
    },
};
use rand::{rngs::SmallRng, SeedableRng};

pub const TEST_DT: f32 = 1.0 / 60.0;

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// A maze with only its boundary walls.
pub fn empty_maze() -> Maze {
    Maze::from_walls(MAZE_SIZE, PLAYER_SPAWN, ANTAGONIST_SPAWN, Maze::boundary_walls(MAZE_SIZE))
}

/// The boundary walls plus the given interior blocks.
pub fn maze_with(interior: &[Vec3]) -> Maze {
    let mut walls = Maze::boundary_walls(MAZE_SIZE);
    walls.extend(interior.iter().copied().map(Wall::interior));
    Maze::from_walls(MAZE_SIZE, PLAYER_SPAWN, ANTAGONIST_SPAWN, walls)
}

/// A world holding every resource the gameplay systems read, in the `Playing` stage with the pointer locked.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(empty_maze());
    world.insert_resource(PickupManager::default());
    world.insert_resource(Sanity::default());
    world.insert_resource(GameStage::Playing);
    world.insert_resource(PointerLock(true));
    world.insert_resource(MovementIntent::empty());
    world.insert_resource(LookDirection::default());
    world.insert_resource(DeltaTime { seconds: TEST_DT });
    world.insert_resource(GameRng(rng(7)));
    world.insert_resource(Events::<LifecycleEvent>::default());
    world.insert_resource(Events::<StageTransition>::default());

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn(PlayerBundle::at(position)).id()
}

pub fn spawn_test_antagonist(world: &mut World, position: Vec3) -> Entity {
    world.spawn(AntagonistBundle::at(position)).id()
}

pub fn send_transition(world: &mut World, transition: StageTransition) {
    let mut events = world.resource_mut::<Events<StageTransition>>();
    events.send(transition);
}

pub fn lifecycle_events(world: &mut World) -> Vec<LifecycleEvent> {
    world.resource_mut::<Events<LifecycleEvent>>().drain().collect()
}

pub fn stage_transitions(world: &mut World) -> Vec<StageTransition> {
    world.resource_mut::<Events<StageTransition>>().drain().collect()
}

pub fn seeded_game(seed: u64) -> Game {
    Game::new(GameConfig::seeded(seed)).expect("seeded level should build")
}

/// Ticks `ticks` times, draining after every tick the way a frame loop does.
pub fn tick_and_drain(game: &mut Game, ticks: usize) -> Vec<LifecycleEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        game.tick(TEST_DT);
        events.extend(game.drain_events());
    }
    events
}

/// A seeded game that has been started, with its start-up events already drained.
pub fn playing_game(seed: u64) -> Game {
    let mut game = seeded_game(seed);
    game.start();
    game.drain_events();
    game
}
