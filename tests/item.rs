use bevy_ecs::system::RunSystemOnce;
use glam::Vec3;
use horror_maze::{
    constants::PLAYER_SPAWN,
    events::{LifecycleEvent, StageTransition},
    systems::{
        artifact_flight_system, pickup_collection_system, ArtifactState, FlightStep, Objective, Pickup, PickupColor,
        PickupManager,
    },
};
use pretty_assertions::assert_eq;
use smallvec::smallvec;
use speculoos::prelude::*;

mod common;

fn pickups() -> PickupManager {
    PickupManager::with_pickups(vec![
        Pickup {
            color: PickupColor::Red,
            position: Vec3::new(10.0, 1.0, 10.0),
        },
        Pickup {
            color: PickupColor::Blue,
            position: Vec3::new(-10.0, 1.0, 10.0),
        },
        Pickup {
            color: PickupColor::Yellow,
            position: Vec3::new(10.0, 1.0, -10.0),
        },
    ])
}

fn collect_all(manager: &mut PickupManager) {
    for position in [
        Vec3::new(10.0, 1.0, 10.0),
        Vec3::new(-10.0, 1.0, 10.0),
        Vec3::new(10.0, 1.0, -10.0),
    ] {
        manager.check_collection(position);
    }
}

#[test]
fn test_collection_removes_only_the_touched_pickup() {
    let mut manager = pickups();

    let collected = manager.check_collection(Vec3::new(-10.0, 1.5, 10.2));

    assert_eq!(collected.as_slice(), &[PickupColor::Blue]);
    assert_that(&manager.is_collected(PickupColor::Blue)).is_true();
    let remaining: Vec<PickupColor> = manager.remaining().iter().map(|pickup| pickup.color).collect();
    assert_eq!(remaining, vec![PickupColor::Red, PickupColor::Yellow]);
}

#[test]
fn test_collection_out_of_reach_does_nothing() {
    let mut manager = pickups();

    assert_that(&manager.check_collection(Vec3::new(11.0, 1.0, 10.0)).is_empty()).is_true();
    assert_that(&manager.remaining().len()).is_equal_to(3);
}

#[test]
fn test_overlapping_pickups_are_collected_together() {
    let mut manager = PickupManager::with_pickups(vec![
        Pickup {
            color: PickupColor::Red,
            position: Vec3::new(0.0, 1.0, 0.3),
        },
        Pickup {
            color: PickupColor::Yellow,
            position: Vec3::new(0.0, 1.0, -0.3),
        },
    ]);

    let collected = manager.check_collection(Vec3::new(0.0, 1.0, 0.0));

    assert_eq!(collected.as_slice(), &[PickupColor::Red, PickupColor::Yellow]);
    assert_that(&manager.remaining().len()).is_equal_to(0);
    assert_that(&manager.is_collected(PickupColor::Yellow)).is_true();
}

#[test]
fn test_artifact_requires_all_pickups_and_spawn() {
    let mut manager = pickups();
    manager.check_collection(Vec3::new(10.0, 1.0, 10.0));

    assert_that(&manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN)).is_false();

    collect_all(&mut manager);
    assert_that(&manager.all_collected()).is_true();
    assert_that(&manager.try_create_artifact(PLAYER_SPAWN + Vec3::new(3.0, 0.0, 0.0), PLAYER_SPAWN)).is_false();
    assert_that(&manager.try_create_artifact(PLAYER_SPAWN + Vec3::new(2.9, 0.0, 0.0), PLAYER_SPAWN)).is_true();
}

#[test]
fn test_artifact_is_created_exactly_once() {
    let mut manager = pickups();
    collect_all(&mut manager);

    let created = (0..5)
        .filter(|_| manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN))
        .count();

    assert_that(&created).is_equal_to(1);
    assert_eq!(manager.artifact(), ArtifactState::Ready { position: PLAYER_SPAWN });
}

#[test]
fn test_ready_artifact_follows_player() {
    let mut manager = pickups();
    collect_all(&mut manager);
    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);

    manager.carry_artifact(Vec3::new(5.0, 1.6, 5.0));

    assert_that(&manager.artifact().position()).is_equal_to(Some(Vec3::new(5.0, 1.6, 5.0)));
}

#[test]
fn test_throw_requires_a_ready_artifact() {
    let mut manager = pickups();

    assert_that(&manager.throw_artifact(PLAYER_SPAWN, Vec3::X)).is_false();

    collect_all(&mut manager);
    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);
    assert_that(&manager.throw_artifact(PLAYER_SPAWN, Vec3::ZERO)).is_false();
    assert_that(&manager.throw_artifact(PLAYER_SPAWN, Vec3::new(0.0, 0.0, -4.0))).is_true();
    assert_that(&manager.throw_artifact(PLAYER_SPAWN, Vec3::X)).is_false();
    assert_eq!(
        manager.artifact(),
        ArtifactState::InFlight {
            position: PLAYER_SPAWN,
            direction: Vec3::NEG_Z
        }
    );
}

#[test]
fn test_thrown_artifact_hits_within_four_steps() {
    let mut manager = pickups();
    collect_all(&mut manager);
    let origin = Vec3::new(0.0, 1.5, 0.0);
    let target = Vec3::new(2.0, 1.5, 0.0);
    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);
    manager.throw_artifact(origin, (target - origin).normalize());

    let hit_at = (1..=4).find(|_| matches!(manager.advance_artifact(Some(target)), FlightStep::Hit(_)));

    assert_that(&hit_at).is_some();
}

#[test]
fn test_flight_without_antagonist_keeps_going() {
    let mut manager = pickups();
    collect_all(&mut manager);
    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);
    manager.throw_artifact(Vec3::ZERO, Vec3::X);

    assert_eq!(manager.advance_artifact(None), FlightStep::Moved(Vec3::new(0.5, 0.0, 0.0)));
    assert_eq!(manager.advance_artifact(None), FlightStep::Moved(Vec3::new(1.0, 0.0, 0.0)));

    manager.clear_artifact();
    assert_eq!(manager.advance_artifact(None), FlightStep::Grounded);
}

#[test]
fn test_objective_progression() {
    let mut manager = pickups();
    assert_eq!(manager.objective().to_string(), "Collect: 🔴 🔵 🟡");

    manager.check_collection(Vec3::new(-10.0, 1.0, 10.0));
    assert_eq!(
        manager.objective(),
        Objective::Collect(smallvec![PickupColor::Red, PickupColor::Yellow])
    );
    assert_eq!(manager.objective().to_string(), "Collect: 🔴 🟡");

    collect_all(&mut manager);
    assert_eq!(manager.objective().to_string(), "Return to spawn to create the Rainbow Block!");

    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);
    assert_eq!(manager.objective().to_string(), "Throw the Rainbow Block at Smiley! (Click to throw)");

    manager.throw_artifact(PLAYER_SPAWN, Vec3::X);
    assert_eq!(manager.objective().to_string(), "The Rainbow Block is in flight...");
}

#[test]
fn test_color_names() {
    assert_that(&PickupColor::Red.name()).is_equal_to("red");
    assert_that(&PickupColor::Yellow.name()).is_equal_to("yellow");
}

#[test]
fn test_pickup_collection_system_emits_events() {
    let mut world = common::create_test_world();
    let mut manager = pickups();
    manager.check_collection(Vec3::new(10.0, 1.0, 10.0));
    manager.check_collection(Vec3::new(-10.0, 1.0, 10.0));
    world.insert_resource(manager);
    common::spawn_test_player(&mut world, Vec3::new(10.0, 1.6, -10.0));

    world
        .run_system_once(pickup_collection_system)
        .expect("System should run successfully");
    assert_eq!(
        common::lifecycle_events(&mut world),
        vec![LifecycleEvent::PickupCollected(PickupColor::Yellow)]
    );

    let mut world_at_spawn = common::create_test_world();
    let mut manager = pickups();
    collect_all(&mut manager);
    world_at_spawn.insert_resource(manager);
    common::spawn_test_player(&mut world_at_spawn, PLAYER_SPAWN);

    for _ in 0..3 {
        world_at_spawn
            .run_system_once(pickup_collection_system)
            .expect("System should run successfully");
    }
    assert_eq!(
        common::lifecycle_events(&mut world_at_spawn),
        vec![LifecycleEvent::ArtifactCreated]
    );
}

#[test]
fn test_pickup_collection_system_reports_every_overlapping_pickup() {
    let mut world = common::create_test_world();
    world.insert_resource(PickupManager::with_pickups(vec![
        Pickup {
            color: PickupColor::Blue,
            position: Vec3::new(4.0, 1.0, 4.3),
        },
        Pickup {
            color: PickupColor::Yellow,
            position: Vec3::new(4.0, 1.0, 3.7),
        },
        Pickup {
            color: PickupColor::Red,
            position: Vec3::new(-12.0, 1.0, 4.0),
        },
    ]));
    common::spawn_test_player(&mut world, Vec3::new(4.0, 1.6, 4.0));

    world
        .run_system_once(pickup_collection_system)
        .expect("System should run successfully");

    assert_eq!(
        common::lifecycle_events(&mut world),
        vec![
            LifecycleEvent::PickupCollected(PickupColor::Blue),
            LifecycleEvent::PickupCollected(PickupColor::Yellow),
        ]
    );
    assert_that(&world.resource::<PickupManager>().is_collected(PickupColor::Yellow)).is_true();
    assert_that(&world.resource::<PickupManager>().remaining().len()).is_equal_to(1);
}

#[test]
fn test_artifact_flight_system_requests_win() {
    let mut world = common::create_test_world();
    let mut manager = pickups();
    collect_all(&mut manager);
    manager.try_create_artifact(PLAYER_SPAWN, PLAYER_SPAWN);
    manager.throw_artifact(Vec3::ZERO, Vec3::X);
    world.insert_resource(manager);
    common::spawn_test_antagonist(&mut world, Vec3::new(1.2, 0.0, 0.0));

    world
        .run_system_once(artifact_flight_system)
        .expect("System should run successfully");

    assert_eq!(common::stage_transitions(&mut world), vec![StageTransition::ArtifactHit]);
}
