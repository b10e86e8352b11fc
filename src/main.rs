//! Headless driver: runs one session with a simple steering autopilot at a fixed tick rate.
//!
//! Configuration comes from `HORROR_MAZE_*` environment variables, logging from `RUST_LOG`.

use anyhow::Context;
use glam::{Quat, Vec3};
use horror_maze::{
    config::GameConfig,
    constants::TICK_SECONDS,
    events::LifecycleEvent,
    game::Game,
    logging::setup_logging,
    systems::{ArtifactState, GameStage, MovementIntent},
};
use tracing::{info, warn};

/// Ten simulated minutes.
const MAX_TICKS: u32 = 60 * 60 * 10;
/// Ticks without progress before the autopilot tries a detour.
const STUCK_TICKS: u32 = 20;
/// How long a detour is held.
const DETOUR_TICKS: u32 = 45;
/// Throw once the antagonist is this close.
const THROW_RANGE: f32 = 8.0;

#[derive(Default)]
struct Autopilot {
    last_position: Option<Vec3>,
    stuck: u32,
    detour: u32,
    detours: u32,
}

impl Autopilot {
    /// Picks a look direction and movement keys for the next tick.
    fn steer(&mut self, game: &mut Game) -> (Vec3, MovementIntent) {
        let player = game.player_position();
        let target = match game.artifact() {
            ArtifactState::Unavailable => game
                .pickups()
                .iter()
                .map(|pickup| pickup.position)
                .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
                .unwrap_or(game.maze().spawn),
            ArtifactState::Ready { .. } | ArtifactState::InFlight { .. } => {
                game.antagonist_position().unwrap_or(player)
            }
        };

        let moved = self
            .last_position
            .is_some_and(|last| last.distance(player) > f32::EPSILON);
        self.last_position = Some(player);
        self.stuck = if moved { 0 } else { self.stuck + 1 };

        if self.stuck > STUCK_TICKS && self.detour == 0 {
            self.detour = DETOUR_TICKS;
            self.detours += 1;
            self.stuck = 0;
        }

        let mut look = Vec3::new(target.x - player.x, 0.0, target.z - player.z).normalize_or_zero();
        if self.detour > 0 {
            self.detour -= 1;
            let angle = if self.detours % 2 == 0 { 1.0 } else { -1.0 } * std::f32::consts::FRAC_PI_2;
            look = Quat::from_rotation_y(angle) * look;
        }

        let intent = match game.artifact() {
            ArtifactState::Ready { .. } if player.distance(target) < THROW_RANGE => MovementIntent::empty(),
            ArtifactState::InFlight { .. } => MovementIntent::empty(),
            _ => MovementIntent::FORWARD,
        };
        (look, intent)
    }
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = GameConfig::from_env().context("loading configuration")?;
    info!(seed = ?config.seed, "Starting headless session");

    let mut game = Game::new(config).context("building the first level")?;
    game.primary_action()?;

    let mut autopilot = Autopilot::default();
    let mut ticks = 0;

    while ticks < MAX_TICKS && game.stage() == GameStage::Playing {
        let (look, intent) = autopilot.steer(&mut game);
        game.set_look_direction(look);
        game.set_intent(intent);

        if matches!(game.artifact(), ArtifactState::Ready { .. }) && intent.is_empty() {
            game.throw_artifact();
        }

        game.tick(TICK_SECONDS);
        ticks += 1;

        for event in game.drain_events() {
            match event {
                LifecycleEvent::PickupCollected(color) => {
                    info!(tick = ticks, color = color.name(), objective = %game.objective(), "Collected")
                }
                LifecycleEvent::GameOver | LifecycleEvent::Won => info!(tick = ticks, ?event, "Round over"),
                other => info!(tick = ticks, event = ?other, "Lifecycle"),
            }
        }
    }

    let snapshot = game.snapshot();
    if snapshot.stage == GameStage::Playing {
        warn!(ticks, "Session timed out");
    }
    info!(
        ticks,
        stage = ?snapshot.stage,
        sanity = snapshot.sanity,
        fog = snapshot.fog_intensity,
        detours = autopilot.detours,
        "Session finished"
    );

    Ok(())
}
