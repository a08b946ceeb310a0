//! Cube Chase
//!
//! Headless driver for the simulation. By default runs a fixed number of
//! frames on a synthetic clock with a simple autopilot, then replays the
//! recorded input and checks the final state hash matches. With
//! `CUBE_CHASE_REALTIME=1` (or `true`), paces frames against the wall clock until
//! Ctrl-C.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cube_chase::{
    DEFAULT_FRAME_RATE, VERSION,
    GameConfig, GameLoop, GameState, HeadlessScene, ManualClock, SystemClock,
    game::{events::GameEventData, tick::replay},
};

const SEED_ENV: &str = "CUBE_CHASE_SEED";
const FRAMES_ENV: &str = "CUBE_CHASE_FRAMES";
const REALTIME_ENV: &str = "CUBE_CHASE_REALTIME";

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_FRAMES: u64 = 3600;

/// Autopilot ignores offsets smaller than this on either axis.
const DEADZONE: f32 = 0.1;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    info!("Cube Chase v{}", VERSION);

    let config = GameConfig::from_env().context("failed to load config")?;
    let seed: u64 = env_or(SEED_ENV, DEFAULT_SEED)?;

    info!("RNG Seed: {}", seed);
    info!("Pickups: {}, world size: {}", config.num_cubes, config.world_size);

    let realtime: String = env_or(REALTIME_ENV, String::new())?;
    if is_enabled(&realtime) {
        run_realtime(config, seed).await
    } else {
        let frames: u64 = env_or(FRAMES_ENV, DEFAULT_FRAMES)?;
        run_headless(config, seed, frames)
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().with_context(|| format!("invalid {}={:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Is a boolean env value switched on? Accepts `1` and `true` (any case).
fn is_enabled(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true")
}

/// Run `frames` frames on a synthetic 60 Hz clock, then verify by replay.
fn run_headless(config: GameConfig, seed: u64, frames: u64) -> Result<()> {
    info!("=== Headless Run ({} frames) ===", frames);

    let frame_interval = Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE as f64);
    let mut game = GameLoop::new(config.clone(), seed, HeadlessScene::new(), ManualClock::new())?;
    game.start_recording();

    let mut collections = 0;
    let mut respawns = 0;

    for n in 1..=frames {
        let keys = autopilot_keys(game.state());
        let input = game.input_mut();
        for key in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"] {
            input.key_up(key);
        }
        for key in keys {
            input.key_down(key);
        }
        if n % 240 == 0 {
            input.key_down(" ");
        } else {
            input.key_up(" ");
        }

        game.clock_mut().advance(frame_interval);
        let result = game.step();

        for event in &result.events {
            match &event.data {
                GameEventData::PickupCollected { slot, new_score, .. } => {
                    collections += 1;
                    info!("Frame {}: collected slot {} (score {})", event.frame, slot, new_score);
                }
                GameEventData::PickupRespawned { .. } => respawns += 1,
                _ => {}
            }
        }

        // Report every 10 seconds
        if n % 600 == 0 {
            let state = game.state();
            info!(
                "Frame {}: score {}, {} active pickups, avatar at ({:.2}, {:.2}, {:.2})",
                n,
                state.score,
                state.active_pickup_count(),
                state.avatar.position.x,
                state.avatar.position.y,
                state.avatar.position.z,
            );
        }
    }

    info!("=== Results ===");
    let hash = game.state().compute_hash();
    info!("Score: {} ({} collections, {} respawns)", game.state().score, collections, respawns);
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let recording = game.take_recording().context("input recording missing")?;
    info!("Recorded {} input changes over {} frames", recording.deltas().len(), recording.end_frame);

    let (replay_final, _) = replay(&config, &recording, frame_interval, &mut HeadlessScene::new())?;
    let replay_hash = replay_final.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        warn!("DETERMINISM FAILURE: Hashes differ!");
        bail!("replay diverged from live run");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}

/// Direction keys that steer toward the nearest uncollected pickup.
fn autopilot_keys(state: &GameState) -> Vec<&'static str> {
    let avatar = state.avatar.position;
    let target = state
        .pickups
        .iter()
        .filter(|p| !p.collected)
        .min_by(|a, b| {
            a.position
                .distance_squared(avatar)
                .total_cmp(&b.position.distance_squared(avatar))
        });

    let Some(target) = target else {
        return Vec::new();
    };

    let mut keys = Vec::with_capacity(2);
    let dx = target.position.x - avatar.x;
    let dz = target.position.z - avatar.z;
    if dx > DEADZONE {
        keys.push("ArrowRight");
    } else if dx < -DEADZONE {
        keys.push("ArrowLeft");
    }
    if dz > DEADZONE {
        keys.push("ArrowDown");
    } else if dz < -DEADZONE {
        keys.push("ArrowUp");
    }
    keys
}

/// Pace frames against the wall clock until Ctrl-C.
async fn run_realtime(config: GameConfig, seed: u64) -> Result<()> {
    info!("=== Real-time Run ({} Hz, Ctrl-C to stop) ===", DEFAULT_FRAME_RATE);

    let mut game = GameLoop::new(config, seed, HeadlessScene::new(), SystemClock::new())?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
        let _ = shutdown_tx.send(());
    });

    let frames = game.run(DEFAULT_FRAME_RATE, shutdown_rx).await;

    info!("Ran {} frames, score {}", frames, game.state().score);
    info!("Final State Hash: {}", hex::encode(game.state().compute_hash()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_flag_values() {
        for on in ["1", "true", "TRUE", " True "] {
            assert!(is_enabled(on), "{on:?} should enable");
        }
        for off in ["", "0", "false", "no", "yes", "2"] {
            assert!(!is_enabled(off), "{off:?} should not enable");
        }
    }

    #[test]
    fn test_env_or_parses_and_defaults() {
        std::env::set_var("CUBE_CHASE_TEST_FRAMES", "600");
        assert_eq!(env_or("CUBE_CHASE_TEST_FRAMES", DEFAULT_FRAMES).expect("parses"), 600);

        std::env::set_var("CUBE_CHASE_TEST_SEED", "not-a-number");
        assert!(env_or::<u64>("CUBE_CHASE_TEST_SEED", DEFAULT_SEED).is_err());

        assert_eq!(env_or("CUBE_CHASE_TEST_UNSET", DEFAULT_SEED).expect("default"), DEFAULT_SEED);
    }
}
