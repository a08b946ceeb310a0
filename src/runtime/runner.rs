//! Game Loop Driver
//!
//! Owns everything a running session needs and turns "a display frame
//! happened" into one simulation frame. The async [`GameLoop::run`] paces
//! frames with a tokio interval and stops on a teardown broadcast.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument};

use crate::game::config::{ConfigError, GameConfig};
use crate::game::input::{InputAggregator, InputRecording};
use crate::game::state::GameState;
use crate::game::tick::{frame, FrameResult};
use crate::runtime::clock::Clock;
use crate::scene::Scene;

/// Frames between progress log lines in [`GameLoop::run`].
const PROGRESS_EVERY: u64 = 600;

/// A running session.
pub struct GameLoop<S: Scene, C: Clock> {
    config: GameConfig,
    state: GameState,
    input: InputAggregator,
    scene: S,
    clock: C,
    recording: Option<InputRecording>,
}

impl<S: Scene, C: Clock> GameLoop<S, C> {
    /// Validate `config` and build the initial scene.
    pub fn new(config: GameConfig, rng_seed: u64, mut scene: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, rng_seed, &mut scene);

        info!(
            seed = rng_seed,
            slots = state.slot_count(),
            "session started"
        );

        Ok(Self {
            config,
            state,
            input: InputAggregator::new(),
            scene,
            clock,
            recording: None,
        })
    }

    /// Start recording sampled input for replay.
    pub fn start_recording(&mut self) {
        self.recording = Some(InputRecording::new(self.state.rng_seed));
    }

    /// Stop recording and hand back what was captured.
    pub fn take_recording(&mut self) -> Option<InputRecording> {
        self.recording.take()
    }

    /// Run exactly one frame now.
    pub fn step(&mut self) -> FrameResult {
        let input = self.input.sample();
        let elapsed = self.clock.elapsed();

        if let Some(recording) = self.recording.as_mut() {
            recording.record(self.state.frame + 1, input);
        }

        frame(&mut self.state, &input, elapsed, &self.config, &mut self.scene)
    }

    /// Run frames at `frame_rate` Hz until `shutdown` fires or its sender
    /// is dropped. Returns the number of frames run.
    #[instrument(skip(self, shutdown), fields(seed = self.state.rng_seed))]
    pub async fn run(&mut self, frame_rate: u32, mut shutdown: broadcast::Receiver<()>) -> u64 {
        let period = Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let start_frame = self.state.frame;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.step();
                    if self.state.frame % PROGRESS_EVERY == 0 {
                        info!(
                            frame = self.state.frame,
                            score = self.state.score,
                            active = self.state.active_pickup_count(),
                            "progress"
                        );
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        let frames = self.state.frame - start_frame;
        info!(frames, score = self.state.score, "frame loop stopped");
        frames
    }

    /// Input layer handle.
    pub fn input_mut(&mut self) -> &mut InputAggregator {
        &mut self.input
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for scripted setups.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Render surface.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Clock, for manual stepping.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::clock::ManualClock;
    use crate::scene::HeadlessScene;

    fn session() -> GameLoop<HeadlessScene, ManualClock> {
        GameLoop::new(GameConfig::default(), 12345, HeadlessScene::new(), ManualClock::new())
            .expect("default config is valid")
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig { num_cubes: 0, ..GameConfig::default() };
        let result = GameLoop::new(config, 1, HeadlessScene::new(), ManualClock::new());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_step_consumes_input() {
        let mut game = session();
        game.input_mut().key_down("d");
        game.input_mut().key_down(" ");

        game.step();
        let avatar = &game.state().avatar;
        assert!((avatar.position.x - 0.15).abs() < 1e-6);
        assert!(avatar.is_jumping);

        // Jump is one-shot; direction keys stay held.
        let vy = game.state().avatar.velocity.y;
        game.step();
        assert!((game.state().avatar.velocity.y - (vy - 0.01)).abs() < 1e-6);
        assert!((game.state().avatar.position.x - 0.30).abs() < 1e-5);
    }

    #[test]
    fn test_recording_matches_sampled_input() {
        let mut game = session();
        game.start_recording();
        game.input_mut().touch_down("left");
        game.step();
        game.input_mut().touch_up("left");
        game.step();

        let recording = game.take_recording().expect("recording");
        assert_eq!(recording.end_frame, 2);
        assert_eq!(recording.input_at(1).move_x, -1);
        assert!(recording.input_at(2).is_idle());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut game = session();
        let (tx, rx) = broadcast::channel(1);

        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = tx.send(());
        });

        let frames = game.run(60, rx).await;
        stopper.await.expect("stopper task");
        assert!(frames > 0);
        assert_eq!(game.scene().frames_rendered(), frames);
    }
}
