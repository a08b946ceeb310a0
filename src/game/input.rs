//! Input Aggregation and Recording
//!
//! Merges keyboard and touch state into one movement intent per frame,
//! turns the jump key into a one-shot request, and records the resulting
//! frames for replay.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Serialize, Deserialize};

// =============================================================================
// DIRECTIONS
// =============================================================================

/// Logical movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward -Z
    Up = 0,
    /// Toward +Z
    Down = 1,
    /// Toward -X
    Left = 2,
    /// Toward +X
    Right = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Parse a touch/mouse control name ("up", "down", "left", "right").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a keyboard key name (arrows or WASD, any case).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Up),
            "arrowdown" | "s" => Some(Direction::Down),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Is this key name the jump key?
pub fn is_jump_key(key: &str) -> bool {
    key == " " || key.eq_ignore_ascii_case("space")
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Input consumed by one simulation frame.
///
/// Axis values are the raw sum of the active directions, so opposing
/// directions cancel to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// -1 (left), 0, +1 (right)
    pub move_x: i8,

    /// -1 (up), 0, +1 (down)
    pub move_z: i8,

    /// Action flags (packed bits):
    /// - Bit 0: Jump requested this frame
    pub flags: u8,
}

impl InputFrame {
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x01;

    /// Idle frame.
    pub const fn new() -> Self {
        Self { move_x: 0, move_z: 0, flags: 0 }
    }

    /// Frame with raw axis values. Values are clamped to [-1, 1].
    pub fn with_movement(move_x: i8, move_z: i8) -> Self {
        Self {
            move_x: move_x.clamp(-1, 1),
            move_z: move_z.clamp(-1, 1),
            flags: 0,
        }
    }

    /// Frame built from active direction flags.
    pub fn from_directions(active: [bool; 4]) -> Self {
        let [up, down, left, right] = active;
        Self {
            move_x: right as i8 - left as i8,
            move_z: down as i8 - up as i8,
            flags: 0,
        }
    }

    /// Movement intent on the ground plane (x, z).
    ///
    /// Either zero or unit length, so diagonals are no faster than axes.
    #[inline]
    pub fn move_direction(&self) -> Vec2 {
        Vec2::new(self.move_x as f32, self.move_z as f32).normalize_or_zero()
    }

    /// Check if jump was requested this frame.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Set jump flag.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_JUMP;
        } else {
            self.flags &= !Self::FLAG_JUMP;
        }
    }

    /// Builder form of [`set_jump`](Self::set_jump).
    #[inline]
    pub fn jumping(mut self) -> Self {
        self.set_jump(true);
        self
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_z == 0 && self.flags == 0
    }
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Current raw input from keyboard and touch, merged by logical OR.
///
/// The external input layer calls the `key_*` and `touch_*` methods as
/// events arrive; the frame loop calls [`sample`](Self::sample) once per
/// frame.
#[derive(Clone, Debug, Default)]
pub struct InputAggregator {
    /// Lowercased names of held direction keys.
    held_keys: BTreeSet<String>,
    /// Touch/mouse direction flags, indexed by `Direction as usize`.
    touch: [bool; 4],
    /// Jump key currently held (suppresses auto-repeat).
    jump_held: bool,
    /// Jump requested since the last sample.
    jump_pending: bool,
}

impl InputAggregator {
    /// Create with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard key went down. Unknown keys are ignored.
    pub fn key_down(&mut self, key: &str) {
        if is_jump_key(key) {
            if !self.jump_held {
                self.jump_held = true;
                self.jump_pending = true;
            }
            return;
        }
        if Direction::from_key(key).is_some() {
            self.held_keys.insert(key.to_ascii_lowercase());
        }
    }

    /// Keyboard key went up.
    pub fn key_up(&mut self, key: &str) {
        if is_jump_key(key) {
            self.jump_held = false;
            return;
        }
        self.held_keys.remove(&key.to_ascii_lowercase());
    }

    /// Set a touch/mouse direction by name. Unknown names are ignored.
    pub fn set_touch(&mut self, name: &str, pressed: bool) {
        if let Some(direction) = Direction::from_name(name) {
            self.touch[direction as usize] = pressed;
        }
    }

    /// Touch/mouse control pressed.
    pub fn touch_down(&mut self, name: &str) {
        self.set_touch(name, true);
    }

    /// Touch/mouse control released.
    pub fn touch_up(&mut self, name: &str) {
        self.set_touch(name, false);
    }

    /// Is `direction` asserted by any source?
    pub fn is_active(&self, direction: Direction) -> bool {
        self.touch[direction as usize]
            || self
                .held_keys
                .iter()
                .any(|key| Direction::from_key(key) == Some(direction))
    }

    /// Build this frame's input and consume the pending jump request.
    pub fn sample(&mut self) -> InputFrame {
        let active = Direction::ALL.map(|d| self.is_active(d));
        let mut frame = InputFrame::from_directions(active);
        frame.set_jump(std::mem::take(&mut self.jump_pending));
        frame
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// A frame's input, stored only when it differs from the previous frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input began
    pub frame: u64,
    /// The new input
    pub input: InputFrame,
}

/// Delta-compressed input log for one session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed the session ran with
    pub rng_seed: u64,

    /// Last recorded frame
    pub end_frame: u64,

    deltas: Vec<InputDelta>,

    #[serde(skip)]
    last_input: InputFrame,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            end_frame: 0,
            deltas: Vec::with_capacity(256),
            last_input: InputFrame::new(),
        }
    }

    /// Record the input used on `frame` (frames start at 1).
    pub fn record(&mut self, frame: u64, input: InputFrame) {
        self.end_frame = frame;
        if input != self.last_input || self.deltas.is_empty() {
            self.deltas.push(InputDelta { frame, input });
            self.last_input = input;
        }
    }

    /// Input in effect on `frame`.
    pub fn input_at(&self, frame: u64) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].input
        }
    }

    /// All stored deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Iterate `(frame, input)` for frames `1..=end_frame`.
    pub fn replay_iter(&self) -> impl Iterator<Item = (u64, InputFrame)> + '_ {
        let mut delta_idx = 0;
        let mut current = InputFrame::new();
        (1..=self.end_frame).map(move |frame| {
            while let Some(delta) = self.deltas.get(delta_idx) {
                if delta.frame > frame {
                    break;
                }
                current = delta.input;
                delta_idx += 1;
            }
            (frame, current)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
