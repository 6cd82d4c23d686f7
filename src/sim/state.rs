//! Round state and core simulation types
//!
//! Everything that must be cloned or compared for determinism lives here.
//! The spawn draw at round creation is the only randomness in the crate;
//! every later mutation is a pure function of state and input.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyPreset};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active simulation
    Running,
    /// Host-requested pause; elapsed time is discarded, not buffered
    Paused,
    /// Ball missed the paddle; nothing integrates until a reset
    RoundOver,
}

/// The falling ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Spawn a fresh ball with randomized x and bounded horizontal drift.
    /// The drift bound matches what a catch can impart, so the wall-bounds
    /// invariant holds from the first tick.
    pub fn spawn(rng: &mut Pcg32, preset: &DifficultyPreset) -> Self {
        let x = rng.random_range(BALL_SPAWN_MARGIN..PLAYFIELD_WIDTH - BALL_SPAWN_MARGIN);
        let vx = rng.random_range(-preset.max_ball_vx..preset.max_ball_vx);
        Self {
            pos: Vec2::new(x, BALL_SPAWN_Y),
            vel: Vec2::new(vx, 0.0),
            radius: BALL_RADIUS,
        }
    }
}

/// The catching paddle, anchored to the landing plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Width of the catch surface
    pub width: f32,
    /// Thickness below the landing plane
    pub height: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
}

impl Paddle {
    pub fn new(preset: &DifficultyPreset) -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0,
            width: preset.paddle_width,
            height: PADDLE_HEIGHT,
            speed: preset.paddle_speed,
        }
    }

    /// Left edge of the catch surface
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    /// Right edge of the catch surface
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Whether an x coordinate falls on the catch surface
    pub fn covers(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    /// Keep the full extent inside the playfield
    pub fn clamp_to_field(&mut self) {
        let half = self.width / 2.0;
        self.x = self.x.clamp(half, PLAYFIELD_WIDTH - half);
    }

    /// Apply a new preset mid-round; the extent is re-clamped immediately
    pub fn apply_preset(&mut self, preset: &DifficultyPreset) {
        self.width = preset.paddle_width;
        self.speed = preset.paddle_speed;
        self.clamp_to_field();
    }
}

/// Complete per-round state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Seed used for the spawn draw, kept for reproducibility
    pub seed: u64,
    /// Active difficulty level
    pub difficulty: Difficulty,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Consecutive catches this round
    pub score: u32,
    /// Paddle driven by the search AI instead of external input
    pub autonomous: bool,
    pub phase: RoundPhase,
    /// Simulation tick counter
    pub ticks: u64,
}

impl RoundState {
    /// Create a fresh round with a host-supplied seed
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let preset = difficulty.preset();
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            seed,
            difficulty,
            ball: Ball::spawn(&mut rng, &preset),
            paddle: Paddle::new(&preset),
            score: 0,
            autonomous: true,
            phase: RoundPhase::Running,
            ticks: 0,
        }
    }

    /// The active parameter bundle
    pub fn preset(&self) -> DifficultyPreset {
        self.difficulty.preset()
    }

    /// Switch difficulty mid-round. Paddle dimensions change right away and
    /// are clamped back into the field; the ball keeps its current motion.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.paddle.apply_preset(&difficulty.preset());
    }
}
