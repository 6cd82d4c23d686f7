//! Drop Catch - deterministic core for a falling-object catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, search AI, game loop)
//! - `difficulty`: Named difficulty presets
//! - `highscores`: Session leaderboard (persistence is the host's job)
//!
//! The crate is a library with no I/O of its own: rendering, input capture,
//! storage and host messaging are collaborators that call into it and read
//! snapshots back. Coordinates are screen-style - x grows rightward, y grows
//! downward - so gravity is a positive y acceleration and "up" is negative y.

pub mod difficulty;
pub mod highscores;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyPreset};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    ///
    /// The search AI projects with the same delta; if the two ever diverge,
    /// predictions diverge from reality.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Y coordinate of the landing plane where ball/paddle interaction is
    /// resolved. There is no floor below it - a ball that misses the paddle
    /// ends the round instead of bouncing.
    pub const PADDLE_PLANE_Y: f32 = 560.0;
    /// Paddle thickness (drawn below the landing plane by the renderer)
    pub const PADDLE_HEIGHT: f32 = 14.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Spawn height for a fresh ball
    pub const BALL_SPAWN_Y: f32 = 80.0;
    /// Horizontal spawn margin keeps round starts off the walls
    pub const BALL_SPAWN_MARGIN: f32 = 60.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;
}
