//! Difficulty presets
//!
//! Immutable named bundles of the knobs that make a round easier or harder.
//! Changing difficulty swaps which bundle is active; the bundles themselves
//! never mutate.

use serde::{Deserialize, Serialize};

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty name, falling back to `Normal` on anything
    /// unknown. A garbled host message must never stall the loop.
    pub fn from_name_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("unknown difficulty {:?}, using normal", s);
            Difficulty::Normal
        })
    }

    /// The parameter bundle for this level
    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                search_depth: 4,
                paddle_speed: 300.0,
                paddle_width: 160.0,
                bounce_speed: 1200.0,
                max_ball_vx: 200.0,
            },
            Difficulty::Normal => DifficultyPreset {
                search_depth: 6,
                paddle_speed: 360.0,
                paddle_width: 120.0,
                bounce_speed: 1500.0,
                max_ball_vx: 260.0,
            },
            Difficulty::Hard => DifficultyPreset {
                search_depth: 8,
                paddle_speed: 420.0,
                paddle_width: 90.0,
                bounce_speed: 1800.0,
                max_ball_vx: 320.0,
            },
        }
    }
}

/// Tuning values bundled per difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    /// Decision plies the paddle AI searches ahead
    pub search_depth: u8,
    /// Paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// Paddle catch-surface width
    pub paddle_width: f32,
    /// Upward launch speed a catch imparts (pixels/s)
    pub bounce_speed: f32,
    /// Cap on the horizontal speed a catch can impart (pixels/s)
    pub max_ball_vx: f32,
}
