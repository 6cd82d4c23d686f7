//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, drawn once per round at spawn
//! - No rendering, storage or platform dependencies
//!
//! The host drives everything through [`scheduler::GameLoop`]; the pieces
//! are exposed individually for direct testing.

pub mod scheduler;
pub mod search;
pub mod state;
pub mod tick;

pub use scheduler::{GameLoop, StatusSnapshot};
pub use search::choose_action;
pub use state::{Ball, Paddle, RoundPhase, RoundState};
pub use tick::{Action, StepEvents, tick};
