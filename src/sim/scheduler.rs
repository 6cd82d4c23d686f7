//! Host-driven game loop
//!
//! The host calls `advance` once per external timing pulse with the
//! wall-clock seconds since the previous call. Elapsed time goes into an
//! accumulator and whole fixed steps are drained from it, so the
//! simulation's numerical behavior is independent of the host's timing
//! granularity. Pausing discards elapsed time instead of buffering it;
//! resuming never causes a burst of catch-up steps.

use serde::Serialize;

use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::highscores::HighScores;
use crate::sim::search::choose_action;
use crate::sim::state::{RoundPhase, RoundState};
use crate::sim::tick::{Action, StepEvents, tick};

/// Status shape an embedding host reads after each advance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub score: u32,
    /// Best of the current run and the session's finished rounds; the host
    /// decides whether to persist it
    pub high_score_candidate: u32,
    pub difficulty: Difficulty,
    pub paused: bool,
}

/// Stateful driver owning the round and the step accumulator
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: RoundState,
    accumulator: f32,
    /// Last externally supplied command, used in manual mode
    manual_action: Action,
    /// Session leaderboard, fed when a round ends
    scores: HighScores,
}

impl GameLoop {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            state: RoundState::new(difficulty, seed),
            accumulator: 0.0,
            manual_action: Action::Stay,
            scores: HighScores::new(),
        }
    }

    /// Read-only view of the round for the rendering collaborator
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Session leaderboard
    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Supply the input collaborator's current command. Autonomous mode
    /// ignores it.
    pub fn set_manual_action(&mut self, action: Action) {
        self.manual_action = action;
    }

    pub fn set_autonomous(&mut self, autonomous: bool) {
        self.state.autonomous = autonomous;
    }

    /// Feed elapsed wall-clock seconds and run the whole steps they cover
    pub fn advance(&mut self, elapsed: f32) -> StepEvents {
        let mut events = StepEvents::default();

        // A paused or finished round consumes nothing
        if self.state.phase != RoundPhase::Running {
            self.accumulator = 0.0;
            return events;
        }

        self.accumulator += elapsed.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let action = if self.state.autonomous {
                choose_action(
                    &self.state.ball,
                    &self.state.paddle,
                    self.state.preset().search_depth,
                )
            } else {
                self.manual_action
            };

            let score_before = self.state.score;
            let step = tick(&mut self.state, action, SIM_DT);
            if step.missed {
                self.scores.add_score(score_before, self.state.difficulty);
            }
            events.merge(step);

            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.state.phase != RoundPhase::Running {
                self.accumulator = 0.0;
                break;
            }
        }

        events
    }

    /// Stop consuming time. Idempotent; a finished round stays finished.
    pub fn pause(&mut self) {
        if self.state.phase == RoundPhase::Running {
            self.state.phase = RoundPhase::Paused;
            self.accumulator = 0.0;
        }
    }

    /// Resume a paused round. A finished round needs a reset instead.
    pub fn resume(&mut self) {
        if self.state.phase == RoundPhase::Paused {
            self.state.phase = RoundPhase::Running;
        }
    }

    /// Start a fresh round, keeping difficulty, mode and session scores
    pub fn reset(&mut self, seed: u64) {
        let autonomous = self.state.autonomous;
        self.state = RoundState::new(self.state.difficulty, seed);
        self.state.autonomous = autonomous;
        self.accumulator = 0.0;
        self.manual_action = Action::Stay;
    }

    /// Change difficulty; paddle dimensions are re-clamped immediately and
    /// the next autonomous decision searches at the new depth
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.set_difficulty(difficulty);
    }

    /// Status for the embedding host's cross-frame channel
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            score: self.state.score,
            high_score_candidate: self
                .state
                .score
                .max(self.scores.top_score().unwrap_or(0)),
            difficulty: self.state.difficulty,
            paused: self.state.phase != RoundPhase::Running,
        }
    }
}
