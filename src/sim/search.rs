//! Look-ahead paddle steering
//!
//! The paddle must commit to a discrete command before the ball's path has
//! played out, so each autonomous tick runs a bounded search over the three
//! commands. Plies alternate: a decision ply picks the best of the three
//! commands (tracking alpha), then a propagation ply advances the ball one
//! forced step with the paddle held (tracking beta). The propagation ply is
//! not an adversary picking the worst outcome - it is physics - but it
//! folds its own alignment into beta, so a line is never worth more than
//! the worst alignment it passes through and the bookkeeping still cuts
//! dominated branches. The asymmetric shape is intentional: the falling
//! ball is not an opponent, and modeling a worst-case adversary would
//! misstate the game.

use crate::consts::*;
use crate::sim::state::{Ball, Paddle};
use crate::sim::tick::Action;

/// Value of a projection that lands on the paddle
const CATCH_VALUE: f32 = 1000.0;
/// Value of a projection that lands off the paddle
const MISS_VALUE: f32 = -1000.0;
/// Hard ceiling on expanded nodes; guards misconfigured depths
const NODE_CEILING: u32 = 100_000;

/// Ephemeral ball/paddle snapshot pair carried through one decision
#[derive(Debug, Clone, Copy)]
struct Projection {
    ball: Ball,
    paddle: Paddle,
}

impl Projection {
    /// One step of the simplified look-ahead integrator: the paddle moves
    /// by its command, the ball falls under gravity alone. Walls, ceiling
    /// and horizontal drift are skipped - the horizon is short and the leaf
    /// heuristic tolerates it. An approximation, not an oversight.
    fn advance(&self, action: Action) -> Projection {
        let mut next = *self;
        next.paddle.x += action.direction() * next.paddle.speed * SIM_DT;
        next.paddle.clamp_to_field();
        next.ball.vel.y += GRAVITY * SIM_DT;
        next.ball.pos.y += next.ball.vel.y * SIM_DT;
        next
    }

    /// The ball falls one step with the paddle held where it was commanded
    fn coast(&self) -> Projection {
        let mut next = *self;
        next.ball.vel.y += GRAVITY * SIM_DT;
        next.ball.pos.y += next.ball.vel.y * SIM_DT;
        next
    }

    fn landed(&self) -> bool {
        self.ball.pos.y + self.ball.radius >= PADDLE_PLANE_Y
    }

    fn terminal_value(&self) -> f32 {
        if self.paddle.covers(self.ball.pos.x) {
            CATCH_VALUE
        } else {
            MISS_VALUE
        }
    }

    /// Negated distance from paddle center to the landing estimate.
    /// Nothing accelerates the ball horizontally between collisions, so its
    /// current x is already the best estimate available here.
    fn heuristic(&self) -> f32 {
        -(self.paddle.x - self.ball.pos.x).abs()
    }
}

/// Node budget shared across one decision
struct Budget {
    nodes: u32,
    exhausted: bool,
}

impl Budget {
    fn new() -> Self {
        Self {
            nodes: 0,
            exhausted: false,
        }
    }

    /// Charge one expansion; false once the ceiling is hit
    fn charge(&mut self) -> bool {
        if self.nodes >= NODE_CEILING {
            self.exhausted = true;
            return false;
        }
        self.nodes += 1;
        true
    }
}

/// Pick the paddle command for this tick
///
/// Searches `depth` decision plies ahead, three commands per ply, pruning
/// with alpha-beta. Ties break toward the earlier command in `Action::ALL`
/// order. If the node ceiling is hit the best fully evaluated command so
/// far is returned instead of panicking; a stalled loop is worse than a
/// slightly wrong move.
pub fn choose_action(ball: &Ball, paddle: &Paddle, depth: u8) -> Action {
    let root = Projection {
        ball: *ball,
        paddle: *paddle,
    };

    let mut budget = Budget::new();
    let mut best_action = Action::Stay;
    let mut best_value = f32::NEG_INFINITY;
    let mut alpha = f32::NEG_INFINITY;

    for action in Action::ALL {
        let next = root.advance(action);
        let value = if next.landed() {
            next.terminal_value()
        } else if depth <= 1 {
            next.heuristic()
        } else {
            propagation_value(&next, depth - 1, alpha, f32::INFINITY, &mut budget)
        };

        if budget.exhausted {
            log::warn!(
                "search budget exhausted after {} nodes, keeping {:?}",
                budget.nodes,
                best_action
            );
            break;
        }

        if value > best_value {
            best_value = value;
            best_action = action;
        }
        alpha = alpha.max(value);
    }

    best_action
}

/// Maximizing ply: the controlled actor picks the best of three commands
fn decision_value(
    node: &Projection,
    depth: u8,
    mut alpha: f32,
    beta: f32,
    budget: &mut Budget,
) -> f32 {
    let mut best = f32::NEG_INFINITY;

    for action in Action::ALL {
        if !budget.charge() {
            return best.max(node.heuristic());
        }

        let next = node.advance(action);
        let value = if next.landed() {
            next.terminal_value()
        } else if depth <= 1 {
            next.heuristic()
        } else {
            propagation_value(&next, depth - 1, alpha, beta, budget)
        };

        best = best.max(value);
        alpha = alpha.max(value);
        if beta <= alpha {
            break;
        }
    }

    best
}

/// Propagation ply: a single forced physics continuation with the paddle
/// held at its last commanded position
fn propagation_value(
    node: &Projection,
    depth: u8,
    alpha: f32,
    mut beta: f32,
    budget: &mut Budget,
) -> f32 {
    let next = node.coast();
    if next.landed() {
        return next.terminal_value();
    }

    // The forced ply scores no better than its own alignment
    beta = beta.min(next.heuristic());
    if beta <= alpha {
        return beta;
    }

    decision_value(&next, depth, alpha, beta, budget).min(beta)
}
