use super::{Evaluation, Evaluator};
use crate::game::moves::MoveList;
use crate::game::state::State;
use crate::rng;

/// Uniform priors; the value is the result of a uniformly random playout.
#[derive(Clone, Copy, Debug)]
pub struct RolloutEvaluator {
    /// Plies before the playout stops and the score difference decides.
    pub max_plies: usize,
}

impl Default for RolloutEvaluator {
    fn default() -> Self { Self { max_plies: 200 } }
}

impl RolloutEvaluator {
    pub fn new(max_plies: usize) -> Self { Self { max_plies } }

    /// Playout value for `player`.
    pub fn playout(&self, state: &State, player: usize) -> f32 {
        let mut s = *state;
        let mut moves = MoveList::new();
        for _ in 0..self.max_plies {
            if s.is_terminal() {
                return s.outcome_for(player) as f32;
            }
            let n = s.legal_moves(&mut moves);
            debug_assert!(n > 0, "no legal moves in a live position");
            s.step(moves[rng::gen_index(n)]);
        }
        if s.is_terminal() {
            return s.outcome_for(player) as f32;
        }
        // unfinished: scaled score lead
        let lead = s.board(player).score() - s.board(player ^ 1).score();
        (lead as f32 / 20.0).clamp(-1.0, 1.0)
    }
}

impl Evaluator for RolloutEvaluator {
    fn evaluate(&mut self, state: &State) -> Evaluation {
        Evaluation::uniform(self.playout(state, state.turn()))
    }
}
