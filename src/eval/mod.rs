//! Position evaluation for the search: a prior over move ids and a value.
//!
//! A neural network lives outside this crate; anything that can produce an
//! [`Evaluation`] for a [`State`] plugs in through [`Evaluator`].

pub mod rollout;

use crate::game::state::State;
use crate::game::NUM_MOVES;
use crate::rng;

pub use rollout::RolloutEvaluator;

/// Output of one evaluation. `policy` is indexed by move id and need not be
/// normalised or restricted to legal moves; `value` is in `[-1, 1]` from the
/// point of view of the player to move.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub policy: Vec<f32>,
    pub value: f32,
}

impl Evaluation {
    pub fn uniform(value: f32) -> Self {
        Self { policy: vec![1.0; NUM_MOVES], value }
    }
}

/// Synchronous evaluation; may block while a backend batches work.
pub trait Evaluator {
    fn evaluate(&mut self, state: &State) -> Evaluation;
}

/// Random priors in `[0, 1)` and a random value in `[-1, 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomEvaluator;

impl Evaluator for RandomEvaluator {
    fn evaluate(&mut self, _state: &State) -> Evaluation {
        let policy = (0..NUM_MOVES).map(|_| rng::gen_f32(1.0)).collect();
        Evaluation { policy, value: rng::gen_f32(2.0) - 1.0 }
    }
}

/// Adapter for closures, mostly for tests and external backends.
pub struct FnEvaluator<F>(pub F);

impl<F: FnMut(&State) -> Evaluation> Evaluator for FnEvaluator<F> {
    fn evaluate(&mut self, state: &State) -> Evaluation { (self.0)(state) }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, state: &State) -> Evaluation { (**self).evaluate(state) }
}
