//! PUCT Monte-Carlo tree search over [`State`] values.
//!
//! The tree is implicit: statistics live in hash tables keyed by the state's
//! hash and by `(state hash, move id)`, so transpositions share statistics.
//! Values are always from the point of view of the player to move at the
//! state they belong to; since turns do not strictly alternate across round
//! boundaries, backup flips the sign only when the mover changes.

use crate::config::MctsParams;
use crate::eval::Evaluator;
use crate::game::moves::{Move, MoveList};
use crate::game::state::State;
use crate::game::NUM_MOVES;
use crate::search::noise::add_dirichlet_noise;
use log::debug;
use std::collections::HashMap;

const TABLE_RESERVE: usize = 1 << 17;

#[derive(Clone, Copy, Debug, Default)]
struct EdgeStats {
    n: u32,
    w: f32,
    q: f32,
    p: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub simulations: u64,
    pub expansions: u64,
    pub terminal_hits: u64,
    pub depth_cutoffs: u64,
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Move-id indexed policy derived from root visit counts.
    pub policy: [f32; NUM_MOVES],
    /// Most visited root move; `None` on terminal positions.
    pub best: Option<Move>,
    /// Mean backed-up root value for the player to move.
    pub value: f32,
}

pub struct Mcts<E: Evaluator> {
    params: MctsParams,
    evaluator: E,
    visits: HashMap<u64, u32>,
    edges: HashMap<(u64, u8), EdgeStats>,
    stats: SearchStats,
}

#[inline]
fn edge_key(s: u64, mv: Move) -> (u64, u8) { (s, mv.id() as u8) }

impl<E: Evaluator> Mcts<E> {
    pub fn new(params: MctsParams, evaluator: E) -> Self {
        Self {
            params,
            evaluator,
            visits: HashMap::with_capacity(TABLE_RESERVE),
            edges: HashMap::with_capacity(TABLE_RESERVE),
            stats: SearchStats::default(),
        }
    }

    pub fn params(&self) -> &MctsParams { &self.params }
    pub fn params_mut(&mut self) -> &mut MctsParams { &mut self.params }
    pub fn evaluator_mut(&mut self) -> &mut E { &mut self.evaluator }
    pub fn stats(&self) -> SearchStats { self.stats }

    /// Number of expanded states.
    pub fn len(&self) -> usize { self.visits.len() }

    pub fn is_empty(&self) -> bool { self.visits.is_empty() }

    /// Drop all statistics.
    pub fn clear(&mut self) {
        self.visits.clear();
        self.edges.clear();
        self.stats = SearchStats::default();
    }

    /// Visit count N(s, a), zero if unseen.
    pub fn visit_count(&self, state: &State, mv: Move) -> u32 {
        self.edges.get(&edge_key(state.hash(), mv)).map_or(0, |e| e.n)
    }

    /// Prior P(s, a), zero if unseen.
    pub fn prior(&self, state: &State, mv: Move) -> f32 {
        self.edges.get(&edge_key(state.hash(), mv)).map_or(0.0, |e| e.p)
    }

    /// Run the configured number of simulations from `state` and derive a
    /// policy with the configured temperature.
    pub fn search(&mut self, state: &State) -> SearchResult {
        let temperature = self.params.temperature;
        self.search_with_temperature(state, temperature)
    }

    pub fn search_with_temperature(&mut self, state: &State, temperature: f32) -> SearchResult {
        let moves = state.moves();
        if state.is_terminal() || moves.is_empty() {
            return SearchResult { policy: [0.0; NUM_MOVES], best: None, value: 0.0 };
        }
        let s = state.hash();
        let before = self.stats;

        let mut remaining = self.params.simulations;
        if !self.visits.contains_key(&s) {
            self.simulate(state, 0);
            self.stats.simulations += 1;
            remaining = remaining.saturating_sub(1);
        }

        // Root noise is temporary: the stored priors are restored afterwards.
        let saved: Vec<f32> = moves.iter().map(|&m| self.edges.get(&edge_key(s, m)).map_or(0.0, |e| e.p)).collect();
        if self.params.dirichlet_epsilon > 0.0 {
            let mut noisy = saved.clone();
            add_dirichlet_noise(&mut noisy, self.params.dirichlet_alpha, self.params.dirichlet_epsilon);
            self.set_priors(s, &moves, &noisy);
        }

        for _ in 0..remaining {
            self.simulate(state, 0);
            self.stats.simulations += 1;
        }
        self.set_priors(s, &moves, &saved);

        let result = self.result(s, &moves, temperature);
        debug!(
            "search: {} sims, {} expansions, {} terminal, {} cutoffs, value {:.3}, best {:?}",
            self.stats.simulations - before.simulations,
            self.stats.expansions - before.expansions,
            self.stats.terminal_hits - before.terminal_hits,
            self.stats.depth_cutoffs - before.depth_cutoffs,
            result.value,
            result.best.map(|m| m.to_string()),
        );
        result
    }

    fn set_priors(&mut self, s: u64, moves: &MoveList, priors: &[f32]) {
        for (&m, &p) in moves.iter().zip(priors) {
            if let Some(e) = self.edges.get_mut(&edge_key(s, m)) { e.p = p; }
        }
    }

    fn result(&self, s: u64, moves: &MoveList, temperature: f32) -> SearchResult {
        let stats: Vec<EdgeStats> = moves.iter().map(|&m| self.edges.get(&edge_key(s, m)).copied().unwrap_or_default()).collect();

        let mut best_idx = 0;
        for (i, e) in stats.iter().enumerate() {
            let b = &stats[best_idx];
            if e.n > b.n || (e.n == b.n && e.p > b.p) { best_idx = i; }
        }
        let best = moves[best_idx];

        let mut policy = [0.0f32; NUM_MOVES];
        let total: u32 = stats.iter().map(|e| e.n).sum();
        if temperature <= 0.0 {
            policy[best.id()] = 1.0;
        } else if total > 0 {
            let mut sum = 0.0f32;
            for (&m, e) in moves.iter().zip(&stats) {
                let p = (e.n as f32).powf(1.0 / temperature);
                policy[m.id()] = p;
                sum += p;
            }
            if sum > 0.0 && sum.is_finite() {
                for p in policy.iter_mut() { *p /= sum; }
            } else {
                policy = [0.0; NUM_MOVES];
                policy[best.id()] = 1.0;
            }
        } else {
            let sum: f32 = stats.iter().map(|e| e.p).sum();
            for (&m, e) in moves.iter().zip(&stats) {
                policy[m.id()] = if sum > 0.0 { e.p / sum } else { 1.0 / moves.len() as f32 };
            }
        }

        let w: f32 = stats.iter().map(|e| e.w).sum();
        let value = if total > 0 { w / total as f32 } else { 0.0 };
        SearchResult { policy, best: Some(best), value }
    }

    /// One simulation; returns the value for the player to move at `state`.
    fn simulate(&mut self, state: &State, depth: usize) -> f32 {
        if state.is_terminal() {
            self.stats.terminal_hits += 1;
            return state.outcome_for(state.turn()) as f32;
        }
        let moves = state.moves();
        assert!(!moves.is_empty(), "no legal moves in a non-terminal state");
        let s = state.hash();

        if !self.visits.contains_key(&s) {
            return self.expand(state, s, &moves);
        }
        if depth >= self.params.max_depth {
            self.stats.depth_cutoffs += 1;
            return self.evaluator.evaluate(state).value.clamp(-1.0, 1.0);
        }

        let mv = self.select(s, &moves);
        let mut child = *state;
        child.step(mv);
        let child_value = self.simulate(&child, depth + 1);
        let v = if child.turn() == state.turn() { child_value } else { -child_value };

        let e = self.edges.entry(edge_key(s, mv)).or_default();
        e.n += 1;
        e.w += v;
        e.q = e.w / e.n as f32;
        *self.visits.entry(s).or_insert(0) += 1;
        v
    }

    fn select(&self, s: u64, moves: &MoveList) -> Move {
        let n_s = self.visits.get(&s).copied().unwrap_or(0);
        let sqrt_n = (n_s.max(1) as f32).sqrt();
        let mut best = moves[0];
        let mut best_u = f32::NEG_INFINITY;
        for &m in moves {
            let e = self.edges.get(&edge_key(s, m)).copied().unwrap_or_default();
            let u = e.q + self.params.cpuct * e.p * sqrt_n / (1.0 + e.n as f32);
            if u > best_u {
                best_u = u;
                best = m;
            }
        }
        best
    }

    fn expand(&mut self, state: &State, s: u64, moves: &MoveList) -> f32 {
        let eval = self.evaluator.evaluate(state);
        let raw: Vec<f32> = moves
            .iter()
            .map(|m| eval.policy.get(m.id()).copied().filter(|p| p.is_finite() && *p > 0.0).unwrap_or(0.0))
            .collect();
        let sum: f32 = raw.iter().sum();
        let uniform = 1.0 / moves.len() as f32;
        for (&m, &r) in moves.iter().zip(&raw) {
            let p = if sum > 0.0 { r / sum } else { uniform };
            self.edges.insert(edge_key(s, m), EdgeStats { p, ..EdgeStats::default() });
        }
        self.visits.insert(s, 0);
        self.stats.expansions += 1;
        if eval.value.is_nan() { 0.0 } else { eval.value.clamp(-1.0, 1.0) }
    }

    /// Top root moves by visits as a table.
    pub fn statistics_string(&self, state: &State) -> String {
        let s = state.hash();
        let moves = state.moves();
        let n_s = self.visits.get(&s).copied().unwrap_or(0);
        let sqrt_n = (n_s.max(1) as f32).sqrt();
        let mut rows: Vec<(Move, EdgeStats)> =
            moves.iter().map(|&m| (m, self.edges.get(&edge_key(s, m)).copied().unwrap_or_default())).collect();
        rows.sort_by(|a, b| b.1.n.cmp(&a.1.n));

        let mut out = String::from("|   move   |     P     |     N     |     Q     |    UCT    |\n");
        for (m, e) in rows.iter().take(10) {
            let u = e.q + self.params.cpuct * e.p * sqrt_n / (1.0 + e.n as f32);
            out.push_str(&format!("|{:^10}|{:^11.4}|{:^11}|{:^11.4}|{:^11.4}|\n", m.to_string(), e.p, e.n, e.q, u));
        }
        out
    }
}
