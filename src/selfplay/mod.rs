use crate::config::{EvaluatorKind, SelfPlayConfig};
use crate::eval::{Evaluator, RandomEvaluator, RolloutEvaluator};
use crate::game::magics::init_table;
use crate::game::moves::Move;
use crate::game::state::{GameResult, State};
use crate::game::NUM_MOVES;
use crate::rng::{self, splitmix64};
use crate::search::mcts::Mcts;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

pub struct GameRecord {
    pub moves: Vec<Move>,
    /// Search policy at each ply, indexed by move id.
    pub policies: Vec<[f32; NUM_MOVES]>,
    pub scores: [i16; 2],
    /// `None` if the ply cap ended the game.
    pub result: Option<GameResult>,
    pub rounds: usize,
    pub final_state: State,
}

/// Aggregate of a batch of games.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub avg_plies: f64,
    pub avg_score: [f64; 2],
}

impl MatchSummary {
    pub fn from_records(games: &[GameRecord]) -> Self {
        let mut s = MatchSummary { games: games.len(), ..Default::default() };
        for g in games {
            match g.result {
                Some(GameResult::FirstPlayer) => s.first_wins += 1,
                Some(GameResult::SecondPlayer) => s.second_wins += 1,
                Some(GameResult::Draw) => s.draws += 1,
                None => s.unfinished += 1,
            }
            s.avg_plies += g.moves.len() as f64;
            s.avg_score[0] += g.scores[0] as f64;
            s.avg_score[1] += g.scores[1] as f64;
        }
        if !games.is_empty() {
            let n = games.len() as f64;
            s.avg_plies /= n;
            s.avg_score[0] /= n;
            s.avg_score[1] /= n;
        }
        s
    }
}

fn make_evaluator(kind: EvaluatorKind) -> Box<dyn Evaluator> {
    match kind {
        EvaluatorKind::Random => Box::new(RandomEvaluator),
        EvaluatorKind::Rollout => Box::new(RolloutEvaluator::default()),
    }
}

/// Sample a move id from `policy`; falls back to `fallback` on an empty policy.
fn sample_policy(policy: &[f32; NUM_MOVES], fallback: Move) -> Move {
    let r = rng::gen_f32(1.0);
    let mut cdf = 0.0f32;
    let mut last = None;
    for (id, &p) in policy.iter().enumerate() {
        if p <= 0.0 { continue; }
        cdf += p;
        last = Some(id);
        if r < cdf {
            return Move::from_id(id).unwrap_or(fallback);
        }
    }
    last.and_then(|id| Move::from_id(id).ok()).unwrap_or(fallback)
}

/// Play one game with MCTS on both sides. The calling thread's RNG is
/// reseeded from `seed`, so a game is reproducible on its own.
pub fn play_game(cfg: &SelfPlayConfig, seed: u64) -> GameRecord {
    play_game_with(cfg, seed, |_, _| {})
}

/// As [`play_game`], calling `on_ply` with each position and the move played.
pub fn play_game_with<F>(cfg: &SelfPlayConfig, seed: u64, mut on_ply: F) -> GameRecord
where
    F: FnMut(&State, Move),
{
    init_table();
    rng::seed(seed);
    let mut mcts = Mcts::new(cfg.mcts, make_evaluator(cfg.evaluator));
    let mut state = State::new();
    let mut record = GameRecord { moves: Vec::new(), policies: Vec::new(), scores: [0; 2], result: None, rounds: 1, final_state: state };

    while !state.is_terminal() && record.moves.len() < cfg.max_plies {
        let ply = record.moves.len();
        let temperature = if ply < cfg.temperature_moves { cfg.mcts.temperature } else { 0.0 };
        let res = mcts.search_with_temperature(&state, temperature);
        let Some(best) = res.best else { break };
        let mv = if temperature > 0.0 { sample_policy(&res.policy, best) } else { best };

        on_ply(&state, mv);
        let round_over = state.ends_round(mv);
        state.step(mv);
        if round_over && !state.is_terminal() { record.rounds += 1; }
        record.moves.push(mv);
        record.policies.push(res.policy);
    }

    record.final_state = state;
    record.scores = [state.board(0).score(), state.board(1).score()];
    if state.is_terminal() {
        record.result = Some(state.winner());
    }
    record
}

/// Generate `cfg.games` games in parallel; game `i` uses seed
/// `splitmix64(cfg.seed ^ i)` regardless of thread scheduling.
pub fn generate_games(cfg: &SelfPlayConfig) -> Vec<GameRecord> {
    generate_games_with(cfg, |_| {})
}

/// As [`generate_games`], calling `on_done` after each finished game.
pub fn generate_games_with<F>(cfg: &SelfPlayConfig, on_done: F) -> Vec<GameRecord>
where
    F: Fn(&GameRecord) + Sync,
{
    init_table();
    (0..cfg.games)
        .into_par_iter()
        .map(|gi| {
            let g = play_game(cfg, splitmix64(cfg.seed ^ gi as u64));
            info!(
                "game {gi}: {} plies, {} rounds, score {}-{}, result {:?}",
                g.moves.len(), g.rounds, g.scores[0], g.scores[1], g.result
            );
            on_done(&g);
            g
        })
        .collect()
}
