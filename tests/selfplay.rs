use azulbot::config::{EvaluatorKind, MctsParams, SelfPlayConfig};
use azulbot::selfplay::{generate_games, play_game, MatchSummary};

fn small_config() -> SelfPlayConfig {
    SelfPlayConfig {
        games: 3,
        seed: 9,
        max_plies: 60,
        temperature_moves: 4,
        evaluator: EvaluatorKind::Random,
        mcts: MctsParams { simulations: 16, ..MctsParams::default() },
    }
}

#[test]
fn same_seed_same_game() {
    let cfg = small_config();
    let a = play_game(&cfg, 1234);
    let b = play_game(&cfg, 1234);
    assert_eq!(a.moves, b.moves);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.final_state, b.final_state);
}

#[test]
fn records_are_consistent() {
    let cfg = small_config();
    let g = play_game(&cfg, 5);
    assert!(!g.moves.is_empty());
    assert!(g.moves.len() <= cfg.max_plies);
    assert_eq!(g.moves.len(), g.policies.len());
    for (mv, policy) in g.moves.iter().zip(&g.policies) {
        assert!(policy[mv.id()] > 0.0);
        let sum: f32 = policy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-3);
    }
    assert_eq!(g.result.is_some(), g.final_state.is_terminal());
}

#[test]
fn parallel_generation_is_reproducible() {
    let cfg = small_config();
    let a = generate_games(&cfg);
    let b = generate_games(&cfg);
    assert_eq!(a.len(), 3);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.moves, y.moves);
    }
    let summary = MatchSummary::from_records(&a);
    assert_eq!(summary.games, 3);
    assert_eq!(summary.first_wins + summary.second_wins + summary.draws + summary.unfinished, 3);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"first_wins\""));
}
