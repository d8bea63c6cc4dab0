use azulbot::config::MctsParams;
use azulbot::encoder::encode_planes;
use azulbot::eval::{RandomEvaluator, RolloutEvaluator};
use azulbot::game::magics::init_table;
use azulbot::game::state::State;
use azulbot::rng;
use azulbot::Mcts;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn params(simulations: usize) -> MctsParams {
    MctsParams { simulations, ..MctsParams::default() }
}

fn bench_search(c: &mut Criterion) {
    init_table();
    rng::seed(1);
    let state = State::new();

    c.bench_function("mcts_100_sims_random_eval", |b| {
        b.iter(|| {
            let mut mcts = Mcts::new(params(100), RandomEvaluator);
            black_box(mcts.search(&state).best)
        })
    });

    c.bench_function("mcts_100_sims_rollout_eval", |b| {
        b.iter(|| {
            let mut mcts = Mcts::new(params(100), RolloutEvaluator::default());
            black_box(mcts.search(&state).best)
        })
    });
}

fn bench_encoder(c: &mut Criterion) {
    init_table();
    rng::seed(2);
    let state = State::new();
    c.bench_function("encode_planes", |b| b.iter(|| encode_planes(black_box(&state))));
}

criterion_group!(benches, bench_search, bench_encoder);
criterion_main!(benches);
