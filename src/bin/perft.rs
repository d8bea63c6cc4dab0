use anyhow::Result;
use azulbot::game::magics::init_table;
use azulbot::game::state::State;
use azulbot::perft::{perft, perft_divide};
use azulbot::rng;
use clap::Parser;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Count move sequences within the current Azul round")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// 35-char center fixture, or "start" for a random opening
    #[arg(value_name = "FIXTURE", default_value = "start")]
    fixture: String,
    /// Seed for the opening draw
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    init_table();
    rng::seed(args.seed);
    let base = if args.fixture == "start" { State::new() } else { State::from_center_str(&args.fixture)? };
    println!("{base}");

    if args.divide {
        for (mv, n) in perft_divide(&base, args.depth) {
            println!("{mv}: {n}");
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let t0 = Instant::now();
    let nodes = pool.install(|| {
        if args.threads <= 1 || args.depth <= 1 {
            perft(&base, args.depth)
        } else {
            let roots: Vec<_> = base.moves().as_slice().to_vec();
            roots
                .par_iter()
                .map(|&mv| {
                    if base.ends_round(mv) { return 1; }
                    let mut child = base;
                    child.step(mv);
                    perft(&child, args.depth - 1)
                })
                .sum()
        }
    });
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        println!("nodes: {nodes} elapsed: {dt:.3}s nps: {:.1}", nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
