use anyhow::{Context, Result};
use azulbot::config::{self, EvaluatorKind, SelfPlayConfig};
use azulbot::game::magics::init_table;
use azulbot::selfplay::{generate_games_with, play_game_with, MatchSummary};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Azul self-play matches with MCTS", long_about = None)]
struct Args {
    /// JSON self-play config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of games
    #[arg(long)]
    games: Option<usize>,

    /// Simulations per move
    #[arg(long)]
    simulations: Option<usize>,

    /// Leaf evaluator: 'random' or 'rollout'
    #[arg(long)]
    evaluator: Option<String>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Play a single game and print every position
    #[arg(long)]
    verbose: bool,

    /// Optional: write the match summary as JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn parse_evaluator(s: &str) -> Result<EvaluatorKind> {
    match s.to_lowercase().as_str() {
        "random" => Ok(EvaluatorKind::Random),
        "rollout" => Ok(EvaluatorKind::Rollout),
        _ => anyhow::bail!("Invalid evaluator: use 'random' or 'rollout'"),
    }
}

fn build_config(args: &Args) -> Result<SelfPlayConfig> {
    let mut cfg = match &args.config {
        Some(path) => config::load_json(path).with_context(|| format!("loading {}", path.display()))?,
        None => SelfPlayConfig::default(),
    };
    if let Some(g) = args.games { cfg.games = g; }
    if let Some(s) = args.simulations { cfg.mcts.simulations = s; }
    if let Some(s) = args.seed { cfg.seed = s; }
    if let Some(e) = &args.evaluator { cfg.evaluator = parse_evaluator(e)?; }
    cfg.validate()?;
    Ok(cfg)
}

fn print_game(cfg: &SelfPlayConfig) {
    let record = play_game_with(cfg, cfg.seed, |state, mv| {
        println!("{state}");
        println!("player {} plays {}\n", state.turn() + 1, mv);
    });
    println!("{}", record.final_state);
    println!("final score {} - {}, result {:?}", record.scores[0], record.scores[1], record.result);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = build_config(&args)?;
    init_table();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;
    }

    if args.verbose {
        print_game(&cfg);
        return Ok(());
    }

    println!(
        "Playing {} games ({} simulations/move, evaluator {:?}, seed {})",
        cfg.games, cfg.mcts.simulations, cfg.evaluator, cfg.seed
    );
    let pb = ProgressBar::new(cfg.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {elapsed_precise}")?);

    let start = Instant::now();
    let games = generate_games_with(&cfg, |_| pb.inc(1));
    pb.finish();

    let summary = MatchSummary::from_records(&games);
    println!(
        "P1 wins {}, P2 wins {}, draws {}, unfinished {} | avg plies {:.1}, avg score {:.1} - {:.1} | {:.2}s",
        summary.first_wins, summary.second_wins, summary.draws, summary.unfinished,
        summary.avg_plies, summary.avg_score[0], summary.avg_score[1], start.elapsed().as_secs_f32()
    );

    if let Some(path) = &args.json_out {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
