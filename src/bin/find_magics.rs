use azulbot::game::magics::{find_magic, MAGIC_BITS};
use azulbot::game::NUM_SQUARES;
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "find-magics", about = "Search magic multipliers for the placement score table")]
struct Args {
    /// Index bits per square
    #[arg(long, default_value_t = MAGIC_BITS)]
    bits: u32,
    /// Random seed
    #[arg(long, default_value_t = 1u64)]
    seed: u64,
    /// Candidates tried per square before giving up
    #[arg(long, default_value_t = 1u64 << 32)]
    max_iters: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if !(1..=16).contains(&args.bits) {
        anyhow::bail!("bits must be in 1..=16, got {}", args.bits);
    }
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let t0 = Instant::now();
    let mut magics = Vec::with_capacity(NUM_SQUARES);
    for sq in 0..NUM_SQUARES {
        let Some(magic) = find_magic(sq, args.bits, &mut rng, args.max_iters) else {
            anyhow::bail!("no magic found for square {sq} with {} bits", args.bits);
        };
        info!("square {sq}: {magic:#010x}");
        magics.push(magic);
    }
    println!("pub const MAGICS: [u32; NUM_SQUARES] = [");
    for chunk in magics.chunks(5) {
        let line: Vec<String> = chunk.iter().map(|m| format!("{m:#010x},")).collect();
        println!("    {}", line.join(" "));
    }
    println!("];");
    eprintln!("found {} magics in {:.2}s", magics.len(), t0.elapsed().as_secs_f32());
    Ok(())
}
