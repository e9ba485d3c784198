use clap::Parser;
use seabattle::{init_logging, simulate_match};

#[derive(Parser)]
#[command(author, version, about = "Play computer-vs-computer matches and print JSON reports", long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1, help = "Number of matches; seeds count up from the first")]
    games: u64,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let first = cli.seed.unwrap_or_else(rand::random);

    for i in 0..cli.games {
        let report = simulate_match(first.wrapping_add(i))?;
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
