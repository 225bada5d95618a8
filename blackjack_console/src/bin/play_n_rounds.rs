use blackjack_console::prelude::*;
use clap::Parser;
use std::io;
use std::time::Instant;
use tracing::info;

/// Plays a number of rounds with the automatic player and prints the session stats.
#[derive(Parser)]
#[command(name = "play_n_rounds")]
struct Args {
    /// Number of rounds to play, fewer if the bankroll runs out
    #[arg(short, long, default_value_t = 100)]
    rounds: u32,

    /// Flat bet placed every round
    #[arg(long, default_value_t = 10.0)]
    bet: f64,

    #[arg(short, long, default_value_t = 6)]
    decks: u32,

    #[arg(short, long, default_value_t = 500.0)]
    bankroll: f64,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !(args.bet.is_finite() && args.bet > 0.0) {
        eprintln!("error: bet must be a positive amount");
        std::process::exit(1);
    }

    let mut builder = SessionConfig::new();
    builder.decks(args.decks).starting_bankroll(args.bankroll);
    if let Some(seed) = args.seed {
        builder.seed(seed);
    }

    let mut session = Session::new(builder.build())?;
    let mut player = AutoPlayer::new(args.bet, args.rounds);

    let start = Instant::now();
    let summary = session.run(&mut player)?;
    info!(
        rounds = summary.rounds,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "finished"
    );

    write_summary(&summary, args.json, io::stdout())?;
    Ok(())
}
