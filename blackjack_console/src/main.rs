use blackjack_console::prelude::*;
use clap::Parser;
use std::io;
use tracing::info;

#[derive(Parser)]
#[command(name = "blackjack_console")]
#[command(about = "Play blackjack against the house in your terminal")]
struct Args {
    /// Number of decks in the shoe
    #[arg(short, long, default_value_t = 6)]
    decks: u32,

    /// Starting bankroll
    #[arg(short, long, default_value_t = 500.0)]
    bankroll: f64,

    /// Seed for the shuffle, for a reproducible shoe
    #[arg(long)]
    seed: Option<u64>,

    /// Print the end-of-session summary as JSON
    #[arg(long)]
    json: bool,

    /// Keep earlier tables on screen instead of clearing before each redraw
    #[arg(long)]
    no_clear: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = SessionConfig::new();
    builder.decks(args.decks).starting_bankroll(args.bankroll);
    if let Some(seed) = args.seed {
        builder.seed(seed);
    }
    let config = builder.build();
    info!(?config, "starting session");

    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    let mut port = ConsolePort::new(stdin.lock(), io::stdout()).clear_screen(!args.no_clear);

    let summary = session.run(&mut port)?;
    write_summary(&summary, args.json, io::stdout())?;
    Ok(())
}
