//! Terminal front end for `blackjack_lib`: card art, a line-based console port, an automatic
//! player for unattended runs, and summary output.

pub mod art;
pub mod autoplay;
pub mod console;
pub mod write;

use tracing_subscriber::EnvFilter;

pub mod prelude {
    pub use super::{
        autoplay::AutoPlayer, console::ConsolePort, init_logging, write::write_summary,
    };
    pub use blackjack_lib::prelude::*;
}

/// Installs a stderr `tracing` subscriber. `RUST_LOG` wins when set, otherwise the level is
/// `debug` for verbose runs and `warn` by default so logs stay out of the way of the game.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
