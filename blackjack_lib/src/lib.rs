//! Core engine for a single-player game of blackjack against a house dealer.
//!
//! The crate owns the rules: building and shuffling the shoe, scoring hands, running a round
//! from the deal through settlement, and keeping the bankroll across rounds. Everything the
//! player sees or types goes through the `TablePort` trait, so no terminal code lives here.

pub mod card;
pub mod error;
pub mod hand;
pub mod port;
pub mod round;
pub mod session;
pub mod settlement;
pub mod shoe;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude {
    pub use crate::card::{Card, Rank, Suit};
    pub use crate::error::BlackjackGameError;
    pub use crate::hand::Hand;
    pub use crate::port::{Action, TableEvent, TablePort, TableView};
    pub use crate::round::{Round, RoundPhase, RoundReport, Wager};
    pub use crate::session::{Session, SessionConfig, SessionConfigBuilder, SessionEnd, SessionSummary};
    pub use crate::settlement::{Outcome, Settlement};
    pub use crate::shoe::Shoe;
}

pub use prelude::*;
