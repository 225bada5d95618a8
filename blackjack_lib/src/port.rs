//! The seam between the engine and whatever is on the other side of the table.
//!
//! The engine never prints or reads anything itself. It renders hands, asks for decisions and
//! announces progress through a `TablePort`, so the same rounds can be driven by a terminal,
//! an automatic player or a scripted test double.

use crate::card::Card;
use crate::session::SessionEnd;
use crate::settlement::Settlement;

/// A player decision during their turn, decoded by the port from whatever raw input it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Quit,
}

/// Snapshot of the table handed to the port for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub dealer_lines: Vec<String>,
    pub player_lines: Vec<String>,
    /// Score of the dealer's visible cards only while the hole card is hidden.
    pub dealer_score: u32,
    pub player_score: u32,
    pub hole_hidden: bool,
    pub bet: f64,
}

/// Progress notifications sent from the engine to the port.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    Shuffled { decks: u32 },
    Table(TableView),
    Settled { settlement: Settlement, bet: f64, bankroll: f64 },
    SessionOver { reason: SessionEnd, bankroll: f64 },
}

pub trait TablePort {
    /// Renders `cards` as display lines of a fixed height. When `hide_first` is set the first
    /// card is drawn face down with the same dimensions.
    fn render_hand(&self, cards: &[Card], hide_first: bool) -> Vec<String>;

    /// Reads the next player action. `Double` must only be returned when `can_double` is true.
    fn read_action(&mut self, can_double: bool) -> Action;

    /// Reads a bet in `(0, bankroll]`, or `None` when the player wants to stop.
    fn read_bet(&mut self, bankroll: f64) -> Option<f64>;

    fn read_yes_no(&mut self, prompt: &str) -> bool;

    fn show(&mut self, _event: TableEvent) {}
}
