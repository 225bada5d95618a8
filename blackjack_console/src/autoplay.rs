use crate::art;
use blackjack_lib::{Action, Card, TableEvent, TablePort, TableView};

/// A `TablePort` that plays by itself: a flat bet for a fixed number of rounds, doubling on
/// a first-move 10 or 11 and hitting anything under 17.
pub struct AutoPlayer {
    bet: f64,
    rounds_left: u32,
    last_view: Option<TableView>,
}

impl AutoPlayer {
    pub fn new(bet: f64, rounds: u32) -> Self {
        AutoPlayer {
            bet,
            rounds_left: rounds,
            last_view: None,
        }
    }

    fn decide(&self, can_double: bool) -> Action {
        let score = self.last_view.as_ref().map(|v| v.player_score).unwrap_or(0);
        match score {
            10 | 11 if can_double => Action::Double,
            s if s < 17 => Action::Hit,
            _ => Action::Stand,
        }
    }
}

impl TablePort for AutoPlayer {
    fn render_hand(&self, cards: &[Card], hide_first: bool) -> Vec<String> {
        art::render_hand(cards, hide_first)
    }

    fn read_action(&mut self, can_double: bool) -> Action {
        self.decide(can_double)
    }

    fn read_bet(&mut self, bankroll: f64) -> Option<f64> {
        if self.rounds_left == 0 {
            return None;
        }
        self.rounds_left -= 1;
        Some(f64::min(self.bet, bankroll))
    }

    fn read_yes_no(&mut self, _prompt: &str) -> bool {
        self.rounds_left > 0
    }

    fn show(&mut self, event: TableEvent) {
        if let TableEvent::Table(view) = event {
            self.last_view = Some(view);
        }
    }
}
