use crate::art;
use blackjack_lib::{Action, Card, TableEvent, TablePort};
use std::io::{BufRead, Write};
use tracing::warn;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// A `TablePort` that plays over a line-based text stream, normally stdin/stdout.
///
/// End of input is treated as the player walking away: no bet, a quit, or a "no".
pub struct ConsolePort<R: BufRead, W: Write> {
    input: R,
    output: W,
    clear: bool,
}

impl<R: BufRead, W: Write> ConsolePort<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePort {
            input,
            output,
            clear: true,
        }
    }

    /// Controls whether the screen is cleared before the table is redrawn.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            warn!("failed to write to console: {e}");
        }
    }

    fn say_line(&mut self, text: &str) {
        self.say(&format!("{}\n", text));
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
            Err(e) => {
                warn!("failed to read from console: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> TablePort for ConsolePort<R, W> {
    fn render_hand(&self, cards: &[Card], hide_first: bool) -> Vec<String> {
        art::render_hand(cards, hide_first)
    }

    fn read_action(&mut self, can_double: bool) -> Action {
        let options = if can_double {
            "[H]it  [S]tand  [D]ouble down  [Q]uit"
        } else {
            "[H]it  [S]tand  [Q]uit"
        };

        loop {
            self.say(&format!("{}\nMove: ", options));
            let Some(line) = self.read_line() else {
                return Action::Quit;
            };
            match line.chars().next() {
                Some('h') => return Action::Hit,
                Some('s') => return Action::Stand,
                Some('q') => return Action::Quit,
                Some('d') if can_double => return Action::Double,
                Some('d') => {
                    self.say_line("You can only double down as your first move, with enough money to cover it.")
                }
                _ => self.say_line("Invalid move!"),
            }
        }
    }

    fn read_bet(&mut self, bankroll: f64) -> Option<f64> {
        loop {
            self.say(&format!(
                "Bankroll: {:.2}\nInput bet (0 or blank to leave): ",
                bankroll
            ));
            let line = self.read_line()?;
            if line.is_empty() {
                return None;
            }
            match line.parse::<f64>() {
                Ok(bet) if bet == 0.0 => return None,
                Ok(bet) if bet.is_finite() && bet > 0.0 && bet <= bankroll => return Some(bet),
                Ok(_) => self.say_line(&format!(
                    "A bet must be more than 0 and at most {:.2}.",
                    bankroll
                )),
                Err(_) => self.say_line("Please enter a number."),
            }
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> bool {
        loop {
            self.say(&format!("{} [y/n] ", prompt));
            let Some(line) = self.read_line() else {
                return false;
            };
            match line.as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.say_line("Please answer y or n."),
            }
        }
    }

    fn show(&mut self, event: TableEvent) {
        match event {
            TableEvent::Shuffled { decks } => {
                self.say_line(&format!("Shuffling a fresh shoe of {} deck(s)...", decks))
            }
            TableEvent::Table(view) => {
                if self.clear {
                    self.say(CLEAR_SCREEN);
                }
                let hidden = if view.hole_hidden { " + ?" } else { "" };
                self.say_line(&format!("Dealer: {}{}", view.dealer_score, hidden));
                for line in &view.dealer_lines {
                    self.say_line(line);
                }
                self.say_line(&format!("Player: {}", view.player_score));
                for line in &view.player_lines {
                    self.say_line(line);
                }
                self.say_line(&format!("Bet: {:.2}", view.bet));
            }
            TableEvent::Settled {
                settlement,
                bet,
                bankroll,
            } => {
                self.say_line(&format!(
                    "Result: {} ({:+.2} on a bet of {:.2}). Bankroll: {:.2}",
                    settlement.outcome, settlement.delta, bet, bankroll
                ));
            }
            TableEvent::SessionOver { reason, bankroll } => {
                self.say_line(&format!(
                    "Session over: {}. Final bankroll: {:.2}",
                    reason, bankroll
                ));
            }
        }
    }
}
