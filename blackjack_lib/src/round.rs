//! A single betting round, run as a small state machine:
//! `Dealing -> NaturalCheck -> PlayerTurn -> DealerTurn -> Settlement -> Done`.
//!
//! Naturals skip straight from `NaturalCheck` to `Settlement`, and so does a player bust
//! (including a bust on the forced card after a double), so the dealer never draws against a
//! hand that has already lost.

use crate::hand::Hand;
use crate::port::{Action, TableEvent, TablePort, TableView};
use crate::settlement::{self, Settlement};
use crate::shoe::Shoe;
use crate::BlackjackGameError;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// The dealer stands on any total of at least this much, soft totals included.
pub const DEALER_STANDS_ON: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    Dealing,
    NaturalCheck,
    PlayerTurn,
    DealerTurn,
    Settlement,
    Done,
}

impl Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Money on the table for one round.
///
/// `available` is the bankroll before the round, less any stake moved by a double. The
/// opening bet is not taken from it, so a double is allowed whenever the bankroll covers the
/// bet, all-in bets included. Doubling moves the original bet out of `available` into `held`
/// and doubles `bet`; the held stake comes back when the round is settled. A lost all-in
/// double leaves the bankroll negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wager {
    pub bet: f64,
    pub available: f64,
    pub held: f64,
}

impl Wager {
    /// Fails with `InvalidBet` unless `0 < bet <= bankroll`.
    pub fn new(bet: f64, bankroll: f64) -> Result<Wager, BlackjackGameError> {
        if !(bet.is_finite() && bet > 0.0 && bet <= bankroll) {
            return Err(BlackjackGameError::InvalidBet { bet, bankroll });
        }
        Ok(Wager {
            bet,
            available: bankroll,
            held: 0.0,
        })
    }

    pub fn doubled(&self) -> bool {
        self.held > 0.0
    }

    /// Once per round, while the bankroll left after the double's deduction is not negative.
    pub fn can_double(&self) -> bool {
        !self.doubled() && self.available >= self.bet
    }

    fn double(&mut self) -> Result<(), BlackjackGameError> {
        if !self.can_double() {
            return Err(BlackjackGameError::IllegalAction(Action::Double));
        }
        self.available -= self.bet;
        self.held += self.bet;
        self.bet *= 2.0;
        Ok(())
    }

    /// The bankroll once `settlement` has been applied and any held stake returned.
    pub fn bankroll_after(&self, settlement: &Settlement) -> f64 {
        self.available + self.held + settlement.delta
    }
}

/// Everything that happened in a finished round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub player: Hand,
    pub dealer: Hand,
    pub wager: Wager,
    pub settlement: Settlement,
    /// The player asked to leave the table during their turn.
    pub quit: bool,
    pub history: Vec<RoundPhase>,
}

impl RoundReport {
    pub fn visited(&self, phase: RoundPhase) -> bool {
        self.history.contains(&phase)
    }
}

pub struct Round {
    player: Hand,
    dealer: Hand,
    wager: Wager,
    phase: RoundPhase,
    history: Vec<RoundPhase>,
    actions_taken: u32,
    quit: bool,
    settlement: Option<Settlement>,
}

impl Round {
    pub fn new(bet: f64, bankroll: f64) -> Result<Round, BlackjackGameError> {
        let wager = Wager::new(bet, bankroll)?;
        Ok(Round {
            player: Hand::new(),
            dealer: Hand::new(),
            wager,
            phase: RoundPhase::Dealing,
            history: vec![RoundPhase::Dealing],
            actions_taken: 0,
            quit: false,
            settlement: None,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn history(&self) -> &[RoundPhase] {
        &self.history
    }

    /// Runs the round to completion, drawing from `shoe` and consulting `port` for decisions.
    pub fn play<P: TablePort + ?Sized>(
        mut self,
        shoe: &mut Shoe,
        port: &mut P,
    ) -> Result<RoundReport, BlackjackGameError> {
        while self.phase != RoundPhase::Done {
            self.step(shoe, port)?;
        }

        // Settlement always records a result before moving to Done
        let settlement = self
            .settlement
            .unwrap_or_else(|| settlement::settle(&self.player, &self.dealer, self.wager.bet));

        Ok(RoundReport {
            player: self.player,
            dealer: self.dealer,
            wager: self.wager,
            settlement,
            quit: self.quit,
            history: self.history,
        })
    }

    /// Executes the work of the current phase. The player turn handles one action per step.
    pub fn step<P: TablePort + ?Sized>(
        &mut self,
        shoe: &mut Shoe,
        port: &mut P,
    ) -> Result<(), BlackjackGameError> {
        match self.phase {
            RoundPhase::Dealing => {
                for _ in 0..2 {
                    self.player.add_card(shoe.draw()?);
                    self.dealer.add_card(shoe.draw()?);
                }
                self.transition(RoundPhase::NaturalCheck);
            }
            RoundPhase::NaturalCheck => {
                match settlement::settle_natural(&self.player, &self.dealer, self.wager.bet) {
                    Some(s) => {
                        self.settlement = Some(s);
                        self.transition(RoundPhase::Settlement);
                    }
                    None => {
                        self.show_table(port, true);
                        self.transition(RoundPhase::PlayerTurn);
                    }
                }
            }
            RoundPhase::PlayerTurn => self.player_action(shoe, port)?,
            RoundPhase::DealerTurn => {
                while self.dealer.score() < DEALER_STANDS_ON {
                    self.dealer.add_card(shoe.draw()?);
                }
                debug!(
                    dealer_score = self.dealer.score(),
                    cards = self.dealer.len(),
                    "dealer stands"
                );
                self.transition(RoundPhase::Settlement);
            }
            RoundPhase::Settlement => {
                if self.settlement.is_none() {
                    self.settlement = Some(settlement::settle(
                        &self.player,
                        &self.dealer,
                        self.wager.bet,
                    ));
                }
                self.show_table(port, false);
                self.transition(RoundPhase::Done);
            }
            RoundPhase::Done => {}
        }
        Ok(())
    }

    fn can_double(&self) -> bool {
        self.actions_taken == 0 && self.wager.can_double()
    }

    fn player_action<P: TablePort + ?Sized>(
        &mut self,
        shoe: &mut Shoe,
        port: &mut P,
    ) -> Result<(), BlackjackGameError> {
        let can_double = self.can_double();
        let action = port.read_action(can_double);
        debug!(?action, can_double, "player action");

        match action {
            Action::Hit => {
                self.actions_taken += 1;
                self.player.add_card(shoe.draw()?);
                if self.player.is_bust() {
                    self.transition(RoundPhase::Settlement);
                } else {
                    self.show_table(port, true);
                }
            }
            Action::Stand => {
                self.actions_taken += 1;
                self.transition(RoundPhase::DealerTurn);
            }
            Action::Double => {
                if !can_double {
                    return Err(BlackjackGameError::IllegalAction(Action::Double));
                }
                self.actions_taken += 1;
                self.wager.double()?;
                self.player.add_card(shoe.draw()?);

                // A double always ends the turn, bust or not
                if self.player.is_bust() {
                    self.transition(RoundPhase::Settlement);
                } else {
                    self.transition(RoundPhase::DealerTurn);
                }
            }
            Action::Quit => {
                self.quit = true;
                self.settlement = Some(settlement::forfeit(self.wager.bet));
                self.transition(RoundPhase::Settlement);
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: RoundPhase) {
        debug!(from = %self.phase, to = %next, "round transition");
        self.phase = next;
        self.history.push(next);
    }

    fn show_table<P: TablePort + ?Sized>(&self, port: &mut P, hole_hidden: bool) {
        let dealer_score = if hole_hidden {
            let mut visible = Hand::new();
            for card in self.dealer.cards().iter().skip(1) {
                visible.add_card(*card);
            }
            visible.score()
        } else {
            self.dealer.score()
        };

        let view = TableView {
            dealer_lines: port.render_hand(self.dealer.cards(), hole_hidden),
            player_lines: port.render_hand(self.player.cards(), false),
            dealer_score,
            player_score: self.player.score(),
            hole_hidden,
            bet: self.wager.bet,
        };
        port.show(TableEvent::Table(view));
    }
}
