use crate::port::{TableEvent, TablePort};
use crate::round::{Round, RoundReport};
use crate::shoe::Shoe;
use crate::BlackjackGameError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEnd {
    /// The bankroll reached zero or below.
    Broke,
    /// The player answered no when asked to play another round.
    Declined,
    /// The player gave no bet.
    NoBet,
    /// The player quit in the middle of a round.
    Quit,
}

impl SessionEnd {
    pub fn label(&self) -> &'static str {
        match self {
            SessionEnd::Broke => "out of funds",
            SessionEnd::Declined => "player left the table",
            SessionEnd::NoBet => "no bet placed",
            SessionEnd::Quit => "player quit mid-round",
        }
    }
}

impl Display for SessionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Struct for configuring a `Session`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub decks: u32,
    pub starting_bankroll: f64,
    /// Seed for the shuffling rng. A session without a seed shuffles from system entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Associated method for returning a new `SessionConfigBuilder` object.
    pub fn new() -> SessionConfigBuilder {
        SessionConfigBuilder {
            decks: None,
            starting_bankroll: None,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<(), BlackjackGameError> {
        if self.decks == 0 {
            return Err(BlackjackGameError::InvalidDeckCount(self.decks));
        }
        if !(self.starting_bankroll.is_finite() && self.starting_bankroll > 0.0) {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "starting bankroll must be positive, got {}",
                self.starting_bankroll
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    /// Six decks and a bankroll of 500.
    fn default() -> Self {
        SessionConfig::new().build()
    }
}

/// Struct to implement builder pattern for `SessionConfig`
#[derive(Debug, Clone, Copy)]
pub struct SessionConfigBuilder {
    decks: Option<u32>,
    starting_bankroll: Option<f64>,
    seed: Option<u64>,
}

impl SessionConfigBuilder {
    /// Method for choosing the number of decks in the shoe
    pub fn decks(&mut self, decks: u32) -> &mut Self {
        self.decks = Some(decks);
        self
    }

    /// Method for changing the starting bankroll of the player.
    pub fn starting_bankroll(&mut self, bankroll: f64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(&mut self) -> SessionConfig {
        SessionConfig {
            decks: self.decks.unwrap_or(6),
            starting_bankroll: self.starting_bankroll.unwrap_or(500.0),
            seed: self.seed,
        }
    }
}

/// Simple struct for recording the data points accumulated during a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub player_blackjacks: u32,
    pub dealer_blackjacks: u32,
    pub doubles: u32,
    pub reshuffles: u32,
    pub winnings: f64,
    pub starting_bankroll: f64,
    pub final_bankroll: f64,
    pub end: Option<SessionEnd>,
}

impl SessionSummary {
    fn new(starting_bankroll: f64) -> Self {
        SessionSummary {
            rounds: 0,
            wins: 0,
            pushes: 0,
            losses: 0,
            player_blackjacks: 0,
            dealer_blackjacks: 0,
            doubles: 0,
            reshuffles: 0,
            winnings: 0.0,
            starting_bankroll,
            final_bankroll: starting_bankroll,
            end: None,
        }
    }

    fn record(&mut self, report: &RoundReport) {
        use crate::settlement::Outcome;

        let outcome = report.settlement.outcome;
        self.rounds += 1;
        if outcome.is_win() {
            self.wins += 1;
        } else if outcome.is_push() {
            self.pushes += 1;
        } else {
            self.losses += 1;
        }
        if matches!(outcome, Outcome::PlayerBlackjack | Outcome::BlackjackPush) {
            self.player_blackjacks += 1;
        }
        if matches!(outcome, Outcome::DealerBlackjack | Outcome::BlackjackPush) {
            self.dealer_blackjacks += 1;
        }
        if report.wager.doubled() {
            self.doubles += 1;
        }
        self.winnings += report.settlement.delta;
    }
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of player blackjacks:".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let end = self.end.map(|e| e.label()).unwrap_or("in progress");

        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", "stats")?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played:", self.rounds)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "total wins:", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "total pushes:", self.pushes)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "total losses:", self.losses)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks:", self.player_blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of dealer blackjacks:", self.dealer_blackjacks
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "doubles:", self.doubles)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "reshuffles:", self.reshuffles)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "total winnings:", self.winnings
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "final balance:", self.final_bankroll
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "ended:", end)?;
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Owns the bankroll and the shoe for the life of one sitting at the table, and runs rounds
/// until the player leaves or runs out of money.
pub struct Session {
    config: SessionConfig,
    rng: StdRng,
    shoe: Shoe,
    bankroll: f64,
    summary: SessionSummary,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Session, BlackjackGameError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let shoe = Shoe::new(config.decks, &mut rng)?;
        Ok(Session::assemble(config, rng, shoe))
    }

    /// Starts a session from a prepared shoe. Once it runs low it is replaced by a freshly
    /// shuffled one like any other shoe.
    pub fn with_shoe(config: SessionConfig, shoe: Shoe) -> Result<Session, BlackjackGameError> {
        config.validate()?;
        Ok(Session::assemble(config, seeded_rng(config.seed), shoe))
    }

    fn assemble(config: SessionConfig, rng: StdRng, shoe: Shoe) -> Session {
        Session {
            config,
            rng,
            shoe,
            bankroll: config.starting_bankroll,
            summary: SessionSummary::new(config.starting_bankroll),
        }
    }

    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn ended(&self) -> Option<SessionEnd> {
        self.summary.end
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary.clone()
    }

    /// Plays one round. Returns `None` without dealing if the session is over or ends before
    /// a bet is placed.
    pub fn play_round<P: TablePort + ?Sized>(
        &mut self,
        port: &mut P,
    ) -> Result<Option<RoundReport>, BlackjackGameError> {
        if self.summary.end.is_some() {
            return Ok(None);
        }
        if self.bankroll <= 0.0 {
            self.finish(SessionEnd::Broke);
            return Ok(None);
        }

        if self.shoe.needs_reshuffle() {
            self.reshuffle(port)?;
        }

        let bet = match self.read_bet(port) {
            Some(bet) => bet,
            None => {
                self.finish(SessionEnd::NoBet);
                return Ok(None);
            }
        };

        let report = Round::new(bet, self.bankroll)?.play(&mut self.shoe, port)?;
        self.bankroll = report.wager.bankroll_after(&report.settlement);
        self.summary.record(&report);
        self.summary.final_bankroll = self.bankroll;
        debug!(
            outcome = %report.settlement.outcome,
            delta = report.settlement.delta,
            bankroll = self.bankroll,
            remaining = self.shoe.remaining(),
            "round settled"
        );

        port.show(TableEvent::Settled {
            settlement: report.settlement,
            bet: report.wager.bet,
            bankroll: self.bankroll,
        });

        if report.quit {
            self.finish(SessionEnd::Quit);
        } else if self.bankroll <= 0.0 {
            self.finish(SessionEnd::Broke);
        }

        Ok(Some(report))
    }

    /// Runs rounds until the bankroll is gone, the player stops betting, declines to
    /// continue or quits mid-round.
    pub fn run<P: TablePort + ?Sized>(
        &mut self,
        port: &mut P,
    ) -> Result<SessionSummary, BlackjackGameError> {
        while self.play_round(port)?.is_some() {
            if self.summary.end.is_some() {
                break;
            }
            if !port.read_yes_no("Play another round?") {
                self.finish(SessionEnd::Declined);
            }
        }

        let reason = self.summary.end.unwrap_or(SessionEnd::NoBet);
        port.show(TableEvent::SessionOver {
            reason,
            bankroll: self.bankroll,
        });
        Ok(self.summary())
    }

    fn reshuffle<P: TablePort + ?Sized>(&mut self, port: &mut P) -> Result<(), BlackjackGameError> {
        info!(
            remaining = self.shoe.remaining(),
            decks = self.config.decks,
            "shoe below threshold, reshuffling"
        );
        self.shoe = Shoe::new(self.config.decks, &mut self.rng)?;
        self.summary.reshuffles += 1;
        port.show(TableEvent::Shuffled {
            decks: self.config.decks,
        });
        Ok(())
    }

    /// Asks for a bet until the port gives a valid one or none at all. A zero bet counts as
    /// none.
    fn read_bet<P: TablePort + ?Sized>(&mut self, port: &mut P) -> Option<f64> {
        loop {
            let bet = port.read_bet(self.bankroll)?;
            if bet == 0.0 {
                return None;
            }
            if bet.is_finite() && bet > 0.0 && bet <= self.bankroll {
                return Some(bet);
            }
            warn!(bet, bankroll = self.bankroll, "rejected bet outside (0, bankroll]");
        }
    }

    fn finish(&mut self, reason: SessionEnd) {
        if self.summary.end.is_none() {
            info!(%reason, bankroll = self.bankroll, rounds = self.summary.rounds, "session over");
            self.summary.end = Some(reason);
            self.summary.final_bankroll = self.bankroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;
    use crate::port::{Action, TableEvent};
    use crate::settlement::Outcome;
    use crate::shoe::CARDS_PER_DECK;
    use crate::testing::{padded_shoe, shoe_of, ScriptedPort};

    fn config(bankroll: f64) -> SessionConfig {
        SessionConfig::new()
            .decks(1)
            .starting_bankroll(bankroll)
            .seed(11)
            .build()
    }

    #[test]
    fn config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.decks, 6);
        assert_eq!(config.starting_bankroll, 500.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let zero_decks = SessionConfig::new().decks(0).build();
        assert_eq!(
            Session::new(zero_decks).err(),
            Some(BlackjackGameError::InvalidDeckCount(0))
        );

        let broke = SessionConfig::new().starting_bankroll(0.0).build();
        assert!(matches!(
            Session::new(broke).err(),
            Some(BlackjackGameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn new_session_has_a_full_shoe() {
        let session = Session::new(SessionConfig::new().decks(4).seed(3).build()).unwrap();
        assert_eq!(session.shoe().remaining(), 4 * CARDS_PER_DECK);
        assert_eq!(session.bankroll(), 500.0);
    }

    #[test]
    fn reshuffles_a_low_shoe_before_dealing() {
        let shoe = shoe_of(&[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Eight]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(10.0)])
            .actions(&[Action::Stand; 10]);

        let report = session.play_round(&mut port).unwrap().unwrap();
        let used = report.player.len() + report.dealer.len();

        assert_eq!(session.summary().reshuffles, 1);
        assert_eq!(session.shoe().remaining(), CARDS_PER_DECK - used);
        assert_eq!(port.events[0], TableEvent::Shuffled { decks: 1 });
    }

    #[test]
    fn full_shoe_is_not_replaced() {
        let shoe = padded_shoe(&[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Eight]);
        let total = shoe.remaining();
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(10.0)])
            .actions(&[Action::Stand]);

        let report = session.play_round(&mut port).unwrap().unwrap();
        assert_eq!(session.summary().reshuffles, 0);
        assert_eq!(session.shoe().remaining(), total - 4);
        assert_eq!(report.settlement.outcome, Outcome::Win);
        assert_eq!(session.bankroll(), 110.0);
    }

    #[test]
    fn invalid_bets_are_asked_again() {
        let shoe = padded_shoe(&[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Eight]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(150.0), Some(-3.0), Some(f64::NAN), Some(40.0)])
            .actions(&[Action::Stand]);

        let report = session.play_round(&mut port).unwrap().unwrap();
        assert_eq!(report.wager.bet, 40.0);
        assert_eq!(port.bet_requests, 4);
        assert_eq!(session.bankroll(), 140.0);
    }

    #[test]
    fn zero_bet_ends_session() {
        let shoe = padded_shoe(&[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Eight]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(0.0), Some(40.0)])
            .actions(&[Action::Stand]);

        assert_eq!(session.play_round(&mut port).unwrap(), None);
        assert_eq!(session.ended(), Some(SessionEnd::NoBet));
        assert_eq!(port.bet_requests, 1);
        assert_eq!(session.bankroll(), 100.0);
        assert!(port.action_requests.is_empty());
    }

    #[test]
    fn no_bet_ends_session() {
        let mut session = Session::new(config(100.0)).unwrap();
        let mut port = ScriptedPort::new();

        let summary = session.run(&mut port).unwrap();
        assert_eq!(summary.end, Some(SessionEnd::NoBet));
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.final_bankroll, 100.0);
    }

    #[test]
    fn declining_to_continue_ends_session() {
        let shoe = padded_shoe(&[
            Rank::Ten,
            Rank::Ten,
            Rank::Nine,
            Rank::Eight,
            Rank::Ten,
            Rank::Ten,
            Rank::Seven,
            Rank::Nine,
        ]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(10.0), Some(20.0)])
            .actions(&[Action::Stand, Action::Stand])
            .answers(&[true, false]);

        let summary = session.run(&mut port).unwrap();
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.end, Some(SessionEnd::Declined));
        assert_eq!(summary.final_bankroll, 90.0);
        assert_eq!(port.prompts.len(), 2);
        assert!(matches!(
            port.events.last(),
            Some(TableEvent::SessionOver {
                reason: SessionEnd::Declined,
                ..
            })
        ));
    }

    #[test]
    fn quit_ends_without_asking_to_continue() {
        let shoe = padded_shoe(&[Rank::Ten, Rank::Ten, Rank::Six, Rank::Eight]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(30.0), Some(30.0)])
            .actions(&[Action::Quit])
            .answers(&[true]);

        let summary = session.run(&mut port).unwrap();
        assert_eq!(summary.end, Some(SessionEnd::Quit));
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.final_bankroll, 70.0);
        assert!(port.prompts.is_empty());
    }

    #[test]
    fn losing_everything_ends_session() {
        let shoe = padded_shoe(&[Rank::Ten, Rank::Ten, Rank::Six, Rank::Nine, Rank::King]);
        let mut session = Session::with_shoe(config(50.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(50.0)])
            .actions(&[Action::Hit])
            .answers(&[true]);

        let summary = session.run(&mut port).unwrap();
        assert_eq!(summary.end, Some(SessionEnd::Broke));
        assert_eq!(summary.final_bankroll, 0.0);
        assert!(port.prompts.is_empty());
        assert_eq!(session.play_round(&mut port).unwrap(), None);
    }

    #[test]
    fn lost_all_in_double_ends_session_below_zero() {
        // player 5 6 2 = 13, dealer 10 8 = 18
        let shoe = padded_shoe(&[Rank::Five, Rank::Ten, Rank::Six, Rank::Eight, Rank::Two]);
        let mut session = Session::with_shoe(config(50.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(50.0)])
            .actions(&[Action::Double])
            .answers(&[true]);

        let summary = session.run(&mut port).unwrap();
        assert_eq!(port.action_requests, vec![true]);
        assert_eq!(summary.end, Some(SessionEnd::Broke));
        assert_eq!(summary.final_bankroll, -50.0);
        assert_eq!(session.ended(), Some(SessionEnd::Broke));
    }

    #[test]
    fn double_is_settled_on_the_doubled_bet() {
        let shoe = padded_shoe(&[Rank::Five, Rank::Ten, Rank::Six, Rank::Eight, Rank::Nine]);
        let mut session = Session::with_shoe(config(100.0), shoe).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(25.0)])
            .actions(&[Action::Double]);

        let report = session.play_round(&mut port).unwrap().unwrap();
        assert_eq!(report.wager.bet, 50.0);
        assert_eq!(report.settlement.outcome, Outcome::Win);
        assert_eq!(session.bankroll(), 150.0);
        assert_eq!(session.summary().doubles, 1);
    }

    #[test]
    fn bankroll_reconciles_with_settlements() {
        let mut session = Session::new(config(1_000.0)).unwrap();
        let mut port = ScriptedPort::new()
            .bets(&[Some(10.0); 40])
            .actions(&[Action::Stand; 40])
            .answers(&[true; 40]);

        let mut total_delta = 0.0;
        while let Some(report) = session.play_round(&mut port).unwrap() {
            total_delta += report.settlement.delta;
            match report.settlement.outcome {
                Outcome::PlayerBlackjack => assert_eq!(report.settlement.delta, 15.0),
                o if o.is_win() => assert_eq!(report.settlement.delta, 10.0),
                o if o.is_push() => assert_eq!(report.settlement.delta, 0.0),
                _ => assert_eq!(report.settlement.delta, -10.0),
            }
        }

        let summary = session.summary();
        assert_eq!(summary.rounds, 40);
        assert_eq!(summary.wins + summary.pushes + summary.losses, 40);
        assert_eq!(session.bankroll(), 1_000.0 + total_delta);
        assert_eq!(summary.winnings, total_delta);
        assert_eq!(summary.final_bankroll, session.bankroll());
    }

    #[test]
    fn summary_table_has_fixed_width() {
        let summary = SessionSummary::new(500.0);
        let text = summary.to_string();
        for line in text.lines() {
            assert_eq!(line.chars().count(), 80, "{line:?}");
        }
        assert!(text.contains("in progress"));
    }
}
