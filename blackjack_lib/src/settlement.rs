//! Payout rules. Every function here is pure: it looks at the finished hands and the bet and
//! reports how much the bankroll moves, it never touches the bankroll itself.

use crate::hand::Hand;
use serde::Serialize;
use std::fmt::Display;

/// Blackjack pays 3:2.
pub const BLACKJACK_PAYOUT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    PlayerBlackjack,
    DealerBlackjack,
    BlackjackPush,
    DealerBust,
    Win,
    Loss,
    Push,
    PlayerBust,
    Forfeit,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PlayerBlackjack => "blackjack",
            Outcome::DealerBlackjack => "dealer blackjack",
            Outcome::BlackjackPush => "blackjack push",
            Outcome::DealerBust => "dealer-bust win",
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Push => "push",
            Outcome::PlayerBust => "bust",
            Outcome::Forfeit => "forfeit",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjack | Outcome::DealerBust | Outcome::Win
        )
    }

    pub fn is_push(&self) -> bool {
        matches!(self, Outcome::BlackjackPush | Outcome::Push)
    }

    pub fn is_loss(&self) -> bool {
        matches!(
            self,
            Outcome::DealerBlackjack | Outcome::Loss | Outcome::PlayerBust | Outcome::Forfeit
        )
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of settling a round: the signed change to the bankroll and why.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settlement {
    pub delta: f64,
    pub outcome: Outcome,
}

impl Settlement {
    fn new(delta: f64, outcome: Outcome) -> Settlement {
        Settlement { delta, outcome }
    }
}

/// Settles the natural path. Returns `None` when neither hand is a blackjack.
pub fn settle_natural(player: &Hand, dealer: &Hand, bet: f64) -> Option<Settlement> {
    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => Some(Settlement::new(0.0, Outcome::BlackjackPush)),
        (true, false) => Some(Settlement::new(
            bet * BLACKJACK_PAYOUT,
            Outcome::PlayerBlackjack,
        )),
        (false, true) => Some(Settlement::new(-bet, Outcome::DealerBlackjack)),
        (false, false) => None,
    }
}

/// Settles a hand that was played out. A busted player loses before the dealer's hand is
/// even considered.
pub fn settle(player: &Hand, dealer: &Hand, bet: f64) -> Settlement {
    if player.is_bust() {
        return Settlement::new(-bet, Outcome::PlayerBust);
    }
    if dealer.is_bust() {
        return Settlement::new(bet, Outcome::DealerBust);
    }

    let (player_score, dealer_score) = (player.score(), dealer.score());
    if player_score > dealer_score {
        Settlement::new(bet, Outcome::Win)
    } else if player_score < dealer_score {
        Settlement::new(-bet, Outcome::Loss)
    } else {
        Settlement::new(0.0, Outcome::Push)
    }
}

/// The player walked away mid-round and gives up the bet.
pub fn forfeit(bet: f64) -> Settlement {
    Settlement::new(-bet, Outcome::Forfeit)
}
