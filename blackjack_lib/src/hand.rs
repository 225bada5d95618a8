use crate::card::Card;
use serde::Serialize;
use std::fmt::Display;

/// Cards held by the player or the dealer for a single round.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the best total for the hand along with the number of aces still counted as 11.
    fn evaluate(&self) -> (u32, usize) {
        let mut total: u32 = self.cards.iter().map(|c| c.pip_value() as u32).sum();
        let mut soft_aces = self.cards.iter().filter(|c| c.is_ace()).count();

        // Count aces as 1 one at a time until we are no longer bust
        while total > 21 && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }

        (total, soft_aces)
    }

    pub fn score(&self) -> u32 {
        self.evaluate().0
    }

    /// True if at least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.evaluate().1 > 0
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.score() == 21
    }

    pub fn is_bust(&self) -> bool {
        self.score() > 21
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "[{}] ({})", cards, self.score())
    }
}
