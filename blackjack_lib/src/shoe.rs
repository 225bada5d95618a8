use crate::card::{Card, Rank, Suit};
use crate::BlackjackGameError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards in a single standard deck.
pub const CARDS_PER_DECK: usize = 52;

/// Low-water mark checked before each round. Below it the session builds a fresh shoe,
/// which is far more than a single round can consume.
pub const RESHUFFLE_THRESHOLD: usize = CARDS_PER_DECK;

/// A multi-deck shoe. Cards are drawn from the top, i.e. the end of `cards`.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    deck_count: u32,
}

impl Shoe {
    /// Builds `deck_count` standard decks and shuffles them uniformly with `rng`.
    pub fn new<R: Rng + ?Sized>(deck_count: u32, rng: &mut R) -> Result<Shoe, BlackjackGameError> {
        if deck_count == 0 {
            return Err(BlackjackGameError::InvalidDeckCount(deck_count));
        }

        let mut cards = Vec::with_capacity(CARDS_PER_DECK * deck_count as usize);
        for _ in 0..deck_count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards.shuffle(rng);

        Ok(Shoe { cards, deck_count })
    }

    /// Builds a shoe that deals `cards` in the order given, first element first.
    pub fn stacked<I: IntoIterator<Item = Card>>(cards: I) -> Shoe {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.reverse();
        let deck_count = cards.len().div_ceil(CARDS_PER_DECK) as u32;
        Shoe { cards, deck_count }
    }

    pub fn draw(&mut self) -> Result<Card, BlackjackGameError> {
        self.cards.pop().ok_or(BlackjackGameError::EmptyShoe)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn deck_count(&self) -> u32 {
        self.deck_count
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.remaining() < RESHUFFLE_THRESHOLD
    }
}
