//! Helpers shared by the unit tests: stacked shoes and a `TablePort` that replays a script.

use crate::card::{Card, Rank, Suit};
use crate::hand::Hand;
use crate::port::{Action, TableEvent, TablePort, TableView};
use crate::shoe::{Shoe, CARDS_PER_DECK};
use std::collections::VecDeque;

pub fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new();
    for rank in ranks {
        hand.add_card(Card::new(*rank, Suit::Spades));
    }
    hand
}

/// A shoe dealing exactly `ranks`, in order.
pub fn shoe_of(ranks: &[Rank]) -> Shoe {
    Shoe::stacked(ranks.iter().map(|r| Card::new(*r, Suit::Spades)))
}

/// Like `shoe_of`, followed by enough filler that the session won't reshuffle it away.
pub fn padded_shoe(ranks: &[Rank]) -> Shoe {
    let front = ranks.iter().map(|r| Card::new(*r, Suit::Spades));
    let filler = Rank::ALL
        .iter()
        .cycle()
        .take(CARDS_PER_DECK + 8)
        .map(|r| Card::new(*r, Suit::Clubs));
    Shoe::stacked(front.chain(filler))
}

/// Replays scripted answers and records everything the engine asked or announced.
/// Exhausted scripts fall back to Stand, no bet and "no".
#[derive(Default)]
pub struct ScriptedPort {
    actions: VecDeque<Action>,
    bets: VecDeque<Option<f64>>,
    answers: VecDeque<bool>,
    pub action_requests: Vec<bool>,
    pub bet_requests: usize,
    pub prompts: Vec<String>,
    pub events: Vec<TableEvent>,
}

impl ScriptedPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(mut self, actions: &[Action]) -> Self {
        self.actions.extend(actions.iter().copied());
        self
    }

    pub fn bets(mut self, bets: &[Option<f64>]) -> Self {
        self.bets.extend(bets.iter().copied());
        self
    }

    pub fn answers(mut self, answers: &[bool]) -> Self {
        self.answers.extend(answers.iter().copied());
        self
    }

    pub fn table_views(&self) -> Vec<TableView> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TableEvent::Table(view) => Some(view.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TablePort for ScriptedPort {
    fn render_hand(&self, cards: &[Card], hide_first: bool) -> Vec<String> {
        cards
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == 0 && hide_first {
                    "??".to_string()
                } else {
                    c.to_string()
                }
            })
            .collect()
    }

    fn read_action(&mut self, can_double: bool) -> Action {
        self.action_requests.push(can_double);
        self.actions.pop_front().unwrap_or(Action::Stand)
    }

    fn read_bet(&mut self, _bankroll: f64) -> Option<f64> {
        self.bet_requests += 1;
        self.bets.pop_front().flatten()
    }

    fn read_yes_no(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn show(&mut self, event: TableEvent) {
        self.events.push(event);
    }
}
