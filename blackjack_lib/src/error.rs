use crate::port::Action;
use thiserror::Error;

/// Errors raised by the blackjack engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlackjackGameError {
    /// A card was drawn from an exhausted shoe. The session replaces the shoe before
    /// every round, so this only happens if that policy was bypassed.
    #[error("attempted to draw from an empty shoe")]
    EmptyShoe,
    #[error("a shoe needs at least one deck, got {0}")]
    InvalidDeckCount(u32),
    #[error("bet of {bet:.2} must be positive and at most the bankroll of {bankroll:.2}")]
    InvalidBet { bet: f64, bankroll: f64 },
    #[error("action {0:?} is not allowed at this point of the round")]
    IllegalAction(Action),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
