//! Box-drawing card art. Every card is `CARD_HEIGHT` lines tall and `CARD_WIDTH` columns wide,
//! face-down cards included, so hands line up however many cards are hidden.

use blackjack_lib::Card;

pub const CARD_HEIGHT: usize = 7;
pub const CARD_WIDTH: usize = 11;

fn face_up(card: &Card) -> [String; CARD_HEIGHT] {
    let label = card.rank_label();
    let suit = card.suit.symbol();
    [
        "┌─────────┐".to_string(),
        format!("│{:<2}       │", label),
        "│         │".to_string(),
        format!("│    {}    │", suit),
        "│         │".to_string(),
        format!("│       {:>2}│", label),
        "└─────────┘".to_string(),
    ]
}

fn face_down() -> [String; CARD_HEIGHT] {
    let mut rows: [String; CARD_HEIGHT] = Default::default();
    rows[0] = "┌─────────┐".to_string();
    for row in rows.iter_mut().take(CARD_HEIGHT - 1).skip(1) {
        *row = "│░░░░░░░░░│".to_string();
    }
    rows[CARD_HEIGHT - 1] = "└─────────┘".to_string();
    rows
}

/// Lays `cards` out side by side. With `hide_first` the first card is drawn face down.
pub fn render_hand(cards: &[Card], hide_first: bool) -> Vec<String> {
    let art = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            if i == 0 && hide_first {
                face_down()
            } else {
                face_up(card)
            }
        })
        .collect::<Vec<[String; CARD_HEIGHT]>>();

    (0..CARD_HEIGHT)
        .map(|row| {
            art.iter()
                .map(|card| card[row].as_str())
                .collect::<Vec<&str>>()
                .join(" ")
        })
        .collect()
}
