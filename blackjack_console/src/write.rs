use blackjack_lib::{SessionEnd, SessionSummary};
use serde::Serialize;
use std::io::Write;

/// A struct for collecting `SessionSummary` data, plus the derived rates, into something that can serialize into JSON
#[derive(Debug, Serialize)]
pub struct SessionSummaryJson {
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
    pub win_pct: f64,
    pub push_pct: f64,
    pub lose_pct: f64,
    pub avg_winnings_per_round: f64,
}

impl From<&SessionSummary> for SessionSummaryJson {
    fn from(summary: &SessionSummary) -> Self {
        let rounds = summary.rounds as f64;
        let rate = |n: u32| if summary.rounds == 0 { 0.0 } else { n as f64 / rounds };
        SessionSummaryJson {
            rounds: summary.rounds,
            wins: summary.wins,
            pushes: summary.pushes,
            losses: summary.losses,
            player_blackjacks: summary.player_blackjacks,
            dealer_blackjacks: summary.dealer_blackjacks,
            doubles: summary.doubles,
            reshuffles: summary.reshuffles,
            winnings: summary.winnings,
            starting_bankroll: summary.starting_bankroll,
            final_bankroll: summary.final_bankroll,
            end: summary.end,
            win_pct: rate(summary.wins),
            push_pct: rate(summary.pushes),
            lose_pct: rate(summary.losses),
            avg_winnings_per_round: if summary.rounds == 0 {
                0.0
            } else {
                summary.winnings / rounds
            },
        }
    }
}

/// Writes `summary` to `writer`, either as the fixed-width stats table or as pretty JSON.
pub fn write_summary(
    summary: &SessionSummary,
    json: bool,
    mut writer: impl Write,
) -> std::io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut writer, &SessionSummaryJson::from(summary))?;
        writeln!(writer)?;
    } else {
        writeln!(writer, "{}", summary)?;
    }
    writer.flush()
}
