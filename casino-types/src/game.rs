use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type GameId = String;

/// A playable demo game. Catalog entries are compiled in, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Game {
    #[ts(type = "string")]
    pub id: &'static str,
    #[ts(type = "string")]
    pub name: &'static str,
    #[ts(type = "string")]
    pub icon: &'static str,
    #[ts(type = "string")]
    pub description: &'static str,
    #[ts(type = "number")]
    pub min_bet: i64,
    /// Advisory only, settlement never enforces it.
    #[ts(type = "number")]
    pub max_bet_hint: i64,
}

/// Payout tier of a resolved play, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OutcomeTier {
    Loss,
    Win,
    BigWin, // dice six
    Jackpot, // slot top prize
}

impl OutcomeTier {
    pub fn is_win(self) -> bool {
        !matches!(self, OutcomeTier::Loss)
    }
}

/// Result of resolving one play: what was wagered, what it paid and the text
/// a result panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Outcome {
    pub game_id: GameId,
    #[ts(type = "number")]
    pub bet: i64,
    #[ts(type = "number")]
    pub payout: i64,
    pub tier: OutcomeTier,
    pub title: String,
    pub message: String,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }

    /// Balance delta of the play once settled.
    pub fn net(&self) -> i64 {
        self.payout.saturating_sub(self.bet)
    }
}

/// Short tone the UI may play after a settled play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SoundCue {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl SoundCue {
    pub const WIN: SoundCue = SoundCue {
        frequency_hz: 900,
        duration_ms: 80,
    };
    pub const LOSS: SoundCue = SoundCue {
        frequency_hz: 220,
        duration_ms: 80,
    };

    pub fn for_outcome(outcome: &Outcome) -> Self {
        if outcome.is_win() { Self::WIN } else { Self::LOSS }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(bet: i64, payout: i64, tier: OutcomeTier) -> Outcome {
        Outcome {
            game_id: "coin".to_string(),
            bet,
            payout,
            tier,
            title: String::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_outcome_net() {
        assert_eq!(outcome(10, 20, OutcomeTier::Win).net(), 10);
        assert_eq!(outcome(10, 0, OutcomeTier::Loss).net(), -10);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(OutcomeTier::Jackpot > OutcomeTier::BigWin);
        assert!(OutcomeTier::BigWin > OutcomeTier::Win);
        assert!(!OutcomeTier::Loss.is_win());
        assert!(OutcomeTier::Win.is_win());
    }

    #[test]
    fn test_sound_cue_follows_payout() {
        assert_eq!(SoundCue::for_outcome(&outcome(5, 10, OutcomeTier::Win)), SoundCue::WIN);
        assert_eq!(SoundCue::for_outcome(&outcome(5, 0, OutcomeTier::Loss)), SoundCue::LOSS);
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let json = serde_json::to_value(outcome(10, 50, OutcomeTier::Jackpot)).unwrap();
        assert_eq!(json["gameId"], "coin");
        assert_eq!(json["tier"], "Jackpot");
    }
}
