use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameId;

pub const DEFAULT_BALANCE: i64 = 500;
pub const DEFAULT_GAME_ID: &str = "slot";
pub const DEFAULT_USERNAME: &str = "Guest";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Exact match only; anything else is not a theme.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    pub theme: Theme,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sound: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    pub username: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
        }
    }
}

/// Lifetime play counters. Only an explicit reset ever lowers them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Stats {
    #[ts(type = "number")]
    pub plays: u64,
    #[ts(type = "number")]
    pub wins: u64,
    #[ts(type = "number")]
    pub losses: u64,
    #[ts(type = "number")]
    pub total_bet: u64,
    #[ts(type = "number")]
    pub total_won: u64,
}

impl Stats {
    pub fn record_win(&mut self, bet: u64, payout: u64) {
        self.plays += 1;
        self.wins += 1;
        self.total_bet = self.total_bet.saturating_add(bet);
        self.total_won = self.total_won.saturating_add(payout);
    }

    pub fn record_loss(&mut self, bet: u64) {
        self.plays += 1;
        self.losses += 1;
        self.total_bet = self.total_bet.saturating_add(bet);
    }

    /// Credits won minus credits wagered, as shown on the profile page.
    pub fn net(&self) -> i128 {
        self.total_won as i128 - self.total_bet as i128
    }

    pub fn win_rate(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            self.wins as f64 / self.plays as f64
        }
    }
}

/// Everything persisted for the single local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserState {
    #[ts(type = "number")]
    pub balance: i64,
    pub selected_game_id: GameId,
    pub settings: Settings,
    pub profile: Profile,
    pub stats: Stats,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            selected_game_id: DEFAULT_GAME_ID.to_string(),
            settings: Settings::default(),
            profile: Profile::default(),
            stats: Stats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = UserState::default();
        assert_eq!(state.balance, 500);
        assert_eq!(state.selected_game_id, "slot");
        assert_eq!(state.settings.theme, Theme::Dark);
        assert!(state.settings.sound);
        assert_eq!(state.profile.username, "Guest");
        assert_eq!(state.stats, Stats::default());
    }

    #[test]
    fn test_stats_recording_keeps_plays_consistent() {
        let mut stats = Stats::default();
        stats.record_win(10, 20);
        stats.record_loss(5);
        stats.record_loss(5);

        assert_eq!(stats.plays, 3);
        assert_eq!(stats.plays, stats.wins + stats.losses);
        assert_eq!(stats.total_bet, 20);
        assert_eq!(stats.total_won, 20);
        assert_eq!(stats.net(), 0);
    }

    #[test]
    fn test_win_rate() {
        let mut stats = Stats::default();
        assert_eq!(stats.win_rate(), 0.0);
        stats.record_win(1, 2);
        stats.record_loss(1);
        assert!((stats.win_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_name("light"), Some(Theme::Light));
        assert_eq!(Theme::from_name("Dark"), None);
        assert_eq!(Theme::Light.as_str(), "light");
    }

    #[test]
    fn test_wire_format_matches_local_storage_layout() {
        let settings = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(settings, r#"{"theme":"dark","sound":true}"#);

        let stats = serde_json::to_string(&Stats::default()).unwrap();
        assert_eq!(
            stats,
            r#"{"plays":0,"wins":0,"losses":0,"totalBet":0,"totalWon":0}"#
        );
    }
}
