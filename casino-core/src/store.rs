use casino_persistence::KeyValueStore;
use casino_types::{Outcome, Profile, Settings, Stats, UserState};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::normalize::{
    normalize_balance, normalize_profile, normalize_selected_game_id, normalize_settings,
    normalize_stats,
};

/// Fixed storage keys, one per persisted record.
pub mod keys {
    pub const BALANCE: &str = "demoCasino.balance";
    pub const SELECTED_GAME_ID: &str = "demoCasino.selectedGameId";
    pub const SETTINGS: &str = "demoCasino.settings";
    pub const PROFILE: &str = "demoCasino.profile";
    pub const STATS: &str = "demoCasino.stats";

    pub const ALL: [&str; 5] = [BALANCE, SELECTED_GAME_ID, SETTINGS, PROFILE, STATS];
}

/// Owns the user's state and keeps it in step with a [`KeyValueStore`].
///
/// Every save writes exactly one record under its own key. Storage failures
/// are logged and absorbed; the in-memory state stays authoritative for the
/// rest of the session.
pub struct StateStore<S> {
    storage: S,
    state: UserState,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Load all five records, each normalized on its own.
    pub fn load(storage: S) -> Self {
        let state = Self::read_state(&storage);
        debug!(
            balance = state.balance,
            selected = %state.selected_game_id,
            "Loaded user state"
        );
        Self { storage, state }
    }

    fn read_state(storage: &S) -> UserState {
        UserState {
            balance: normalize_balance(read(storage, keys::BALANCE).as_deref()),
            selected_game_id: normalize_selected_game_id(
                read(storage, keys::SELECTED_GAME_ID).as_deref(),
            ),
            settings: normalize_settings(read(storage, keys::SETTINGS).as_deref()),
            profile: normalize_profile(read(storage, keys::PROFILE).as_deref()),
            stats: normalize_stats(read(storage, keys::STATS).as_deref()),
        }
    }

    /// Re-read every record from storage, dropping in-memory changes.
    pub fn reload(&mut self) {
        self.state = Self::read_state(&self.storage);
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn set_balance(&mut self, balance: i64) {
        self.state.balance = balance;
        self.save_balance();
    }

    pub fn set_selected_game_id(&mut self, id: &str) {
        self.state.selected_game_id = id.to_string();
        self.save_selected_game_id();
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        self.save_settings();
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.state.profile = profile;
        self.save_profile();
    }

    /// Run one play against the current balance: take the wager, resolve it,
    /// credit any payout, update the counters, then persist balance and
    /// stats. The caller has already validated `bet`.
    pub fn settle_with(&mut self, bet: i64, resolve: impl FnOnce(i64) -> Outcome) -> Outcome {
        self.state.balance = self.state.balance.saturating_sub(bet);

        let outcome = resolve(bet);
        let wager = bet.max(0) as u64;
        if outcome.payout > 0 {
            self.state.balance = self.state.balance.saturating_add(outcome.payout);
            self.state.stats.record_win(wager, outcome.payout as u64);
        } else {
            self.state.stats.record_loss(wager);
        }

        self.save_balance();
        self.save_stats();
        outcome
    }

    /// Zero the counters; nothing else changes.
    pub fn reset_stats(&mut self) {
        self.state.stats = Stats::default();
        self.save_stats();
        info!("Stats reset");
    }

    /// Erase every record and start over from first-run defaults.
    pub fn reset_all(&mut self) {
        for key in keys::ALL {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove persisted record");
            }
        }
        self.reload();
        info!("All user data reset");
    }

    pub fn save_balance(&mut self) {
        let value = self.state.balance.to_string();
        self.write(keys::BALANCE, &value);
    }

    pub fn save_selected_game_id(&mut self) {
        let value = self.state.selected_game_id.clone();
        self.write(keys::SELECTED_GAME_ID, &value);
    }

    pub fn save_settings(&mut self) {
        let settings = self.state.settings;
        self.write_json(keys::SETTINGS, &settings);
    }

    pub fn save_profile(&mut self) {
        let profile = self.state.profile.clone();
        self.write_json(keys::PROFILE, &profile);
    }

    pub fn save_stats(&mut self) {
        let stats = self.state.stats;
        self.write_json(keys::STATS, &stats);
    }

    fn write_json<T: Serialize>(&mut self, key: &'static str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, &json),
            Err(e) => warn!(key, error = %e, "Failed to encode record"),
        }
    }

    fn write(&mut self, key: &'static str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Failed to persist record");
        }
    }
}

/// Read errors count as a missing record.
fn read<S: KeyValueStore>(storage: &S, key: &'static str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_persistence::MemoryStore;
    use casino_types::{OutcomeTier, Theme};

    fn outcome(bet: i64, payout: i64) -> Outcome {
        Outcome {
            game_id: "coin".to_string(),
            bet,
            payout,
            tier: if payout > 0 { OutcomeTier::Win } else { OutcomeTier::Loss },
            title: String::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_first_run_uses_defaults_and_writes_nothing() {
        let store = StateStore::load(MemoryStore::new());
        assert_eq!(store.state(), &UserState::default());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_save_touches_only_its_key() {
        let mut store = StateStore::load(MemoryStore::new());
        store.set_balance(42);

        assert_eq!(store.storage().len(), 1);
        assert_eq!(
            store.storage().get(keys::BALANCE).unwrap().as_deref(),
            Some("42")
        );
    }

    #[test]
    fn test_settle_with_win_and_loss() {
        let mut store = StateStore::load(MemoryStore::new());

        let won = store.settle_with(10, |bet| outcome(bet, bet * 2));
        assert_eq!(won.payout, 20);
        assert_eq!(store.state().balance, 510);

        store.settle_with(30, |bet| outcome(bet, 0));
        assert_eq!(store.state().balance, 480);

        let stats = store.state().stats;
        assert_eq!(stats.plays, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.total_bet, 40);
        assert_eq!(stats.total_won, 20);

        let reloaded = StateStore::load(store.into_storage());
        assert_eq!(reloaded.state().balance, 480);
        assert_eq!(reloaded.state().stats, stats);
    }

    #[test]
    fn test_resolver_receives_wager() {
        let mut store = StateStore::load(MemoryStore::new());
        let mut seen = None;
        store.settle_with(100, |bet| {
            seen = Some(bet);
            outcome(bet, 0)
        });
        assert_eq!(seen, Some(100));
        assert_eq!(store.state().balance, 400);
    }

    #[test]
    fn test_reset_stats_keeps_other_records() {
        let mut store = StateStore::load(MemoryStore::new());
        store.set_settings(Settings {
            theme: Theme::Light,
            sound: false,
        });
        store.settle_with(10, |bet| outcome(bet, 0));
        store.reset_stats();

        assert_eq!(store.state().stats, Stats::default());
        assert_eq!(store.state().balance, 490);
        assert_eq!(store.state().settings.theme, Theme::Light);
    }

    #[test]
    fn test_reset_all_removes_every_key() {
        let mut store = StateStore::load(MemoryStore::new());
        store.set_balance(5);
        store.set_selected_game_id("dice");
        store.set_profile(Profile {
            username: "Ada".to_string(),
        });
        store.reset_stats();
        store.save_settings();
        assert_eq!(store.storage().len(), 5);

        store.reset_all();
        assert!(store.storage().is_empty());
        assert_eq!(store.state(), &UserState::default());
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let mut store = StateStore::load(MemoryStore::with_entries([(keys::BALANCE, "77")]));
        assert_eq!(store.state().balance, 77);
        store.reload();
        assert_eq!(store.state().balance, 77);
    }
}
