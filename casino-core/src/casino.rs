use casino_persistence::KeyValueStore;
use casino_types::{
    BalanceError, DEFAULT_USERNAME, Game, Outcome, Profile, SettlementError, Settings, SoundCue,
    Theme, UserState,
};
use tracing::{debug, info};

use crate::{
    CasinoEvent, CasinoEventBus, CasinoEventHandler, OutcomeEngine, RandomSource, StateStore,
    ThreadRngSource, find_game, games,
};

/// Credits granted by the quick top-up button.
pub const QUICK_TOP_UP: i64 = 100;
/// Bet offered when the current one is missing or under the game minimum.
pub const SUGGESTED_BET: i64 = 10;

/// Bet rules for one game, in order: positive, at least the game's minimum,
/// no more than `balance`.
pub fn check_bet(game: &Game, bet: i64, balance: i64) -> Result<(), SettlementError> {
    if bet <= 0 {
        return Err(SettlementError::InvalidBet { bet });
    }
    if bet < game.min_bet {
        return Err(SettlementError::BelowMinimum {
            bet,
            min_bet: game.min_bet,
        });
    }
    if bet > balance {
        return Err(SettlementError::InsufficientFunds { bet, balance });
    }
    Ok(())
}

/// The API a UI layer drives: one local user, one owned state, one random
/// source. Every mutation goes through `&mut self`, so there is exactly one
/// writer and a settlement can never be observed half-applied.
pub struct Casino<S, R = ThreadRngSource> {
    store: StateStore<S>,
    rng: R,
    events: CasinoEventBus,
}

impl<S: KeyValueStore> Casino<S> {
    pub fn open(storage: S) -> Self {
        Self::with_rng(storage, ThreadRngSource)
    }
}

impl<S: KeyValueStore, R: RandomSource> Casino<S, R> {
    pub fn with_rng(storage: S, rng: R) -> Self {
        Self {
            store: StateStore::load(storage),
            rng,
            events: CasinoEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn CasinoEventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn state(&self) -> &UserState {
        self.store.state()
    }

    pub fn snapshot(&self) -> UserState {
        self.store.state().clone()
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }

    pub fn catalog(&self) -> &'static [Game] {
        games()
    }

    /// `None` when the stored selection names no catalog game.
    pub fn selected_game(&self) -> Option<&'static Game> {
        find_game(&self.state().selected_game_id)
    }

    /// Any id is accepted and persisted; an unknown one simply leaves no game
    /// selected.
    pub fn select_game(&mut self, id: &str) -> Option<&'static Game> {
        self.store.set_selected_game_id(id);
        let game = find_game(id);
        debug!(id, known = game.is_some(), "Game selected");
        self.events.publish(CasinoEvent::GameSelected {
            game_id: id.to_string(),
            known: game.is_some(),
        });
        game
    }

    /// Check a bet against the selected game and the balance without playing.
    pub fn validate_bet(&self, bet: i64) -> Result<&'static Game, SettlementError> {
        let game = self
            .selected_game()
            .ok_or_else(|| SettlementError::NoGameSelected {
                selected_game_id: self.state().selected_game_id.clone(),
            })?;

        check_bet(game, bet, self.state().balance)?;
        Ok(game)
    }

    /// Play the selected game for `bet` credits. A refused bet leaves state
    /// untouched.
    pub fn settle(&mut self, bet: i64) -> Result<Outcome, SettlementError> {
        let game = self.validate_bet(bet)?;

        let rng = &mut self.rng;
        let outcome = self
            .store
            .settle_with(bet, |bet| OutcomeEngine::resolve(game.id, bet, rng));

        let balance = self.state().balance;
        info!(
            game = game.id,
            bet,
            payout = outcome.payout,
            tier = ?outcome.tier,
            balance,
            "Play settled"
        );

        let sound = self
            .state()
            .settings
            .sound
            .then(|| SoundCue::for_outcome(&outcome));
        self.events.publish(CasinoEvent::PlaySettled {
            outcome: outcome.clone(),
            balance,
            sound,
        });
        Ok(outcome)
    }

    /// Add `amount` credits and return the new balance.
    pub fn add_credits(&mut self, amount: i64) -> Result<i64, BalanceError> {
        if amount <= 0 {
            return Err(BalanceError::NonPositiveAmount { amount });
        }
        let balance = self.state().balance.saturating_add(amount);
        self.store.set_balance(balance);
        debug!(amount, balance, "Credits added");
        self.events
            .publish(CasinoEvent::CreditsAdded { amount, balance });
        Ok(balance)
    }

    pub fn quick_top_up(&mut self) -> i64 {
        let balance = self.state().balance.saturating_add(QUICK_TOP_UP);
        self.store.set_balance(balance);
        self.events.publish(CasinoEvent::QuickTopUp {
            amount: QUICK_TOP_UP,
            balance,
        });
        balance
    }

    pub fn set_balance(&mut self, amount: i64) -> Result<(), BalanceError> {
        if amount < 0 {
            return Err(BalanceError::NegativeBalance { amount });
        }
        self.store.set_balance(amount);
        debug!(balance = amount, "Balance set");
        self.events
            .publish(CasinoEvent::BalanceSet { balance: amount });
        Ok(())
    }

    pub fn reset_balance(&mut self) {
        self.store.set_balance(0);
        self.events.publish(CasinoEvent::BalanceReset);
    }

    /// Largest bet the balance allows.
    pub fn max_bet(&self) -> i64 {
        self.state().balance.max(0)
    }

    /// Bet to pre-fill for the selected game: `current` if it meets the
    /// game's minimum, otherwise the larger of 10 and that minimum. `None`
    /// when no game is selected.
    pub fn suggested_bet(&self, current: Option<i64>) -> Option<i64> {
        let game = self.selected_game()?;
        match current {
            Some(bet) if bet != 0 && bet >= game.min_bet => Some(bet),
            _ => Some(SUGGESTED_BET.max(game.min_bet)),
        }
    }

    /// Blank names fall back to the default username.
    pub fn update_profile(&mut self, username: &str) -> &Profile {
        let username = match username.trim() {
            "" => DEFAULT_USERNAME.to_string(),
            name => name.to_string(),
        };
        self.store.set_profile(Profile {
            username: username.clone(),
        });
        self.events.publish(CasinoEvent::ProfileUpdated { username });
        &self.state().profile
    }

    pub fn update_settings(&mut self, theme: Theme, sound: bool) -> Settings {
        let settings = Settings { theme, sound };
        self.store.set_settings(settings);
        debug!(theme = theme.as_str(), sound, "Settings updated");
        self.events
            .publish(CasinoEvent::SettingsUpdated { settings });
        settings
    }

    pub fn set_theme(&mut self, theme: Theme) -> Settings {
        let sound = self.state().settings.sound;
        self.update_settings(theme, sound)
    }

    pub fn set_sound(&mut self, sound: bool) -> Settings {
        let theme = self.state().settings.theme;
        self.update_settings(theme, sound)
    }

    pub fn reset_stats(&mut self) {
        self.store.reset_stats();
        self.events.publish(CasinoEvent::StatsReset);
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.events.publish(CasinoEvent::AllReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedSource;
    use casino_persistence::MemoryStore;

    fn casino(draw: f64) -> Casino<MemoryStore, FixedSource> {
        Casino::with_rng(MemoryStore::new(), FixedSource::always(draw))
    }

    #[test]
    fn test_no_game_selected_is_checked_first() {
        let mut casino = casino(0.0);
        casino.select_game("baccarat");
        assert_eq!(
            casino.settle(0),
            Err(SettlementError::NoGameSelected {
                selected_game_id: "baccarat".to_string()
            })
        );
    }

    const HIGH_ROLLER: Game = Game {
        id: "high-roller",
        name: "High Roller",
        icon: "💎",
        description: "Minimum stake of five.",
        min_bet: 5,
        max_bet_hint: 1000,
    };

    #[test]
    fn test_check_bet_rules_in_order() {
        assert_eq!(
            check_bet(&HIGH_ROLLER, 3, 500),
            Err(SettlementError::BelowMinimum { bet: 3, min_bet: 5 })
        );
        assert_eq!(
            check_bet(&HIGH_ROLLER, 0, 500),
            Err(SettlementError::InvalidBet { bet: 0 })
        );
        // Minimum is checked before the balance
        assert_eq!(
            check_bet(&HIGH_ROLLER, 3, 2),
            Err(SettlementError::BelowMinimum { bet: 3, min_bet: 5 })
        );
        assert_eq!(
            check_bet(&HIGH_ROLLER, 6, 5),
            Err(SettlementError::InsufficientFunds { bet: 6, balance: 5 })
        );
        assert_eq!(check_bet(&HIGH_ROLLER, 5, 5), Ok(()));
    }

    #[test]
    fn test_validate_bet_applies_check_bet() {
        let mut casino = casino(0.0);
        casino.select_game("dice");
        let before = casino.snapshot();
        assert_eq!(
            casino.settle(501),
            Err(SettlementError::InsufficientFunds {
                bet: 501,
                balance: 500
            })
        );
        assert_eq!(casino.snapshot(), before);
        assert_eq!(casino.validate_bet(1).map(|g| g.id), Ok("dice"));
    }

    #[test]
    fn test_suggested_bet() {
        let mut casino = casino(0.0);
        assert_eq!(casino.suggested_bet(None), Some(10));
        assert_eq!(casino.suggested_bet(Some(0)), Some(10));
        assert_eq!(casino.suggested_bet(Some(-3)), Some(10));
        assert_eq!(casino.suggested_bet(Some(3)), Some(3));

        casino.select_game("nothing");
        assert_eq!(casino.suggested_bet(Some(3)), None);
    }

    #[test]
    fn test_max_bet_never_negative() {
        let mut casino = casino(0.0);
        assert_eq!(casino.max_bet(), 500);
        casino.reset_balance();
        assert_eq!(casino.max_bet(), 0);
    }

    #[test]
    fn test_set_theme_keeps_sound() {
        let mut casino = casino(0.0);
        casino.set_sound(false);
        let settings = casino.set_theme(Theme::Light);
        assert_eq!(
            settings,
            Settings {
                theme: Theme::Light,
                sound: false
            }
        );
    }

    #[test]
    fn test_update_profile_trims() {
        let mut casino = casino(0.0);
        assert_eq!(casino.update_profile("  Ada ").username, "Ada");
        assert_eq!(casino.update_profile("   ").username, "Guest");
    }
}
