use casino_types::{GameId, Outcome, Settings, SoundCue};

/// Something the UI layer may want to react to (toast, audio, re-render).
#[derive(Debug, Clone, PartialEq)]
pub enum CasinoEvent {
    GameSelected {
        game_id: GameId,
        known: bool,
    },
    PlaySettled {
        outcome: Outcome,
        balance: i64,
        sound: Option<SoundCue>, // None when sound is off
    },
    CreditsAdded {
        amount: i64,
        balance: i64,
    },
    /// The one-click top-up, announced apart from a typed amount.
    QuickTopUp {
        amount: i64,
        balance: i64,
    },
    BalanceSet {
        balance: i64,
    },
    BalanceReset,
    ProfileUpdated {
        username: String,
    },
    SettingsUpdated {
        settings: Settings,
    },
    StatsReset,
    AllReset,
}

impl CasinoEvent {
    /// One-line notice in the style of the app's toasts.
    pub fn notice(&self) -> String {
        match self {
            CasinoEvent::GameSelected { game_id, known: true } => format!("Selected: {game_id}"),
            CasinoEvent::GameSelected { game_id, known: false } => {
                format!("Selected unknown game {game_id:?}")
            }
            CasinoEvent::PlaySettled { outcome, .. } => outcome.title.clone(),
            CasinoEvent::CreditsAdded { amount, .. } => format!("Added {amount} credits."),
            CasinoEvent::QuickTopUp { amount, .. } => format!("+{amount} credits added."),
            CasinoEvent::BalanceSet { balance } => format!("Balance set to {balance}."),
            CasinoEvent::BalanceReset => "Balance reset to 0.".to_string(),
            CasinoEvent::ProfileUpdated { .. } => "Profile saved.".to_string(),
            CasinoEvent::SettingsUpdated { settings } => format!(
                "Theme {}, sound {}.",
                settings.theme.as_str(),
                if settings.sound { "on" } else { "off" }
            ),
            CasinoEvent::StatsReset => "Stats reset.".to_string(),
            CasinoEvent::AllReset => "All data reset to defaults.".to_string(),
        }
    }
}

pub trait CasinoEventHandler {
    fn handle_event(&mut self, event: &CasinoEvent);
}

/// Fans events out to every registered handler, in registration order.
pub struct CasinoEventBus {
    handlers: Vec<Box<dyn CasinoEventHandler>>,
}

impl CasinoEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn CasinoEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: CasinoEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}

impl Default for CasinoEventBus {
    fn default() -> Self {
        Self::new()
    }
}
