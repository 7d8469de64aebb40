#![allow(dead_code)]

use casino_core::{Casino, CasinoEvent, CasinoEventHandler, FixedSource};
use casino_persistence::{KeyValueStore, MemoryStore, StorageError};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestCasino = Casino<MemoryStore, FixedSource>;

/// Casino on empty storage whose every unit draw is `draw`
pub fn casino_with_draw(draw: f64) -> TestCasino {
    Casino::with_rng(MemoryStore::new(), FixedSource::always(draw))
}

/// Casino on empty storage whose every die roll is `roll`
pub fn casino_with_roll(roll: u8) -> TestCasino {
    Casino::with_rng(MemoryStore::new(), FixedSource::rolls([roll]))
}

/// Casino loaded from pre-populated (possibly corrupt) storage
pub fn casino_from_entries(entries: &[(&str, &str)], draw: f64) -> TestCasino {
    let storage = MemoryStore::with_entries(entries.iter().copied());
    Casino::with_rng(storage, FixedSource::always(draw))
}

/// Select `game` and bring the balance to exactly `balance`
pub fn prepare(casino: &mut TestCasino, game: &str, balance: i64) {
    assert!(casino.select_game(game).is_some(), "unknown game {game}");
    casino.set_balance(balance).unwrap();
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Rc<RefCell<Vec<CasinoEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<CasinoEvent> {
        self.events.borrow().clone()
    }

    pub fn last_event(&self) -> Option<CasinoEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.borrow().len()
    }
}

impl CasinoEventHandler for EventCollector {
    fn handle_event(&mut self, event: &CasinoEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Storage whose reads and writes always fail
#[derive(Default)]
pub struct BrokenStore;

fn broken() -> StorageError {
    StorageError::Io(std::io::Error::other("disk on fire"))
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(broken())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(broken())
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(broken())
    }
}
