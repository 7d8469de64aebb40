use std::cell::RefCell;
use std::rc::Rc;

use casino_core::{Casino, CasinoEvent, CasinoEventHandler, RandomSource};
use casino_persistence::KeyValueStore;

use crate::command::{Command, HELP};
use crate::render;

/// What to show after one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Ring the terminal bell (a sound cue was emitted).
    pub bell: bool,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct Feedback {
    notices: Vec<String>,
    bell: bool,
}

/// Turns casino events into toast lines and bell requests.
struct FeedbackHandler(Rc<RefCell<Feedback>>);

impl CasinoEventHandler for FeedbackHandler {
    fn handle_event(&mut self, event: &CasinoEvent) {
        let mut feedback = self.0.borrow_mut();
        match event {
            // The result panel already shows the outcome
            CasinoEvent::PlaySettled { sound, .. } => feedback.bell |= sound.is_some(),
            other => feedback.notices.push(other.notice()),
        }
    }
}

/// One interactive session: the casino plus the bet field the UI remembers
/// between plays.
pub struct Session<S, R> {
    casino: Casino<S, R>,
    bet: Option<i64>,
    feedback: Rc<RefCell<Feedback>>,
}

impl<S: KeyValueStore, R: RandomSource> Session<S, R> {
    pub fn new(mut casino: Casino<S, R>) -> Self {
        let feedback = Rc::new(RefCell::new(Feedback::default()));
        casino.add_event_handler(Box::new(FeedbackHandler(feedback.clone())));
        Self {
            casino,
            bet: None,
            feedback,
        }
    }

    pub fn casino(&self) -> &Casino<S, R> {
        &self.casino
    }

    pub fn bet(&self) -> Option<i64> {
        self.bet
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        let mut reply = match command {
            Command::Help => Reply::text(HELP),
            Command::Games => Reply::text(render::games(
                self.casino.catalog(),
                &self.casino.state().selected_game_id,
            )),
            Command::Select(id) => {
                if self.casino.select_game(&id).is_some() {
                    self.bet = self.casino.suggested_bet(self.bet);
                    Reply::text(format!("Next bet: {}", self.bet.unwrap_or_default()))
                } else {
                    Reply::text("No such game. Type `games` to see the list.")
                }
            }
            Command::Play(amount) => self.play(amount),
            Command::MaxBet => {
                let max = self.casino.max_bet();
                self.bet = Some(max);
                Reply::text(format!("Next bet: {max}"))
            }
            Command::TopUp => {
                self.casino.quick_top_up();
                Reply::default()
            }
            Command::Add(amount) => match self.casino.add_credits(amount) {
                Ok(_) => Reply::default(),
                Err(e) => Reply::text(format!("Enter a positive amount ({e}).")),
            },
            Command::ResetBalance => {
                self.casino.reset_balance();
                Reply::default()
            }
            Command::Name(name) => {
                self.casino.update_profile(&name);
                Reply::default()
            }
            Command::Theme(theme) => {
                self.casino.set_theme(theme);
                Reply::default()
            }
            Command::Sound(on) => {
                self.casino.set_sound(on);
                Reply::default()
            }
            Command::Stats => Reply::text(render::stats(&self.casino.state().stats)),
            Command::ResetStats => {
                self.casino.reset_stats();
                Reply::default()
            }
            Command::ResetAll => {
                self.casino.reset_all();
                self.bet = None;
                Reply::default()
            }
            Command::State => Reply::text(render::state(
                self.casino.state(),
                self.casino.selected_game(),
            )),
            Command::Quit => Reply {
                text: "Bye!".to_string(),
                quit: true,
                ..Reply::default()
            },
        };

        let mut feedback = self.feedback.borrow_mut();
        let notices = std::mem::take(&mut feedback.notices);
        if !notices.is_empty() {
            let toasts = notices
                .iter()
                .map(|n| format!("» {n}"))
                .collect::<Vec<_>>()
                .join("\n");
            reply.text = if reply.text.is_empty() {
                toasts
            } else {
                format!("{}\n{toasts}", reply.text)
            };
        }
        reply.bell = std::mem::take(&mut feedback.bell);
        reply
    }

    fn play(&mut self, amount: Option<i64>) -> Reply {
        let bet = match amount {
            Some(bet) => bet,
            None => match self.casino.suggested_bet(self.bet) {
                Some(bet) => bet,
                None => self.bet.unwrap_or_default(),
            },
        };
        self.bet = Some(bet);

        match self.casino.settle(bet) {
            Ok(outcome) => Reply::text(render::outcome(&outcome, self.casino.state().balance)),
            Err(e) => Reply::text(format!("Cannot play: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_core::FixedSource;
    use casino_persistence::MemoryStore;

    fn session(draw: f64) -> Session<MemoryStore, FixedSource> {
        Session::new(Casino::with_rng(MemoryStore::new(), FixedSource::always(draw)))
    }

    fn run(session: &mut Session<MemoryStore, FixedSource>, line: &str) -> Reply {
        session.execute(line.parse().unwrap())
    }

    #[test]
    fn test_play_uses_suggested_bet() {
        let mut session = session(0.9);
        let reply = run(&mut session, "play");
        assert!(reply.text.contains("No match"));
        assert_eq!(session.bet(), Some(10));
        assert_eq!(session.casino().state().balance, 490);
        assert!(reply.bell);
    }

    #[test]
    fn test_play_remembers_bet() {
        let mut session = session(0.3);
        run(&mut session, "select coin");
        run(&mut session, "play 25");
        let reply = run(&mut session, "play");
        assert!(reply.text.contains("You won the coin flip!"));
        assert_eq!(session.casino().state().balance, 550);
    }

    #[test]
    fn test_refusals_are_reported() {
        let mut session = session(0.3);
        let reply = run(&mut session, "play 9999");
        assert!(reply.text.starts_with("Cannot play: not enough credits"));
        assert!(!reply.bell);

        let reply = run(&mut session, "add 0");
        assert!(reply.text.starts_with("Enter a positive amount"));
    }

    #[test]
    fn test_notices_follow_mutations() {
        let mut session = session(0.3);
        assert_eq!(run(&mut session, "topup").text, "» +100 credits added.");
        assert_eq!(run(&mut session, "reset-balance").text, "» Balance reset to 0.");
        assert_eq!(run(&mut session, "add 40").text, "» Added 40 credits.");
        assert_eq!(run(&mut session, "sound off").text, "» Theme dark, sound off.");
        assert_eq!(run(&mut session, "reset-stats").text, "» Stats reset.");

        let reply = run(&mut session, "play 10");
        assert!(!reply.bell);
    }

    #[test]
    fn test_max_bet_then_play() {
        let mut session = session(0.9);
        run(&mut session, "max");
        run(&mut session, "play");
        assert_eq!(session.casino().state().balance, 0);
    }

    #[test]
    fn test_quit() {
        let mut session = session(0.3);
        assert!(run(&mut session, "quit").quit);
    }
}
