use std::fmt::Write;

use casino_types::{Game, Outcome, OutcomeTier, Stats, UserState};

pub fn games(catalog: &[Game], selected_id: &str) -> String {
    let mut out = String::new();
    for game in catalog {
        let marker = if game.id == selected_id { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {} {:<10} [{}] {}  (min bet {}, suggested max {})",
            game.icon, game.name, game.id, game.description, game.min_bet, game.max_bet_hint
        );
    }
    out.trim_end().to_string()
}

pub fn outcome(outcome: &Outcome, balance: i64) -> String {
    let banner = match outcome.tier {
        OutcomeTier::Jackpot => "***",
        OutcomeTier::BigWin => "**",
        OutcomeTier::Win => "*",
        OutcomeTier::Loss => "-",
    };
    format!(
        "{banner} {}\n  {}\n  Balance: {balance}",
        outcome.title, outcome.message
    )
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Plays: {}  Wins: {}  Losses: {}  Net: {}  Win rate: {:.0}%",
        stats.plays,
        stats.wins,
        stats.losses,
        stats.net(),
        stats.win_rate() * 100.0
    )
}

pub fn state(state: &UserState, selected: Option<&Game>) -> String {
    let game = selected.map(|g| g.name).unwrap_or("None");
    format!(
        "Player: {}\nBalance: {}\nSelected game: {game}\nTheme: {}  Sound: {}\n{}",
        state.profile.username,
        state.balance,
        state.settings.theme.as_str(),
        if state.settings.sound { "on" } else { "off" },
        stats(&state.stats)
    )
}
