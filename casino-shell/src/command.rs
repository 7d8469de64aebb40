use std::str::FromStr;

use casino_core::parse_int_prefix;
use casino_types::Theme;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Games,
    Select(String),
    /// Play the selected game; without an amount the remembered or suggested
    /// bet is used.
    Play(Option<i64>),
    MaxBet,
    TopUp,
    Add(i64),
    ResetBalance,
    Name(String),
    Theme(Theme),
    Sound(bool),
    Stats,
    ResetStats,
    ResetAll,
    State,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("enter a command (try `help`)")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("theme must be `dark` or `light`, not `{0}`")]
    InvalidTheme(String),
    #[error("expected `on` or `off`, not `{0}`")]
    InvalidToggle(String),
}

fn amount(raw: &str) -> Result<i64, ParseError> {
    parse_int_prefix(raw).ok_or_else(|| ParseError::InvalidNumber(raw.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "help" | "?" => Command::Help,
            "games" | "list" => Command::Games,
            "select" | "pick" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "select",
                        expected: "a game id",
                    });
                }
                Command::Select(rest.to_string())
            }
            "play" | "bet" => {
                if rest.is_empty() {
                    Command::Play(None)
                } else {
                    Command::Play(Some(amount(rest)?))
                }
            }
            "max" => Command::MaxBet,
            "topup" => Command::TopUp,
            "add" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "add",
                        expected: "an amount",
                    });
                }
                Command::Add(amount(rest)?)
            }
            "reset-balance" => Command::ResetBalance,
            // A blank name is allowed and resets to the default
            "name" => Command::Name(rest.to_string()),
            "theme" => match Theme::from_name(&rest.to_lowercase()) {
                Some(theme) => Command::Theme(theme),
                None => return Err(ParseError::InvalidTheme(rest.to_string())),
            },
            "sound" => match rest.to_lowercase().as_str() {
                "on" | "true" => Command::Sound(true),
                "off" | "false" => Command::Sound(false),
                _ => return Err(ParseError::InvalidToggle(rest.to_string())),
            },
            "stats" => Command::Stats,
            "reset-stats" => Command::ResetStats,
            "reset-all" => Command::ResetAll,
            "state" | "balance" => Command::State,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
games                 list the demo games
select <id>           pick a game (slot, coin, dice)
play [bet]            play the selected game
max                   bet the whole balance next play
topup                 add 100 credits
add <amount>          add credits
reset-balance         set the balance to 0
name <username>       change your display name
theme <dark|light>    switch theme
sound <on|off>        toggle sound cues
stats                 show play statistics
reset-stats           zero the statistics
reset-all             erase everything and start over
state                 show balance, selection and settings
quit                  leave";
