//! Normalize-on-load for the persisted records.
//!
//! Every record has its own `parse_*` function (raw text to value or a
//! [`PersistedDataError`]) and a `normalize_*` wrapper that falls back to the
//! record's default. Records are normalized independently, so a bad settings
//! payload never costs the user their balance or stats.

use casino_types::{
    DEFAULT_BALANCE, DEFAULT_GAME_ID, DEFAULT_USERNAME, Profile, Settings, Stats, Theme,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PersistedDataError {
    #[error("no value stored")]
    Missing,
    #[error("not an integer: {0:?}")]
    NotAnInteger(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Integer prefix of `raw`, read the way a lenient browser parser reads it:
/// leading whitespace, an optional sign, then as many digits as follow.
/// `"12.7"` is 12 and `"40 credits"` is 40; no digits or overflow is `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(matches!(s.as_bytes().first(), Some(b'-' | b'+')));
    let digits = &s[sign_len..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Parsing with the sign keeps i64::MIN in range
    s[..sign_len + end].parse().ok()
}

/// Integer held by a JSON value. Numbers truncate toward zero, strings use
/// [`parse_int_prefix`], anything else has no integer.
pub fn int_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let t = f.trunc();
            (f.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn present(raw: Option<&str>) -> Result<&str, PersistedDataError> {
    match raw {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(PersistedDataError::Missing),
    }
}

fn parse_object(raw: Option<&str>) -> Result<Map<String, Value>, PersistedDataError> {
    match serde_json::from_str::<Value>(present(raw)?)? {
        Value::Object(map) => Ok(map),
        other => Err(PersistedDataError::NotAnObject(json_kind(&other))),
    }
}

fn or_default<T>(record: &'static str, parsed: Result<T, PersistedDataError>, default: T) -> T {
    match parsed {
        Ok(value) => value,
        Err(PersistedDataError::Missing) => default,
        Err(e) => {
            warn!(record, error = %e, "Malformed persisted data, using default");
            default
        }
    }
}

/// Stored balance. Negative values are kept here; see [`normalize_balance`].
pub fn parse_balance(raw: Option<&str>) -> Result<i64, PersistedDataError> {
    let raw = present(raw)?;
    parse_int_prefix(raw).ok_or_else(|| PersistedDataError::NotAnInteger(raw.to_string()))
}

/// Stored balance, defaulting to 500. A negative balance can only come from a
/// hand-edited store and is raised to 0.
pub fn normalize_balance(raw: Option<&str>) -> i64 {
    let balance = or_default("balance", parse_balance(raw), DEFAULT_BALANCE);
    if balance < 0 {
        warn!(balance, "Negative persisted balance, clamping to 0");
        return 0;
    }
    balance
}

/// The selection is passed through untouched; whether it names a real game is
/// the consumer's concern.
pub fn normalize_selected_game_id(raw: Option<&str>) -> String {
    present(raw)
        .map(str::to_string)
        .unwrap_or_else(|_| DEFAULT_GAME_ID.to_string())
}

/// Settings whose sub-fields are repaired one by one: a bad `theme` does not
/// reset `sound`.
pub fn parse_settings(raw: Option<&str>) -> Result<Settings, PersistedDataError> {
    let map = parse_object(raw)?;
    let defaults = Settings::default();

    let theme = match map.get("theme") {
        Some(Value::String(name)) => Theme::from_name(name),
        _ => None,
    };
    let sound = map.get("sound").and_then(Value::as_bool);

    if theme.is_none() || sound.is_none() {
        warn!(?map, "Repairing persisted settings fields");
    }

    Ok(Settings {
        theme: theme.unwrap_or(defaults.theme),
        sound: sound.unwrap_or(defaults.sound),
    })
}

pub fn normalize_settings(raw: Option<&str>) -> Settings {
    or_default("settings", parse_settings(raw), Settings::default())
}

pub fn parse_profile(raw: Option<&str>) -> Result<Profile, PersistedDataError> {
    let map = parse_object(raw)?;
    let username = match map.get("username") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            warn!("Persisted profile has no usable username");
            DEFAULT_USERNAME.to_string()
        }
    };
    Ok(Profile { username })
}

pub fn normalize_profile(raw: Option<&str>) -> Profile {
    or_default("profile", parse_profile(raw), Profile::default())
}

/// Each counter is read on its own; unreadable or negative counters become 0.
pub fn parse_stats(raw: Option<&str>) -> Result<Stats, PersistedDataError> {
    let map = parse_object(raw)?;
    let counter = |key: &str| -> u64 {
        map.get(key)
            .and_then(int_from_json)
            .map(|n| n.max(0) as u64)
            .unwrap_or(0)
    };

    Ok(Stats {
        plays: counter("plays"),
        wins: counter("wins"),
        losses: counter("losses"),
        total_bet: counter("totalBet"),
        total_won: counter("totalWon"),
    })
}

pub fn normalize_stats(raw: Option<&str>) -> Stats {
    or_default("stats", parse_stats(raw), Stats::default())
}
