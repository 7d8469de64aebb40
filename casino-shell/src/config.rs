use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    /// Seed for reproducible sessions; unset means thread-local randomness.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let seed = match lookup("CASINO_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("Invalid CASINO_SEED: {raw:?}"))?,
            ),
            None => None,
        };

        Ok(Self {
            data_file: lookup("CASINO_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            seed,
            log_level: lookup("CASINO_LOG").unwrap_or(defaults.log_level),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./demo-casino.json"),
            seed: None,
            log_level: "info".to_string(),
        }
    }
}
