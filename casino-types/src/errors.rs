use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Why a play was refused. Refusals never touch state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SettlementError {
    #[error("bet must be greater than 0 (got {bet})")]
    InvalidBet {
        #[ts(type = "number")]
        bet: i64,
    },
    #[error("minimum bet for this game is {min_bet} (got {bet})")]
    BelowMinimum {
        #[ts(type = "number")]
        bet: i64,
        #[ts(type = "number")]
        min_bet: i64,
    },
    #[error("not enough credits: bet {bet}, balance {balance}")]
    InsufficientFunds {
        #[ts(type = "number")]
        bet: i64,
        #[ts(type = "number")]
        balance: i64,
    },
    #[error("no game selected (selection is {selected_game_id:?})")]
    NoGameSelected { selected_game_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BalanceError {
    #[error("amount must be positive (got {amount})")]
    NonPositiveAmount {
        #[ts(type = "number")]
        amount: i64,
    },
    #[error("balance cannot be negative (got {amount})")]
    NegativeBalance {
        #[ts(type = "number")]
        amount: i64,
    },
}
