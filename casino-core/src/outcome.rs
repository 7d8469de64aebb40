use casino_types::{Outcome, OutcomeTier};

use crate::RandomSource;

pub const COIN_WIN_BELOW: f64 = 0.5;
pub const SLOT_JACKPOT_BELOW: f64 = 0.08;
pub const SLOT_WIN_BELOW: f64 = 0.30;

pub struct OutcomeEngine;

impl OutcomeEngine {
    /// Resolve one play. Takes exactly one draw from `rng`: a unit draw for
    /// coin and slot, a die roll for dice. Ids the engine does not know play
    /// as the slot.
    pub fn resolve(game_id: &str, bet: i64, rng: &mut (impl RandomSource + ?Sized)) -> Outcome {
        match game_id {
            "coin" => Self::coin(bet, rng.next_unit()),
            "dice" => Self::dice(bet, rng.roll_d6()),
            _ => Self::slot(game_id, bet, rng.next_unit()),
        }
    }

    pub fn coin(bet: i64, draw: f64) -> Outcome {
        if draw < COIN_WIN_BELOW {
            let payout = bet.saturating_mul(2);
            build(
                "coin",
                bet,
                payout,
                OutcomeTier::Win,
                "You won the coin flip!",
                format!("You doubled your bet. Bet: {bet}, payout: {payout}."),
            )
        } else {
            build(
                "coin",
                bet,
                0,
                OutcomeTier::Loss,
                "You lost the coin flip",
                format!("No payout this time. Bet: {bet}."),
            )
        }
    }

    pub fn dice(bet: i64, roll: u8) -> Outcome {
        match roll {
            6 => {
                let payout = bet.saturating_mul(3);
                build(
                    "dice",
                    bet,
                    payout,
                    OutcomeTier::BigWin,
                    "Dice: 6! Big win!",
                    format!("You rolled a {roll}. Payout: {payout}."),
                )
            }
            4 | 5 => {
                let payout = bet.saturating_mul(2);
                build(
                    "dice",
                    bet,
                    payout,
                    OutcomeTier::Win,
                    "Dice win!",
                    format!("You rolled a {roll}. Payout: {payout}."),
                )
            }
            _ => build(
                "dice",
                bet,
                0,
                OutcomeTier::Loss,
                "Dice loss",
                format!("You rolled a {roll}. No payout."),
            ),
        }
    }

    pub fn slot(game_id: &str, bet: i64, draw: f64) -> Outcome {
        if draw < SLOT_JACKPOT_BELOW {
            let payout = bet.saturating_mul(5);
            build(
                game_id,
                bet,
                payout,
                OutcomeTier::Jackpot,
                "Jackpot (demo)!",
                format!("Big win! Bet: {bet}, payout: {payout}."),
            )
        } else if draw < SLOT_WIN_BELOW {
            let payout = bet.saturating_mul(2);
            build(
                game_id,
                bet,
                payout,
                OutcomeTier::Win,
                "Nice win!",
                format!("You won! Bet: {bet}, payout: {payout}."),
            )
        } else {
            build(
                game_id,
                bet,
                0,
                OutcomeTier::Loss,
                "No match",
                format!("Better luck next time. Bet: {bet}."),
            )
        }
    }
}

fn build(
    game_id: &str,
    bet: i64,
    payout: i64,
    tier: OutcomeTier,
    title: &str,
    message: String,
) -> Outcome {
    Outcome {
        game_id: game_id.to_string(),
        bet,
        payout: payout.max(0),
        tier,
        title: title.to_string(),
        message,
    }
}
