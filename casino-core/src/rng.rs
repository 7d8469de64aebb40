//! Random draws for the outcome engine.
//!
//! Production play uses the thread-local generator. Seeded and scripted
//! sources make plays reproducible for demos, replays and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform draw in `[0.0, 1.0)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform die roll in `1..=6`.
    fn roll_d6(&mut self) -> u8 {
        let face = (self.next_unit() * 6.0).floor() as u8 + 1;
        face.clamp(1, 6)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn roll_d6(&mut self) -> u8 {
        (**self).roll_d6()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn roll_d6(&mut self) -> u8 {
        (**self).roll_d6()
    }
}

/// Non-reproducible draws from `rand::thread_rng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }

    fn roll_d6(&mut self) -> u8 {
        rand::thread_rng().gen_range(1..=6)
    }
}

/// Reproducible draws: the same seed always replays the same session.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn roll_d6(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Largest `f64` below 1.0.
const MAX_DRAW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Scripted draws. Each script cycles once exhausted; with no scripted rolls
/// the die is derived from the unit draws. Draws are clamped into [0, 1), so
/// a scripted `1.0` plays as the highest (losing) draw.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    draws: Vec<f64>,
    rolls: Vec<u8>,
    next_draw: usize,
    next_roll: usize,
}

impl FixedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>, rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            draws: draws
                .into_iter()
                .map(|d| if d.is_nan() { MAX_DRAW } else { d.clamp(0.0, MAX_DRAW) })
                .collect(),
            rolls: rolls.into_iter().map(|r| r.clamp(1, 6)).collect(),
            next_draw: 0,
            next_roll: 0,
        }
    }

    pub fn draws(draws: impl IntoIterator<Item = f64>) -> Self {
        Self::new(draws, std::iter::empty())
    }

    pub fn rolls(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self::new(std::iter::empty(), rolls)
    }

    /// Every unit draw returns `draw`.
    pub fn always(draw: f64) -> Self {
        Self::draws([draw])
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next_draw % self.draws.len()];
        self.next_draw += 1;
        draw
    }

    fn roll_d6(&mut self) -> u8 {
        if self.rolls.is_empty() {
            let face = (self.next_unit() * 6.0).floor() as u8 + 1;
            return face.clamp(1, 6);
        }
        let roll = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        roll
    }
}
