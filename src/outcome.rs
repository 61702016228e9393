//! Outcomes handed to the stage and the generators that produce them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{RevealError, RevealResult};

/// Lowest multiplier the stepped generator can draw.
pub const MIN_STEPPED_MULTIPLIER: f64 = 0.5;
/// Highest multiplier the stepped generator can draw.
pub const MAX_STEPPED_MULTIPLIER: f64 = 3.0;

/// A validated multiplier and bet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    multiplier: f64,
    bet_amount: f64,
}

impl Outcome {
    /// Rejects non-finite or negative values, and pairs whose win overflows.
    pub fn new(multiplier: f64, bet_amount: f64) -> RevealResult<Self> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(RevealError::InvalidMultiplier(multiplier));
        }
        if !bet_amount.is_finite() || bet_amount < 0.0 {
            return Err(RevealError::InvalidBet(bet_amount));
        }
        if !crate::history::win_amount(bet_amount, multiplier).is_finite() {
            return Err(RevealError::InvalidMultiplier(multiplier));
        }
        Ok(Self {
            multiplier,
            bet_amount,
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn win_amount(&self) -> f64 {
        crate::history::win_amount(self.bet_amount, self.multiplier)
    }
}

/// Supplies the multiplier of the next round.
///
/// The engine presents whatever it is given; fairness lives with the source.
pub trait OutcomeSource {
    fn next_multiplier(&mut self) -> f64;
}

impl<T: OutcomeSource + ?Sized> OutcomeSource for Box<T> {
    fn next_multiplier(&mut self) -> f64 {
        (**self).next_multiplier()
    }
}

/// Uniform draw from `0.5, 0.6, ..., 3.0`.
#[derive(Clone, Debug)]
pub struct SteppedOutcomes<R: Rng> {
    rng: R,
}

impl<R: Rng> SteppedOutcomes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeSource for SteppedOutcomes<R> {
    fn next_multiplier(&mut self) -> f64 {
        let steps = ((MAX_STEPPED_MULTIPLIER - MIN_STEPPED_MULTIPLIER) * 10.0).round() as u32;
        let step = self.rng.gen_range(0..=steps);
        // Tenths as integers keep the result on the nearest one-decimal value.
        (5 + step) as f64 / 10.0
    }
}

/// Replays a fixed list of multipliers, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedOutcomes {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedOutcomes {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_multiplier(&mut self) -> f64 {
        let Some(value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return MIN_STEPPED_MULTIPLIER;
        };
        self.cursor += 1;
        *value
    }
}
