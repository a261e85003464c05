//! Retention curve reconstruction from sparse checkpoints.
//!
//! Between consecutive checkpoints retention decays geometrically (a
//! constant ratio per day, log-linear interpolation); beyond the last
//! checkpoint the slope of the final segment continues indefinitely.

use forecast_core::error::{ForecastError, ForecastResult};
use forecast_core::types::Checkpoint;

/// Dense day-indexed retention curve. Covers every integer day from 0
/// (fixed at 1.0) through at least the requested horizon; immutable
/// once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionCurve {
    rates: Vec<f64>,
}

impl RetentionCurve {
    /// Build a curve from `checkpoints` covering `0..=horizon`.
    ///
    /// Checkpoints must have strictly increasing days and positive
    /// rates; at least two are needed to derive the tail decay rate.
    pub fn build(checkpoints: &[Checkpoint], horizon: u32) -> ForecastResult<Self> {
        if checkpoints.len() < 2 {
            return Err(ForecastError::InsufficientCheckpoints {
                found: checkpoints.len(),
            });
        }
        for pair in checkpoints.windows(2) {
            if pair[1].day <= pair[0].day {
                return Err(ForecastError::UnorderedCheckpoints { day: pair[1].day });
            }
        }
        for cp in checkpoints {
            if cp.rate <= 0.0 || !cp.rate.is_finite() {
                return Err(ForecastError::NonPositiveRate {
                    day: cp.day,
                    rate: cp.rate,
                });
            }
        }

        let last = checkpoints[checkpoints.len() - 1];
        let covered = horizon.max(last.day) as usize;
        let mut rates = vec![0.0; covered + 1];
        rates[0] = 1.0;

        for pair in checkpoints.windows(2) {
            let (c0, c1) = (pair[0], pair[1]);
            let k = (c1.rate.ln() - c0.rate.ln()) / f64::from(c1.day - c0.day);
            for day in c0.day..=c1.day {
                rates[day as usize] = c0.rate * (k * f64::from(day - c0.day)).exp();
            }
        }

        // Tail: continue the decay rate of the final segment.
        let prev = checkpoints[checkpoints.len() - 2];
        let k = (last.rate.ln() - prev.rate.ln()) / f64::from(last.day - prev.day);
        for day in (last.day as usize + 1)..=covered {
            rates[day] = last.rate * (k * (day as f64 - f64::from(last.day))).exp();
        }

        Ok(Self { rates })
    }

    /// Retention rate at `day`, or `None` when the day lies beyond the
    /// built coverage. Callers decide what an uncovered day means
    /// rather than receiving a silent zero.
    pub fn rate(&self, day: u32) -> Option<f64> {
        self.rates.get(day as usize).copied()
    }

    /// Last day the curve covers.
    pub fn max_day(&self) -> u32 {
        (self.rates.len() - 1) as u32
    }
}
