//! Shared domain types for the forecasting engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Product variant under test. The metrics lookup over this enum is
/// total, so a simulation can never hit a missing variant at runtime;
/// unknown variant names are rejected at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::A, Variant::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Variant::A),
            "B" | "b" => Ok(Variant::B),
            other => Err(ForecastError::UnknownVariant(other.to_string())),
        }
    }
}

/// One empirical retention observation: the fraction of a cohort still
/// active `day` days after install.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub day: u32,
    pub rate: f64,
}

impl Checkpoint {
    pub fn new(day: u32, rate: f64) -> Self {
        Self { day, rate }
    }
}

/// Monetization and retention profile of one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantMetrics {
    /// Fraction of active users who purchase on a given day.
    pub purchase_ratio: f64,
    /// Effective revenue per 1000 ad impressions.
    pub ecpm: f64,
    pub impressions_per_user: f64,
    /// Sparse retention checkpoints, strictly increasing by day.
    pub retention: Vec<Checkpoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
        }
    }

    #[test]
    fn test_variant_accepts_lowercase() {
        assert_eq!("a".parse::<Variant>().unwrap(), Variant::A);
        assert_eq!("b".parse::<Variant>().unwrap(), Variant::B);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let err = "C".parse::<Variant>().unwrap_err();
        assert!(matches!(err, ForecastError::UnknownVariant(v) if v == "C"));
    }
}
