//! Closed-form decay model for the secondary acquisition channel.
//!
//! The channel has its own observed decay shape per variant and needs
//! no curve reconstruction.

use forecast_core::types::Variant;

/// Retention of a secondary-channel cohort at 1-indexed `age` (age 1
/// is the install day itself).
pub fn secondary_retention(variant: Variant, age: u32) -> f64 {
    let t = f64::from(age) - 1.0;
    match variant {
        Variant::A => 0.58 * (-0.12 * t).exp(),
        Variant::B => 0.52 * (-0.10 * t).exp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_day_rates() {
        assert!((secondary_retention(Variant::A, 1) - 0.58).abs() < 1e-12);
        assert!((secondary_retention(Variant::B, 1) - 0.52).abs() < 1e-12);
    }

    #[test]
    fn test_decay_is_monotonic() {
        for variant in Variant::ALL {
            for age in 1..60 {
                assert!(
                    secondary_retention(variant, age) > secondary_retention(variant, age + 1)
                );
            }
        }
    }

    #[test]
    fn test_variant_a_decays_faster() {
        // A starts higher but has the steeper exponent.
        let ratio_a = secondary_retention(Variant::A, 2) / secondary_retention(Variant::A, 1);
        let ratio_b = secondary_retention(Variant::B, 2) / secondary_retention(Variant::B, 1);
        assert!(ratio_a < ratio_b);
    }
}
