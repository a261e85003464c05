//! Day-by-day revenue composition and cumulative aggregation.

use ndarray::Array1;
use serde::Serialize;

use forecast_core::config::{MonetizationConfig, SaleConfig};
use forecast_core::types::VariantMetrics;

use crate::dau::DauSeries;

/// Per-day revenue series for one variant run. All five series share
/// the same day index (index i holds day i+1). Serializes each series
/// as a plain JSON array.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueBreakdown {
    #[serde(serialize_with = "serialize_series")]
    pub dau: DauSeries,
    #[serde(serialize_with = "serialize_series")]
    pub daily_total: Array1<f64>,
    #[serde(serialize_with = "serialize_series")]
    pub cumulative_total: Array1<f64>,
    #[serde(serialize_with = "serialize_series")]
    pub daily_iap: Array1<f64>,
    #[serde(serialize_with = "serialize_series")]
    pub daily_ad: Array1<f64>,
}

fn serialize_series<S>(series: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(series.iter())
}

impl RevenueBreakdown {
    pub fn total_revenue(&self) -> f64 {
        self.cumulative_total.last().copied().unwrap_or(0.0)
    }
}

/// Compose daily IAP and ad revenue from a DAU series.
///
/// When the sale overlay is on, the purchase ratio gains `sale.boost`
/// on every day in the half-open window
/// `[sale.start_day, sale.start_day + sale.duration)`.
pub fn compose(
    metrics: &VariantMetrics,
    dau: DauSeries,
    sale: &SaleConfig,
    monetization: &MonetizationConfig,
    include_sale: bool,
) -> RevenueBreakdown {
    let horizon = dau.len();
    let mut daily_iap = Vec::with_capacity(horizon);
    let mut daily_ad = Vec::with_capacity(horizon);

    for (i, &users) in dau.iter().enumerate() {
        let day = i as u32 + 1;

        let mut purchase_ratio = metrics.purchase_ratio;
        if include_sale && day >= sale.start_day && day < sale.start_day + sale.duration {
            purchase_ratio += sale.boost;
        }

        daily_iap.push(users * purchase_ratio * monetization.avg_iap_value);
        daily_ad.push(users * (metrics.ecpm / 1000.0) * metrics.impressions_per_user);
    }

    let daily_total: Vec<f64> = daily_iap
        .iter()
        .zip(&daily_ad)
        .map(|(iap, ad)| iap + ad)
        .collect();

    let mut running = 0.0;
    let cumulative_total: Vec<f64> = daily_total
        .iter()
        .map(|&total| {
            running += total;
            running
        })
        .collect();

    RevenueBreakdown {
        dau,
        daily_total: Array1::from(daily_total),
        cumulative_total: Array1::from(cumulative_total),
        daily_iap: Array1::from(daily_iap),
        daily_ad: Array1::from(daily_ad),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::config::AppConfig;
    use ndarray::Array1;

    fn flat_dau(days: usize, users: f64) -> DauSeries {
        Array1::from_elem(days, users)
    }

    #[test]
    fn test_sale_window_is_half_open() {
        let config = AppConfig::default();
        let metrics = &config.variants.a;
        let breakdown = compose(
            metrics,
            flat_dau(30, 1000.0),
            &config.sale,
            &config.monetization,
            true,
        );

        let base_iap = 1000.0 * metrics.purchase_ratio * config.monetization.avg_iap_value;
        let boosted_iap =
            1000.0 * (metrics.purchase_ratio + config.sale.boost) * config.monetization.avg_iap_value;

        // Days 15..=24 boosted, everything else at the base ratio.
        for day in 1..=30u32 {
            let got = breakdown.daily_iap[(day - 1) as usize];
            let expected = if (15..25).contains(&day) {
                boosted_iap
            } else {
                base_iap
            };
            assert!((got - expected).abs() < 1e-9, "day {}: {}", day, got);
        }
    }

    #[test]
    fn test_sale_ignored_when_disabled() {
        let config = AppConfig::default();
        let with_sale = compose(
            &config.variants.a,
            flat_dau(30, 1000.0),
            &config.sale,
            &config.monetization,
            false,
        );
        let base_iap =
            1000.0 * config.variants.a.purchase_ratio * config.monetization.avg_iap_value;
        assert!(with_sale.daily_iap.iter().all(|&v| (v - base_iap).abs() < 1e-9));
    }

    #[test]
    fn test_ad_revenue_formula() {
        let config = AppConfig::default();
        let metrics = &config.variants.b;
        let breakdown = compose(
            metrics,
            flat_dau(5, 2500.0),
            &config.sale,
            &config.monetization,
            false,
        );
        let expected = 2500.0 * (metrics.ecpm / 1000.0) * metrics.impressions_per_user;
        for &ad in breakdown.daily_ad.iter() {
            assert!((ad - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cumulative_is_prefix_sum() {
        let config = AppConfig::default();
        let dau = Array1::from(vec![100.0, 250.0, 75.0, 0.0, 310.0]);
        let breakdown = compose(
            &config.variants.a,
            dau,
            &config.sale,
            &config.monetization,
            true,
        );

        let mut sum = 0.0;
        for i in 0..5 {
            sum += breakdown.daily_total[i];
            assert!((breakdown.cumulative_total[i] - sum).abs() < 1e-9);
        }
        assert!((breakdown.total_revenue() - sum).abs() < 1e-9);
    }

    #[test]
    fn test_daily_total_is_iap_plus_ad() {
        let config = AppConfig::default();
        let breakdown = compose(
            &config.variants.b,
            flat_dau(10, 1234.5),
            &config.sale,
            &config.monetization,
            true,
        );
        for i in 0..10 {
            let expected = breakdown.daily_iap[i] + breakdown.daily_ad[i];
            assert!((breakdown.daily_total[i] - expected).abs() < 1e-12);
        }
    }
}
