//! Entry-point facade wiring the curve builder, cohort aggregator, and
//! revenue composer together over an immutable configuration.

use tracing::{debug, info};

use forecast_core::config::AppConfig;
use forecast_core::error::ForecastResult;
use forecast_core::types::Variant;

use crate::dau::{self, DauSeries};
use crate::retention::RetentionCurve;
use crate::revenue::{self, RevenueBreakdown};

/// Forecasting engine for the two-variant simulation. Holds the
/// configuration by value and never mutates it, so repeated calls with
/// the same inputs are bit-for-bit identical and independent engines
/// can run with differing configurations side by side.
pub struct ForecastEngine {
    config: AppConfig,
}

impl ForecastEngine {
    /// Validate `config` and build an engine around it.
    pub fn new(config: AppConfig) -> ForecastResult<Self> {
        config.validate()?;
        info!(
            horizon_days = config.simulation.simulation_days,
            daily_installs = config.simulation.daily_installs,
            "Forecast engine initialized"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Project daily active users for `variant` over the configured
    /// horizon.
    pub fn simulate_dau(
        &self,
        variant: Variant,
        include_new_source: bool,
    ) -> ForecastResult<DauSeries> {
        let metrics = self.config.variants.metrics_for(variant);
        let curve = RetentionCurve::build(
            &metrics.retention,
            self.config.simulation.simulation_days,
        )?;
        debug!(
            %variant,
            include_new_source,
            curve_max_day = curve.max_day(),
            "Simulating DAU"
        );
        Ok(dau::aggregate(variant, &curve, &self.config, include_new_source))
    }

    /// Project daily and cumulative revenue for `variant` under the
    /// requested scenario toggles. Fails before producing any series
    /// when the variant's retention table is unusable.
    pub fn simulate_revenue(
        &self,
        variant: Variant,
        include_sale: bool,
        include_new_source: bool,
    ) -> ForecastResult<RevenueBreakdown> {
        let dau = self.simulate_dau(variant, include_new_source)?;
        let metrics = self.config.variants.metrics_for(variant);
        Ok(revenue::compose(
            metrics,
            dau,
            &self.config.sale,
            &self.config.monetization,
            include_sale,
        ))
    }
}
