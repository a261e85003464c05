use serde::Deserialize;

use crate::error::{ForecastError, ForecastResult};
use crate::types::{Checkpoint, Variant, VariantMetrics};

/// Root application configuration. Loaded from environment variables
/// with the prefix `AB_FORECAST__` and an optional `ab-forecast` TOML
/// config file; every field has the documented default.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub sale: SaleConfig,
    #[serde(default)]
    pub new_source: NewSourceConfig,
    #[serde(default)]
    pub monetization: MonetizationConfig,
    #[serde(default)]
    pub variants: VariantTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Constant install volume of the primary acquisition source.
    #[serde(default = "default_daily_installs")]
    pub daily_installs: f64,
    /// Simulation horizon in days.
    #[serde(default = "default_simulation_days")]
    pub simulation_days: u32,
}

/// Pricing sale overlay: an additive purchase-ratio boost over a
/// half-open window of days.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleConfig {
    #[serde(default = "default_sale_start_day")]
    pub start_day: u32,
    #[serde(default = "default_sale_duration")]
    pub duration: u32,
    #[serde(default = "default_sale_boost")]
    pub boost: f64,
}

/// Secondary acquisition channel overlay. From `start_day` onward the
/// primary source drops to `original_source_installs` per day and the
/// new channel adds `new_source_installs` per day on top.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSourceConfig {
    #[serde(default = "default_new_source_start_day")]
    pub start_day: u32,
    #[serde(default = "default_original_source_installs")]
    pub original_source_installs: f64,
    #[serde(default = "default_new_source_installs")]
    pub new_source_installs: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonetizationConfig {
    /// Assumed revenue per purchase.
    #[serde(default = "default_avg_iap_value")]
    pub avg_iap_value: f64,
}

/// Per-variant metric tables for the two variants under test.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantTable {
    #[serde(default = "default_variant_a")]
    pub a: VariantMetrics,
    #[serde(default = "default_variant_b")]
    pub b: VariantMetrics,
}

impl VariantTable {
    /// Total lookup: every `Variant` has a metrics record.
    pub fn metrics_for(&self, variant: Variant) -> &VariantMetrics {
        match variant {
            Variant::A => &self.a,
            Variant::B => &self.b,
        }
    }
}

// Default functions
fn default_daily_installs() -> f64 {
    20_000.0
}
fn default_simulation_days() -> u32 {
    30
}
fn default_sale_start_day() -> u32 {
    15
}
fn default_sale_duration() -> u32 {
    10
}
fn default_sale_boost() -> f64 {
    0.01
}
fn default_new_source_start_day() -> u32 {
    20
}
fn default_original_source_installs() -> f64 {
    12_000.0
}
fn default_new_source_installs() -> f64 {
    8_000.0
}
fn default_avg_iap_value() -> f64 {
    1.0
}
fn default_variant_a() -> VariantMetrics {
    VariantMetrics {
        purchase_ratio: 0.0305,
        ecpm: 9.80,
        impressions_per_user: 2.3,
        retention: vec![
            Checkpoint::new(1, 0.53),
            Checkpoint::new(3, 0.27),
            Checkpoint::new(7, 0.17),
            Checkpoint::new(14, 0.06),
        ],
    }
}
fn default_variant_b() -> VariantMetrics {
    VariantMetrics {
        purchase_ratio: 0.0315,
        ecpm: 10.80,
        impressions_per_user: 1.6,
        retention: vec![
            Checkpoint::new(1, 0.48),
            Checkpoint::new(3, 0.25),
            Checkpoint::new(7, 0.19),
            Checkpoint::new(14, 0.09),
        ],
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            daily_installs: default_daily_installs(),
            simulation_days: default_simulation_days(),
        }
    }
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            start_day: default_sale_start_day(),
            duration: default_sale_duration(),
            boost: default_sale_boost(),
        }
    }
}

impl Default for NewSourceConfig {
    fn default() -> Self {
        Self {
            start_day: default_new_source_start_day(),
            original_source_installs: default_original_source_installs(),
            new_source_installs: default_new_source_installs(),
        }
    }
}

impl Default for MonetizationConfig {
    fn default() -> Self {
        Self {
            avg_iap_value: default_avg_iap_value(),
        }
    }
}

impl Default for VariantTable {
    fn default() -> Self {
        Self {
            a: default_variant_a(),
            b: default_variant_b(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            sale: SaleConfig::default(),
            new_source: NewSourceConfig::default(),
            monetization: MonetizationConfig::default(),
            variants: VariantTable::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional
    /// `ab-forecast.toml` in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("ab-forecast").required(false))
            .add_source(
                config::Environment::with_prefix("AB_FORECAST")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject ill-formed monetization or scenario constants before any
    /// simulation starts. Retention checkpoints are validated separately
    /// at curve-build time, where the errors are more specific.
    pub fn validate(&self) -> ForecastResult<()> {
        if self.simulation.simulation_days == 0 {
            return Err(ForecastError::Config(
                "simulation_days must be at least 1".to_string(),
            ));
        }
        if !self.simulation.daily_installs.is_finite() || self.simulation.daily_installs < 0.0 {
            return Err(ForecastError::Config(format!(
                "daily_installs must be a non-negative finite number, got {}",
                self.simulation.daily_installs
            )));
        }
        if !self.new_source.original_source_installs.is_finite()
            || self.new_source.original_source_installs < 0.0
            || !self.new_source.new_source_installs.is_finite()
            || self.new_source.new_source_installs < 0.0
        {
            return Err(ForecastError::Config(
                "new-source install volumes must be non-negative finite numbers".to_string(),
            ));
        }
        if !self.sale.boost.is_finite() || self.sale.boost < 0.0 {
            return Err(ForecastError::Config(format!(
                "sale boost must be a non-negative finite number, got {}",
                self.sale.boost
            )));
        }
        if !self.monetization.avg_iap_value.is_finite() || self.monetization.avg_iap_value < 0.0 {
            return Err(ForecastError::Config(format!(
                "avg_iap_value must be a non-negative finite number, got {}",
                self.monetization.avg_iap_value
            )));
        }
        for variant in Variant::ALL {
            let metrics = self.variants.metrics_for(variant);
            if !(0.0..=1.0).contains(&metrics.purchase_ratio) {
                return Err(ForecastError::Config(format!(
                    "variant {} purchase_ratio {} is outside [0, 1]",
                    variant, metrics.purchase_ratio
                )));
            }
            if !metrics.ecpm.is_finite() || metrics.ecpm < 0.0 {
                return Err(ForecastError::Config(format!(
                    "variant {} ecpm {} must be a non-negative finite number",
                    variant, metrics.ecpm
                )));
            }
            if !metrics.impressions_per_user.is_finite() || metrics.impressions_per_user < 0.0 {
                return Err(ForecastError::Config(format!(
                    "variant {} impressions_per_user {} must be a non-negative finite number",
                    variant, metrics.impressions_per_user
                )));
            }
        }
        Ok(())
    }
}
