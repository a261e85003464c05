//! Deterministic DAU and revenue forecasting for two product variants:
//! retention-curve reconstruction, cohort aggregation, and day-by-day
//! revenue composition under optional scenario overlays.

pub mod channel;
pub mod dau;
pub mod engine;
pub mod retention;
pub mod revenue;

pub use dau::DauSeries;
pub use engine::ForecastEngine;
pub use retention::RetentionCurve;
pub use revenue::RevenueBreakdown;
