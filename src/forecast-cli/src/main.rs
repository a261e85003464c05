//! ab-forecast — cohort-based DAU and revenue forecaster for A/B
//! variants.
//!
//! Thin collaborator around the forecasting engine: loads the
//! configuration, runs the requested variants under the chosen
//! scenario overlays, and prints a comparison report as text or JSON.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use forecast_core::config::AppConfig;
use forecast_core::types::Variant;
use forecast_engine::{ForecastEngine, RevenueBreakdown};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ab-forecast")]
#[command(about = "Cohort-based DAU and revenue forecaster for A/B product variants")]
#[command(version)]
struct Cli {
    /// Variant to simulate (A or B); both when omitted
    #[arg(long)]
    variant: Option<String>,

    /// Apply the pricing sale overlay
    #[arg(long, default_value_t = false)]
    include_sale: bool,

    /// Apply the secondary acquisition channel overlay
    #[arg(long, default_value_t = false)]
    include_new_source: bool,

    /// Simulation horizon in days (overrides config)
    #[arg(long, env = "AB_FORECAST__SIMULATION__SIMULATION_DAYS")]
    days: Option<u32>,

    /// Emit the full report as JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct ScenarioSummary {
    include_sale: bool,
    include_new_source: bool,
    horizon_days: u32,
}

#[derive(Serialize)]
struct VariantReport {
    variant: String,
    final_dau: f64,
    total_revenue: f64,
    total_iap_revenue: f64,
    total_ad_revenue: f64,
    breakdown: RevenueBreakdown,
}

#[derive(Serialize)]
struct ComparisonReport {
    generated_at: DateTime<Utc>,
    scenario: ScenarioSummary,
    variants: Vec<VariantReport>,
    /// Total-revenue lift of B over A in percent; present only when
    /// both variants were simulated.
    revenue_lift_b_vs_a_pct: Option<f64>,
}

fn variant_report(engine: &ForecastEngine, variant: Variant, cli: &Cli) -> anyhow::Result<VariantReport> {
    let breakdown = engine
        .simulate_revenue(variant, cli.include_sale, cli.include_new_source)
        .with_context(|| format!("simulating variant {}", variant))?;

    Ok(VariantReport {
        variant: variant.to_string(),
        final_dau: breakdown.dau.last().copied().unwrap_or(0.0),
        total_revenue: breakdown.total_revenue(),
        total_iap_revenue: breakdown.daily_iap.sum(),
        total_ad_revenue: breakdown.daily_ad.sum(),
        breakdown,
    })
}

fn print_text_report(report: &ComparisonReport) {
    let s = &report.scenario;
    println!(
        "Scenario: sale={}, new-source={}, horizon={} days",
        if s.include_sale { "on" } else { "off" },
        if s.include_new_source { "on" } else { "off" },
        s.horizon_days
    );
    println!();

    for v in &report.variants {
        println!(
            "Variant {}: final DAU {:.0}, total revenue ${:.2} (IAP ${:.2}, ads ${:.2})",
            v.variant, v.final_dau, v.total_revenue, v.total_iap_revenue, v.total_ad_revenue
        );
    }

    if let Some(lift) = report.revenue_lift_b_vs_a_pct {
        println!();
        println!("Variant B vs A total revenue lift: {:+.2}%", lift);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(days) = cli.days {
        config.simulation.simulation_days = days;
    }

    let variants: Vec<Variant> = match &cli.variant {
        Some(name) => vec![name.parse()?],
        None => Variant::ALL.to_vec(),
    };

    let engine = ForecastEngine::new(config)?;

    info!(
        ?variants,
        include_sale = cli.include_sale,
        include_new_source = cli.include_new_source,
        "Running forecast"
    );

    let reports = variants
        .iter()
        .map(|&variant| variant_report(&engine, variant, &cli))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let revenue_lift_b_vs_a_pct = match (
        reports.iter().find(|r| r.variant == "A"),
        reports.iter().find(|r| r.variant == "B"),
    ) {
        (Some(a), Some(b)) if a.total_revenue > 0.0 => {
            Some((b.total_revenue - a.total_revenue) / a.total_revenue * 100.0)
        }
        _ => None,
    };

    let report = ComparisonReport {
        generated_at: Utc::now(),
        scenario: ScenarioSummary {
            include_sale: cli.include_sale,
            include_new_source: cli.include_new_source,
            horizon_days: engine.config().simulation.simulation_days,
        },
        variants: reports,
        revenue_lift_b_vs_a_pct,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report);
    }

    Ok(())
}
