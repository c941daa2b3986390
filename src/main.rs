#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod error;
mod fmt;
mod forecast;
mod normalizer;
mod prelude;
mod production;
mod render;
mod sensor;
mod source;
mod statistics;
mod tables;

use std::fs;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, ForecastArgs, StatsArgs},
    error::AnalyticsError,
    fmt::FormattedPercentage,
    forecast::{Forecast, Horizon},
    normalizer::normalize,
    prelude::*,
    source::{load_production_records, load_sensor_documents},
    statistics::ProductionStats,
    tables::{
        build_distribution_table,
        build_forecast_table,
        build_monthly_table,
        build_summary_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Forecast(args) => forecast(&args)?,
        Command::Stats(args) => stats(&args)?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all)]
fn forecast(args: &ForecastArgs) -> Result {
    let horizon = Horizon::try_from(args.hours).map_err(report)?;
    let documents = load_sensor_documents(&args.readings, args.reading_limit)?;
    let series = normalize(&documents).map_err(report)?;
    let forecast = Forecast::builder()
        .series(&series)
        .horizon(horizon)
        .with_chart(args.chart.is_some())
        .build()
        .map_err(report)?;

    if let (Some(path), Some(chart)) = (&args.chart, &forecast.chart) {
        fs::write(path, chart.as_slice())
            .with_context(|| format!("failed to write the chart to `{}`", path.display()))?;
        info!(path = %path.display(), "saved the chart");
    }

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        println!("{}", build_forecast_table(&forecast));
    }
    Ok(())
}

#[instrument(skip_all)]
fn stats(args: &StatsArgs) -> Result {
    let records = load_production_records(&args.records, &args.filter())?;
    let stats = ProductionStats::from_records(&records);
    info!(premium = ?FormattedPercentage(stats.premium_ratio), "premium share");

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", build_summary_table(&stats));
        println!("{}", build_monthly_table(&stats));
        println!("{}", build_distribution_table(&stats));
    }
    Ok(())
}

/// Keep the condition name on top of the error chain.
fn report(error: AnalyticsError) -> Error {
    let kind = error.kind();
    Error::new(error).context(kind)
}
