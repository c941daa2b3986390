use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::{prelude::*, production::CacaoType, sensor::parse_timestamp, source::RecordFilter};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Forecast the sensor metric from its hourly history.
    #[clap(name = "forecast")]
    Forecast(ForecastArgs),

    /// Summarize the production records.
    #[clap(name = "stats")]
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct ForecastArgs {
    /// JSON array of sensor documents with `fecha` and `valor` fields.
    #[clap(long, env = "READINGS_PATH")]
    pub readings: PathBuf,

    /// Only the first documents are used.
    #[clap(long, default_value = "100", env = "READING_LIMIT")]
    pub reading_limit: usize,

    /// Hours to forecast, at most one week.
    #[clap(long, env = "FORECAST_HOURS", allow_negative_numbers = true)]
    pub hours: i64,

    /// Render the history and the forecast into this PNG file.
    #[clap(long, env = "CHART_PATH")]
    pub chart: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// JSON array of production records.
    #[clap(long, env = "RECORDS_PATH")]
    pub records: PathBuf,

    #[clap(long, env = "PARCEL")]
    pub parcel: Option<String>,

    #[clap(long, value_enum, env = "CACAO_TYPE")]
    pub cacao_type: Option<CacaoType>,

    /// Inclusive start date, for example `2024-01-01`.
    #[clap(long, value_parser = parse_date, env = "SINCE")]
    pub since: Option<DateTime<Utc>>,

    /// Inclusive end date.
    #[clap(long, value_parser = parse_date, env = "UNTIL")]
    pub until: Option<DateTime<Utc>>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

impl StatsArgs {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::builder()
            .maybe_parcel(self.parcel.clone())
            .maybe_cacao_type(self.cacao_type)
            .maybe_since(self.since)
            .maybe_until(self.until)
            .build()
    }
}

#[derive(Copy, Clone, Parser)]
pub struct OutputArgs {
    /// Print JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

fn parse_date(text: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(&Value::from(text)).with_context(|| format!("invalid date: `{text}`"))
}
