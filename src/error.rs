use crate::forecast::Horizon;

/// Typed outcome of the analytic pipelines.
///
/// The host maps these onto its own error representation, so they never carry
/// `anyhow` context of their own.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalyticsError {
    /// No usable input after filtering and cleaning.
    #[display("no usable data after cleaning")]
    DataUnavailable,

    /// An expected field is absent from every source document.
    #[display("field `{column}` is missing from the source documents")]
    MissingColumns { column: &'static str },

    #[display("horizon must be within 1..={max} hours, got {requested}")]
    InvalidHorizon { requested: i64, max: u32 },

    /// The chart was requested but could not be drawn or encoded.
    #[display("failed to render the chart: {message}")]
    Render { message: String },
}

impl AnalyticsError {
    pub const fn invalid_horizon(requested: i64) -> Self {
        Self::InvalidHorizon { requested, max: Horizon::MAX }
    }

    /// Short machine-readable name of the condition.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataUnavailable => "DataUnavailable",
            Self::MissingColumns { .. } => "MissingColumns",
            Self::InvalidHorizon { .. } => "InvalidHorizon",
            Self::Render { .. } => "Render",
        }
    }
}
