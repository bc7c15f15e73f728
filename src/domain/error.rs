//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for pairswitch.
#[derive(Debug, thiserror::Error)]
pub enum PairswitchError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("snapshot store error: {reason}")]
    Store { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("input series is empty")]
    EmptyInput,

    #[error("dates not strictly increasing: {date} follows {previous}")]
    NonMonotonicDate {
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("invalid {field} on {date}: {value} (prices must be non-negative)")]
    InvalidPrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("negative dividend on {date}: {value}")]
    NegativeDividend { date: NaiveDate, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PairswitchError> for std::process::ExitCode {
    fn from(err: &PairswitchError) -> Self {
        let code: u8 = match err {
            PairswitchError::Io(_) => 1,
            PairswitchError::ConfigParse { .. }
            | PairswitchError::ConfigMissing { .. }
            | PairswitchError::ConfigInvalid { .. } => 2,
            PairswitchError::Data { .. }
            | PairswitchError::Store { .. }
            | PairswitchError::Report { .. } => 3,
            PairswitchError::EmptyInput
            | PairswitchError::NonMonotonicDate { .. }
            | PairswitchError::InvalidPrice { .. }
            | PairswitchError::NegativeDividend { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
