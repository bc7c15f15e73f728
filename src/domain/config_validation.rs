//! Configuration validation and typed extraction.
//!
//! Every field is checked up front; the first problem is reported as a single
//! `ConfigMissing`/`ConfigInvalid` error and nothing runs.

use chrono::NaiveDate;

use super::error::PairswitchError;
use super::quantile::{trading_window_for_years, DEFAULT_WINDOWS};
use super::strategy::{BaselineConfig, BaselineSizing, Instrument};
use crate::ports::config_port::ConfigPort;

/// `[data]`: where the raw pair series comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub path: String,
    pub primary: String,
    pub secondary: String,
    /// Optional dividend table merged over the pair series, file name under
    /// `path`.
    pub dividends: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// `[analysis]`: window sizes and the snapshot file for incremental reuse.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub windows: Vec<usize>,
    pub snapshot: String,
}

/// `[backtest]`: how the switching runs start.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSettings {
    pub start_date: Option<NaiveDate>,
    pub initial_holding: Instrument,
    pub initial_shares: f64,
}

/// `[report]`: where run artifacts go.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub output_dir: String,
}

pub fn parse_data_settings(config: &dyn ConfigPort) -> Result<DataSettings, PairswitchError> {
    Ok(DataSettings {
        path: require_string(config, "data", "path")?,
        primary: require_string(config, "data", "primary")?,
        secondary: require_string(config, "data", "secondary")?,
        dividends: config.get_string("data", "dividends").filter(|s| !s.trim().is_empty()),
        start_date: optional_date(config, "data", "start_date")?,
        end_date: optional_date(config, "data", "end_date")?,
    })
}

pub fn parse_analysis_settings(
    config: &dyn ConfigPort,
) -> Result<AnalysisSettings, PairswitchError> {
    // `windows` gives row counts directly; `years` is the shorthand the
    // window sizes are usually thought in
    let windows = match (
        config.get_string("analysis", "windows"),
        config.get_string("analysis", "years"),
    ) {
        (Some(raw), _) => parse_windows(&raw, "windows", |n| n)?,
        (None, Some(raw)) => parse_windows(&raw, "years", trading_window_for_years)?,
        (None, None) => DEFAULT_WINDOWS.to_vec(),
    };
    Ok(AnalysisSettings {
        windows,
        snapshot: require_string(config, "analysis", "snapshot")?,
    })
}

pub fn parse_backtest_settings(
    config: &dyn ConfigPort,
) -> Result<BacktestSettings, PairswitchError> {
    let initial_shares = config.get_double("backtest", "initial_shares", 0.0);
    if initial_shares <= 0.0 {
        return Err(PairswitchError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_shares".to_string(),
            reason: "initial_shares must be positive".to_string(),
        });
    }
    Ok(BacktestSettings {
        start_date: optional_date(config, "backtest", "start_date")?,
        initial_holding: parse_instrument(config, "backtest", "initial_holding")?,
        initial_shares,
    })
}

pub fn parse_baseline_config(config: &dyn ConfigPort) -> Result<BaselineConfig, PairswitchError> {
    let instrument = match config.get_string("baseline", "instrument") {
        None => Instrument::Primary,
        Some(_) => parse_instrument(config, "baseline", "instrument")?,
    };

    let shares = config.get_double("baseline", "shares", 0.0);
    let notional = config.get_double("baseline", "notional", 0.0);
    let sizing = if shares > 0.0 {
        BaselineSizing::Shares(shares)
    } else if notional > 0.0 {
        BaselineSizing::Notional(notional)
    } else {
        return Err(PairswitchError::ConfigMissing {
            section: "baseline".to_string(),
            key: "shares".to_string(),
        });
    };

    Ok(BaselineConfig { instrument, sizing })
}

pub fn parse_report_settings(config: &dyn ConfigPort) -> Result<ReportSettings, PairswitchError> {
    Ok(ReportSettings {
        output_dir: config
            .get_string("report", "output_dir")
            .unwrap_or_else(|| ".".to_string()),
    })
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, PairswitchError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(PairswitchError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn optional_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, PairswitchError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| PairswitchError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("invalid date {s:?}, expected YYYY-MM-DD"),
            }),
    }
}

fn parse_instrument(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Instrument, PairswitchError> {
    let value = require_string(config, section, key)?;
    match value.to_lowercase().as_str() {
        "primary" => Ok(Instrument::Primary),
        "secondary" => Ok(Instrument::Secondary),
        other => Err(PairswitchError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("unknown instrument {other:?}, expected primary or secondary"),
        }),
    }
}

fn parse_windows(
    raw: &str,
    key: &str,
    to_window: impl Fn(usize) -> usize,
) -> Result<Vec<usize>, PairswitchError> {
    let invalid = |reason: String| PairswitchError::ConfigInvalid {
        section: "analysis".to_string(),
        key: key.to_string(),
        reason,
    };

    let mut windows = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: usize = part
            .parse()
            .map_err(|_| invalid(format!("{part:?} is not a {key} entry")))?;
        if value == 0 {
            return Err(invalid(format!("{key} entries must be at least 1")));
        }
        windows.push(to_window(value));
    }
    if windows.is_empty() {
        return Err(invalid(format!("at least one {key} entry is required")));
    }
    windows.sort_unstable();
    windows.dedup();
    Ok(windows)
}
