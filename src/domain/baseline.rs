//! Buy-and-hold comparison run.

use super::analysis::AnalysisSeries;
use super::error::PairswitchError;
use super::ledger::LedgerEntry;
use super::position::{PortfolioSnapshot, Position};
use super::simulation::accrue_dividend;
use super::strategy::{BaselineConfig, BaselineSizing};

/// Output of the fixed-holding run: daily values and the dividend events that
/// accumulated along the way. No switches ever happen here.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineResult {
    pub snapshots: Vec<PortfolioSnapshot>,
    pub dividend_events: Vec<LedgerEntry>,
    pub position: Position,
    pub initial_value: f64,
}

/// Value the configured fixed holding over the whole series, accruing
/// dividends to cash under the same rule as the switching strategy.
pub fn run_baseline(
    series: &AnalysisSeries,
    config: &BaselineConfig,
) -> Result<BaselineResult, PairswitchError> {
    if series.is_empty() {
        return Err(PairswitchError::EmptyInput);
    }

    let first_open = series.records[0].open(config.instrument);
    let shares = match config.sizing {
        BaselineSizing::Shares(shares) => shares,
        BaselineSizing::Notional(notional) => {
            if first_open <= 0.0 {
                return Err(PairswitchError::ConfigInvalid {
                    section: "baseline".to_string(),
                    key: "notional".to_string(),
                    reason: format!(
                        "cannot size a notional of {notional} at a first-day open of {first_open}"
                    ),
                });
            }
            notional / first_open
        }
    };

    let mut position = Position::new(config.instrument, shares);
    let initial_value = shares * first_open;
    let mut dividend_events: Vec<LedgerEntry> = Vec::new();
    let mut snapshots: Vec<PortfolioSnapshot> = Vec::with_capacity(series.len());

    for record in &series.records {
        accrue_dividend(&mut position, record, &mut dividend_events);
        snapshots.push(PortfolioSnapshot {
            date: record.date,
            value: position.market_value(record),
        });
    }

    Ok(BaselineResult {
        snapshots,
        dividend_events,
        position,
        initial_value,
    })
}
