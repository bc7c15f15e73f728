//! The switching simulation: one sequential fold over the analysis series.
//!
//! Each day `i > 0` is decided from day `i-1`'s spread ratio and quantile band
//! (never day `i`'s own, which would look ahead) and executed at day `i`'s
//! opening prices.
//! Day 0 takes the configured initial position as-is.

use super::analysis::AnalysisSeries;
use super::error::PairswitchError;
use super::ledger::{LedgerEntry, LedgerKind};
use super::position::{PortfolioSnapshot, Position};
use super::record::DailyRecord;
use super::strategy::{Instrument, StrategyConfig};

/// Everything one simulation run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub ledger: Vec<LedgerEntry>,
    pub snapshots: Vec<PortfolioSnapshot>,
    /// Position after the last simulated day.
    pub position: Position,
    /// Open-based value of the initial holding on day 0, the base for return
    /// computation.
    pub initial_value: f64,
}

/// Run the threshold-switching strategy over `series`.
pub fn run_strategy(
    series: &AnalysisSeries,
    config: &StrategyConfig,
) -> Result<SimulationResult, PairswitchError> {
    if series.is_empty() {
        return Err(PairswitchError::EmptyInput);
    }
    let bands = series
        .bands
        .get(&config.window)
        .ok_or_else(|| PairswitchError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "window".to_string(),
            reason: format!(
                "window {} has no quantile series in the analysis",
                config.window
            ),
        })?;

    let mut position = Position::new(config.initial_holding, config.initial_shares);
    let mut ledger: Vec<LedgerEntry> = Vec::new();
    let mut snapshots: Vec<PortfolioSnapshot> = Vec::with_capacity(series.len());

    let first = &series.records[0];
    let initial_value = config.initial_shares * first.open(config.initial_holding);
    ledger.push(LedgerEntry {
        date: first.date,
        kind: LedgerKind::Initial {
            instrument: position.held,
            shares: position.shares,
        },
        cash_after: position.cash,
    });

    for (i, record) in series.records.iter().enumerate() {
        if i > 0 {
            let ratio = series.derived[i - 1].spread_ratio;
            let band = bands[i - 1];
            if let Some(target) = config.direction.target(ratio, band) {
                // a zero open cannot be traded at
                if target != position.held && record.open(target) > 0.0 {
                    execute_switch(&mut position, record, target, &mut ledger);
                }
            }
        }

        accrue_dividend(&mut position, record, &mut ledger);

        snapshots.push(PortfolioSnapshot {
            date: record.date,
            value: position.market_value(record),
        });
    }

    Ok(SimulationResult {
        ledger,
        snapshots,
        position,
        initial_value,
    })
}

/// Sell the whole current holding and put all cash into `target`, both at
/// today's opens. The fractional remainder of the buy stays in cash.
fn execute_switch(
    position: &mut Position,
    record: &DailyRecord,
    target: Instrument,
    ledger: &mut Vec<LedgerEntry>,
) {
    let sell_price = record.open(position.held);
    let buy_price = record.open(target);

    let shares_sold = position.shares;
    position.cash += shares_sold * sell_price;

    let shares_bought = position.cash / buy_price;
    position.cash -= shares_bought * buy_price;

    ledger.push(LedgerEntry {
        date: record.date,
        kind: LedgerKind::Switch {
            from: position.held,
            to: target,
            shares_sold,
            sell_price,
            shares_bought,
            buy_price,
        },
        cash_after: position.cash,
    });

    position.held = target;
    position.shares = shares_bought;
}

/// Credit the day's dividend to cash. Dividends are never reinvested here;
/// the cash only converts back to shares on the next switch.
pub(crate) fn accrue_dividend(
    position: &mut Position,
    record: &DailyRecord,
    ledger: &mut Vec<LedgerEntry>,
) {
    if record.raw_dividend > 0.0 {
        let total = position.shares * record.raw_dividend;
        position.cash += total;
        ledger.push(LedgerEntry {
            date: record.date,
            kind: LedgerKind::DividendAccrual {
                per_share: record.raw_dividend,
                shares: position.shares,
                total,
            },
            cash_after: position.cash,
        });
    }
}
