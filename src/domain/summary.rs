//! Per-run summary statistics and the multi-window sweep.

use super::analysis::AnalysisSeries;
use super::baseline::BaselineResult;
use super::error::PairswitchError;
use super::ledger::LedgerKind;
use super::simulation::{self, SimulationResult};
use super::strategy::{Direction, Instrument, StrategyConfig};

/// Headline figures for one switching run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub window: usize,
    pub direction: Direction,
    pub initial_value: f64,
    /// Final share value plus cash.
    pub final_value: f64,
    /// Final share value only; the base of `return_ex_dividends_pct`.
    pub final_share_value: f64,
    pub final_shares: f64,
    pub final_holding: Instrument,
    pub final_cash: f64,
    /// Share-value return over the initial value, dividends excluded.
    pub return_ex_dividends_pct: f64,
    pub switches_to_primary: usize,
    pub switches_to_secondary: usize,
    pub dividend_events: usize,
    pub total_dividends: f64,
    /// Days between the first and last switch, averaged over switch count.
    /// `None` with fewer than two switches.
    pub avg_days_between_switches: Option<f64>,
}

impl RunSummary {
    pub fn compute(
        result: &SimulationResult,
        series: &AnalysisSeries,
        window: usize,
        direction: Direction,
    ) -> Self {
        let final_share_value = series
            .records
            .last()
            .map(|last| result.position.shares * last.close(result.position.held))
            .unwrap_or(0.0);
        let final_value = final_share_value + result.position.cash;
        let return_ex_dividends_pct = if result.initial_value != 0.0 {
            (final_share_value - result.initial_value) / result.initial_value * 100.0
        } else {
            0.0
        };

        let mut switches_to_primary = 0;
        let mut switches_to_secondary = 0;
        let mut dividend_events = 0;
        let mut total_dividends = 0.0;
        let mut first_switch = None;
        let mut last_switch = None;
        let mut switch_count = 0usize;

        for entry in &result.ledger {
            match &entry.kind {
                LedgerKind::Switch { to, .. } => {
                    match to {
                        Instrument::Primary => switches_to_primary += 1,
                        Instrument::Secondary => switches_to_secondary += 1,
                    }
                    first_switch.get_or_insert(entry.date);
                    last_switch = Some(entry.date);
                    switch_count += 1;
                }
                LedgerKind::DividendAccrual { total, .. } => {
                    dividend_events += 1;
                    total_dividends += total;
                }
                LedgerKind::Initial { .. } => {}
            }
        }

        let avg_days_between_switches = match (first_switch, last_switch) {
            (Some(first), Some(last)) if switch_count > 1 => {
                Some((last - first).num_days() as f64 / switch_count as f64)
            }
            _ => None,
        };

        RunSummary {
            window,
            direction,
            initial_value: result.initial_value,
            final_value,
            final_share_value,
            final_shares: result.position.shares,
            final_holding: result.position.held,
            final_cash: result.position.cash,
            return_ex_dividends_pct,
            switches_to_primary,
            switches_to_secondary,
            dividend_events,
            total_dividends,
            avg_days_between_switches,
        }
    }
}

/// Headline figures for the buy-and-hold run.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineSummary {
    pub instrument: Instrument,
    pub initial_value: f64,
    pub final_value: f64,
    pub final_share_value: f64,
    pub return_ex_dividends_pct: f64,
    pub dividend_events: usize,
    pub total_dividends: f64,
}

impl BaselineSummary {
    pub fn compute(result: &BaselineResult, series: &AnalysisSeries) -> Self {
        let final_share_value = series
            .records
            .last()
            .map(|last| result.position.shares * last.close(result.position.held))
            .unwrap_or(0.0);
        BaselineSummary {
            instrument: result.position.held,
            initial_value: result.initial_value,
            final_value: final_share_value + result.position.cash,
            final_share_value,
            return_ex_dividends_pct: if result.initial_value != 0.0 {
                (final_share_value - result.initial_value) / result.initial_value * 100.0
            } else {
                0.0
            },
            dividend_events: result.dividend_events.len(),
            total_dividends: result.position.cash,
        }
    }
}

/// One (window, direction) cell of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRun {
    pub window: usize,
    pub direction: Direction,
    pub result: SimulationResult,
    pub summary: RunSummary,
}

/// Run both directions over every window the analysis carries, against one
/// shared immutable series. Windows iterate in ascending order.
pub fn run_sweep(
    series: &AnalysisSeries,
    initial_holding: Instrument,
    initial_shares: f64,
) -> Result<Vec<SweepRun>, PairswitchError> {
    let mut runs = Vec::new();
    for window in series.windows() {
        for direction in [Direction::Basic, Direction::Reverse] {
            let config = StrategyConfig {
                window,
                direction,
                initial_holding,
                initial_shares,
            };
            let result = simulation::run_strategy(series, &config)?;
            let summary = RunSummary::compute(&result, series, window, direction);
            runs.push(SweepRun {
                window,
                direction,
                result,
                summary,
            });
        }
    }
    Ok(runs)
}
