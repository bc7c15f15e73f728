//! Position state and daily valuation snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::DailyRecord;
use super::strategy::Instrument;

/// The single position a simulation run owns: all-in on one leg of the pair,
/// plus whatever cash has accumulated from dividends and switch remainders.
/// Mutated only by its simulation loop, once per day, in date order.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub held: Instrument,
    pub shares: f64,
    pub cash: f64,
}

impl Position {
    pub fn new(held: Instrument, shares: f64) -> Self {
        Position {
            held,
            shares,
            cash: 0.0,
        }
    }

    /// Close-based value of the position on `record`'s day.
    pub fn market_value(&self, record: &DailyRecord) -> f64 {
        self.shares * record.close(self.held) + self.cash
    }
}

/// End-of-day portfolio value, one per simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub value: f64,
}
