//! Append-only event ledger for a simulation run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::strategy::Instrument;

/// What happened on a ledger entry's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerKind {
    /// Day-0 position taken straight from configuration; no trade occurred.
    Initial { instrument: Instrument, shares: f64 },
    /// Full liquidation of one leg and full reinvestment into the other, both
    /// at that day's opening prices.
    Switch {
        from: Instrument,
        to: Instrument,
        shares_sold: f64,
        sell_price: f64,
        shares_bought: f64,
        buy_price: f64,
    },
    /// Per-share dividend credited to cash for the shares held that day.
    DividendAccrual {
        per_share: f64,
        shares: f64,
        total: f64,
    },
}

/// One ledger line. `cash_after` is the run's cash balance once the event has
/// settled, carried for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub kind: LedgerKind,
    pub cash_after: f64,
}

impl LedgerEntry {
    pub fn is_switch(&self) -> bool {
        matches!(self.kind, LedgerKind::Switch { .. })
    }

    pub fn is_dividend(&self) -> bool {
        matches!(self.kind, LedgerKind::DividendAccrual { .. })
    }
}
