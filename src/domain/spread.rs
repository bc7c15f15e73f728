//! Spread metrics derived from raw daily rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::DailyRecord;

/// Per-day metrics computed from a [`DailyRecord`]. Never mutated once built.
///
/// `filled_dividend` carries the most recent non-zero dividend forward and is
/// used only for the yield column; cash accrual in the simulators always reads
/// the raw amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub date: NaiveDate,
    pub spread: f64,
    pub spread_ratio: f64,
    pub filled_dividend: f64,
    pub dividend_yield: f64,
}

/// Percentage ratio of `numerator` to `denominator`, zero when the denominator
/// is zero. The zero case is a documented convention, not an error.
fn pct_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator * 100.0 / denominator
    }
}

/// Derive one [`DerivedRecord`] per input row, in order.
///
/// Pure per-row arithmetic except for the dividend forward-fill, whose state
/// (`last seen non-zero dividend`, initially zero) is threaded through the
/// sequential pass. Use [`derive_from`] to resume the fill across a series
/// boundary.
pub fn derive(records: &[DailyRecord]) -> Vec<DerivedRecord> {
    derive_from(records, 0.0)
}

/// Same as [`derive`], seeding the forward-fill with the last non-zero
/// dividend seen before `records` begins.
pub fn derive_from(records: &[DailyRecord], last_dividend: f64) -> Vec<DerivedRecord> {
    let mut filled = last_dividend;
    records
        .iter()
        .map(|record| {
            if record.raw_dividend != 0.0 {
                filled = record.raw_dividend;
            }
            let spread = record.primary_close - record.secondary_close;
            DerivedRecord {
                date: record.date,
                spread,
                spread_ratio: pct_ratio(spread, record.secondary_close),
                filled_dividend: filled,
                dividend_yield: pct_ratio(filled, record.secondary_close),
            }
        })
        .collect()
}
