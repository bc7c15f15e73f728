//! Raw daily price/dividend rows and input-contract validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::PairswitchError;
use super::strategy::Instrument;

/// One trading day of the instrument pair, as handed in by a data adapter.
///
/// `raw_dividend` is the per-share amount going ex on that date; zero means no
/// ex-dividend event. Days with no data for either instrument are simply absent
/// from the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub primary_open: f64,
    pub primary_close: f64,
    pub secondary_open: f64,
    pub secondary_close: f64,
    pub raw_dividend: f64,
}

impl DailyRecord {
    pub fn open(&self, instrument: Instrument) -> f64 {
        match instrument {
            Instrument::Primary => self.primary_open,
            Instrument::Secondary => self.secondary_open,
        }
    }

    pub fn close(&self, instrument: Instrument) -> f64 {
        match instrument {
            Instrument::Primary => self.primary_close,
            Instrument::Secondary => self.secondary_close,
        }
    }
}

/// Reject malformed input before any simulation runs.
///
/// Checks, in order: non-empty series, strictly increasing dates, non-negative
/// prices, non-negative dividends. The first violation is returned; nothing
/// downstream sees a partially validated series. A price of exactly zero is
/// tolerated and resolved by the zero-denominator convention in the metrics
/// derivation, not rejected here.
pub fn validate_series(records: &[DailyRecord]) -> Result<(), PairswitchError> {
    if records.is_empty() {
        return Err(PairswitchError::EmptyInput);
    }

    for pair in records.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(PairswitchError::NonMonotonicDate {
                previous: pair[0].date,
                date: pair[1].date,
            });
        }
    }

    for record in records {
        for (field, value) in [
            ("primary_open", record.primary_open),
            ("primary_close", record.primary_close),
            ("secondary_open", record.secondary_open),
            ("secondary_close", record.secondary_close),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(PairswitchError::InvalidPrice {
                    date: record.date,
                    field,
                    value,
                });
            }
        }
        if record.raw_dividend < 0.0 || !record.raw_dividend.is_finite() {
            return Err(PairswitchError::NegativeDividend {
                date: record.date,
                value: record.raw_dividend,
            });
        }
    }

    Ok(())
}
