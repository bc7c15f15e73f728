#![allow(dead_code)]

use chrono::NaiveDate;
use pairswitch::domain::error::PairswitchError;
pub use pairswitch::domain::record::DailyRecord;
use pairswitch::ports::data_port::DataPort;

/// In-memory data port for pipeline tests: holds one merged pair series and
/// serves range queries from it.
pub struct MockDataPort {
    pub records: Vec<DailyRecord>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            records: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn fetch_pair(
        &self,
        _primary: &str,
        _secondary: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyRecord>, PairswitchError> {
        if let Some(reason) = &self.error {
            return Err(PairswitchError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.date >= start_date && r.date <= end_date)
            .cloned()
            .collect())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A record with all four prices and the dividend spelled out.
pub fn make_record(
    date: NaiveDate,
    primary_open: f64,
    primary_close: f64,
    secondary_open: f64,
    secondary_close: f64,
    raw_dividend: f64,
) -> DailyRecord {
    DailyRecord {
        date,
        primary_open,
        primary_close,
        secondary_open,
        secondary_close,
        raw_dividend,
    }
}

/// A quiet record: both legs flat, no dividend. Day offsets count from
/// 2024-01-01.
pub fn flat_record(day_offset: u64, primary_close: f64, secondary_close: f64) -> DailyRecord {
    let base = date(2024, 1, 1);
    make_record(
        base + chrono::Days::new(day_offset),
        primary_close,
        primary_close,
        secondary_close,
        secondary_close,
        0.0,
    )
}
