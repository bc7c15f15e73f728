//! CSV file data adapter.
//!
//! Reads one price file per instrument (`<code>.csv`: date,open,close) and an
//! optional dividend table (date,amount), joins them by date and emits the
//! merged pair series. Only dates on which both instruments traded survive the
//! join; dividend rows on other dates are dropped with the day they belong to.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::PairswitchError;
use crate::domain::record::DailyRecord;
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
    dividend_file: Option<String>,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf, dividend_file: Option<String>) -> Self {
        Self {
            base_path,
            dividend_file,
        }
    }

    fn read_prices(&self, code: &str) -> Result<BTreeMap<NaiveDate, (f64, f64)>, PairswitchError> {
        let path = self.base_path.join(format!("{code}.csv"));
        let content = fs::read_to_string(&path).map_err(|e| PairswitchError::Data {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut prices = BTreeMap::new();
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        for result in rdr.records() {
            let record = result.map_err(|e| PairswitchError::Data {
                reason: format!("CSV parse error in {}: {e}", path.display()),
            })?;
            let date = parse_date(field(&record, 0, "date", &path)?, &path)?;
            let open = parse_number(field(&record, 1, "open", &path)?, "open", &path)?;
            let close = parse_number(field(&record, 2, "close", &path)?, "close", &path)?;
            prices.insert(date, (open, close));
        }
        Ok(prices)
    }

    fn read_dividends(&self) -> Result<BTreeMap<NaiveDate, f64>, PairswitchError> {
        let Some(name) = &self.dividend_file else {
            return Ok(BTreeMap::new());
        };
        let path = self.base_path.join(name);
        let content = fs::read_to_string(&path).map_err(|e| PairswitchError::Data {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut dividends = BTreeMap::new();
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        for result in rdr.records() {
            let record = result.map_err(|e| PairswitchError::Data {
                reason: format!("CSV parse error in {}: {e}", path.display()),
            })?;
            let date = parse_date(field(&record, 0, "date", &path)?, &path)?;
            let amount = parse_number(field(&record, 1, "amount", &path)?, "amount", &path)?;
            // duplicate ex-dates keep the last row
            dividends.insert(date, amount);
        }
        Ok(dividends)
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_pair(
        &self,
        primary: &str,
        secondary: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyRecord>, PairswitchError> {
        let primary_prices = self.read_prices(primary)?;
        let secondary_prices = self.read_prices(secondary)?;
        let dividends = self.read_dividends()?;

        let records = primary_prices
            .iter()
            .filter(|(date, _)| **date >= start_date && **date <= end_date)
            .filter_map(|(date, &(primary_open, primary_close))| {
                let &(secondary_open, secondary_close) = secondary_prices.get(date)?;
                Some(DailyRecord {
                    date: *date,
                    primary_open,
                    primary_close,
                    secondary_open,
                    secondary_close,
                    raw_dividend: dividends.get(date).copied().unwrap_or(0.0),
                })
            })
            .collect();

        Ok(records)
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
    path: &PathBuf,
) -> Result<&'a str, PairswitchError> {
    record.get(index).ok_or_else(|| PairswitchError::Data {
        reason: format!("missing {name} column in {}", path.display()),
    })
}

fn parse_date(value: &str, path: &PathBuf) -> Result<NaiveDate, PairswitchError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| PairswitchError::Data {
        reason: format!("invalid date {value:?} in {}: {e}", path.display()),
    })
}

fn parse_number(value: &str, name: &str, path: &PathBuf) -> Result<f64, PairswitchError> {
    value.parse().map_err(|e| PairswitchError::Data {
        reason: format!("invalid {name} value {value:?} in {}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CsvDataAdapter) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join("COMMON.csv"),
            "date,open,close\n\
             2024-01-15,100.0,105.0\n\
             2024-01-16,106.0,108.0\n\
             2024-01-17,109.0,110.0\n",
        )
        .unwrap();
        fs::write(
            path.join("PREF.csv"),
            "date,open,close\n\
             2024-01-15,90.0,92.0\n\
             2024-01-16,93.0,95.0\n\
             2024-01-18,96.0,97.0\n",
        )
        .unwrap();
        fs::write(
            path.join("dividends.csv"),
            "date,amount\n\
             2024-01-16,3.61\n\
             2024-01-19,3.65\n",
        )
        .unwrap();

        let adapter = CsvDataAdapter::new(path, Some("dividends.csv".to_string()));
        (dir, adapter)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn join_keeps_shared_dates_only() {
        let (_dir, adapter) = setup();
        let records = adapter
            .fetch_pair("COMMON", "PREF", NaiveDate::MIN, NaiveDate::MAX)
            .unwrap();

        // the 17th has no PREF row and the 18th no COMMON row
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(15), date(16)]);

        assert_eq!(records[0].primary_open, 100.0);
        assert_eq!(records[0].secondary_close, 92.0);
    }

    #[test]
    fn dividends_merge_on_trading_days() {
        let (_dir, adapter) = setup();
        let records = adapter
            .fetch_pair("COMMON", "PREF", NaiveDate::MIN, NaiveDate::MAX)
            .unwrap();

        assert_eq!(records[0].raw_dividend, 0.0);
        assert_eq!(records[1].raw_dividend, 3.61);
        // the amount on the 19th falls on no trading day and is dropped
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn date_range_filters() {
        let (_dir, adapter) = setup();
        let records = adapter
            .fetch_pair("COMMON", "PREF", date(16), date(16))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(16));
    }

    #[test]
    fn missing_file_is_a_data_error() {
        let (_dir, adapter) = setup();
        let result = adapter.fetch_pair("MISSING", "PREF", NaiveDate::MIN, NaiveDate::MAX);
        assert!(matches!(result, Err(PairswitchError::Data { .. })));
    }

    #[test]
    fn malformed_price_is_a_data_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("A.csv"), "date,open,close\n2024-01-15,abc,105.0\n").unwrap();
        fs::write(path.join("B.csv"), "date,open,close\n2024-01-15,90.0,92.0\n").unwrap();

        let adapter = CsvDataAdapter::new(path, None);
        assert!(matches!(
            adapter.fetch_pair("A", "B", NaiveDate::MIN, NaiveDate::MAX),
            Err(PairswitchError::Data { .. })
        ));
    }

    #[test]
    fn no_dividend_file_means_zero_dividends() {
        let (dir, _) = setup();
        let adapter = CsvDataAdapter::new(dir.path().to_path_buf(), None);
        let records = adapter
            .fetch_pair("COMMON", "PREF", NaiveDate::MIN, NaiveDate::MAX)
            .unwrap();
        assert!(records.iter().all(|r| r.raw_dividend == 0.0));
    }
}
