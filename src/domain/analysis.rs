//! The analysis series: raw rows, derived metrics and quantile bands together.
//!
//! This is the persistable artifact of the pipeline. A stored series can be
//! reloaded and extended with newly available rows (see [`super::merge`]), and
//! any date suffix of it can be handed to the simulators without recomputation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::PairswitchError;
use super::quantile::{self, QuantileBand};
use super::record::{self, DailyRecord};
use super::spread::{self, DerivedRecord};

/// Raw rows plus everything computed from them, index-aligned throughout.
/// `bands` holds one series per configured window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSeries {
    pub records: Vec<DailyRecord>,
    pub derived: Vec<DerivedRecord>,
    pub bands: BTreeMap<usize, Vec<QuantileBand>>,
}

impl AnalysisSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn windows(&self) -> Vec<usize> {
        self.bands.keys().copied().collect()
    }

    /// The series from the first date `>= start` on, keeping the already
    /// computed metrics and bands. Bands remain those of the full history
    /// (they only ever look backwards), which is exactly what a backtest
    /// starting mid-series wants.
    pub fn slice_from(&self, start: NaiveDate) -> AnalysisSeries {
        let from = self.records.partition_point(|r| r.date < start);
        AnalysisSeries {
            records: self.records[from..].to_vec(),
            derived: self.derived[from..].to_vec(),
            bands: self
                .bands
                .iter()
                .map(|(&window, series)| (window, series[from..].to_vec()))
                .collect(),
        }
    }
}

/// Run the full pipeline over validated raw rows: derive spread metrics, then
/// compute one quantile-band series per window size.
pub fn analyze(
    records: Vec<DailyRecord>,
    windows: &[usize],
) -> Result<AnalysisSeries, PairswitchError> {
    record::validate_series(&records)?;

    let derived = spread::derive(&records);
    let ratios: Vec<f64> = derived.iter().map(|d| d.spread_ratio).collect();

    let bands = windows
        .iter()
        .map(|&window| (window, quantile::rolling_bands(&ratios, window)))
        .collect();

    Ok(AnalysisSeries {
        records,
        derived,
        bands,
    })
}
