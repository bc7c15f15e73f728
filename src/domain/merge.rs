//! Incremental extension of a stored analysis series.
//!
//! The merged output must equal a full recomputation over the combined raw
//! rows, while every index before the first changed raw row reuses the prior
//! series' values untouched. Quantile bands make this possible because a band
//! at index `i` reads only `spread_ratio[0..=i]`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::analysis::AnalysisSeries;
use super::error::PairswitchError;
use super::quantile;
use super::record::{self, DailyRecord};
use super::spread;

/// Splice newly available raw rows onto a previously computed series.
///
/// Rules:
/// - no new rows: the prior series is returned unchanged;
/// - a new row whose date already exists replaces the stored row
///   (last-write-wins), and derivation restarts from that index;
/// - rows strictly after the stored range are appended and only the suffix is
///   computed, with window lookback reading the stored prefix.
pub fn extend(
    prior: &AnalysisSeries,
    new_rows: Vec<DailyRecord>,
) -> Result<AnalysisSeries, PairswitchError> {
    if new_rows.is_empty() {
        return Ok(prior.clone());
    }

    let mut by_date: BTreeMap<NaiveDate, DailyRecord> = prior
        .records
        .iter()
        .map(|r| (r.date, r.clone()))
        .collect();
    for row in new_rows {
        by_date.insert(row.date, row);
    }
    let combined: Vec<DailyRecord> = by_date.into_values().collect();
    record::validate_series(&combined)?;

    // Longest leading run still identical to the stored series; everything
    // from here on is recomputed.
    let stable = prior
        .records
        .iter()
        .zip(&combined)
        .take_while(|(old, new)| old == new)
        .count();

    let seed = if stable == 0 {
        0.0
    } else {
        prior.derived[stable - 1].filled_dividend
    };
    let new_derived = spread::derive_from(&combined[stable..], seed);

    let mut derived = prior.derived[..stable].to_vec();
    derived.extend(new_derived);

    let ratios: Vec<f64> = derived.iter().map(|d| d.spread_ratio).collect();
    let bands = prior
        .bands
        .iter()
        .map(|(&window, series)| {
            let mut merged = series[..stable].to_vec();
            merged.extend(quantile::extend_bands(&ratios, window, stable));
            (window, merged)
        })
        .collect();

    Ok(AnalysisSeries {
        records: combined,
        derived,
        bands,
    })
}
