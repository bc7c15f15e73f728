//! Rolling quantile bands over the spread-ratio series.
//!
//! For each date index `i` the band is the 25th/75th percentile of the trailing
//! `window` ratios ending at `i`, falling back to all history so far while
//! fewer than `window` days exist. A band at index `i` depends only on
//! `ratios[0..=i]`, which is what makes incremental extension of a stored
//! series valid: appending rows never changes an already computed band.

use serde::{Deserialize, Serialize};

/// Window sizes the analysis runs by default: roughly 2, 3 and 5 years.
pub const DEFAULT_WINDOWS: [usize; 3] = [730, 1095, 1825];

/// Convert a year span to a row-count window.
///
/// The source data is one row per trading day, but the window is sized in
/// calendar days (365 per year), so "2 years" means the last 730 rows rather
/// than an actual 2-calendar-year span. Kept for compatibility with the
/// analysis this engine replays.
pub fn trading_window_for_years(years: usize) -> usize {
    years * 365
}

/// 25th/75th percentile pair for one date, index-aligned with the ratio series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileBand {
    pub q25: f64,
    pub q75: f64,
}

/// Percentile with linear interpolation between order statistics.
///
/// For `n` sorted values and percentile `p`, the rank is `(n-1) * p / 100`;
/// the result interpolates between the values at the floor and ceiling of that
/// rank. An empty input yields 0 by convention.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (sorted.len() - 1) as f64 * p / 100.0;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Compute the full band series for one window size.
pub fn rolling_bands(ratios: &[f64], window: usize) -> Vec<QuantileBand> {
    extend_bands(ratios, window, 0)
}

/// Compute bands for indices `start..ratios.len()` only.
///
/// `ratios` must be the complete series from index 0: the trailing window for
/// an index just past `start` reaches back into the prefix. This is the entry
/// point the incremental merge uses to grow a stored series without touching
/// the bands already computed for the prefix.
pub fn extend_bands(ratios: &[f64], window: usize, start: usize) -> Vec<QuantileBand> {
    (start..ratios.len())
        .map(|i| {
            let window_data = if i < window {
                &ratios[..=i]
            } else {
                &ratios[i - window + 1..=i]
            };
            QuantileBand {
                q25: percentile(window_data, 25.0),
                q75: percentile(window_data, 75.0),
            }
        })
        .collect()
}
