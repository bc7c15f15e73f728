//! Data access port trait.

use crate::domain::error::PairswitchError;
use crate::domain::record::DailyRecord;
use chrono::NaiveDate;

/// Source of the merged pair series: one row per trading day on which both
/// instruments traded, dividends already folded in.
pub trait DataPort {
    fn fetch_pair(
        &self,
        primary: &str,
        secondary: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyRecord>, PairswitchError>;
}
