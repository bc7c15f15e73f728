//! Analysis snapshot persistence port trait.

use crate::domain::analysis::AnalysisSeries;
use crate::domain::error::PairswitchError;

/// Stores a computed [`AnalysisSeries`] so a later run can extend it
/// incrementally instead of recomputing from scratch.
pub trait StorePort {
    /// `Ok(None)` when no snapshot exists yet.
    fn load(&self, path: &str) -> Result<Option<AnalysisSeries>, PairswitchError>;

    fn save(&self, path: &str, series: &AnalysisSeries) -> Result<(), PairswitchError>;
}
