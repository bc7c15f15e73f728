//! Report generation port trait.

use crate::domain::error::PairswitchError;
use crate::domain::summary::{BaselineSummary, SweepRun};

/// Port for writing backtest artifacts.
pub trait ReportPort {
    /// Write one run's trade ledger.
    fn write_run(&self, run: &SweepRun, output_dir: &str) -> Result<(), PairswitchError>;

    /// Write the cross-run comparison against the baseline.
    fn write_comparison(
        &self,
        runs: &[SweepRun],
        baseline: &BaselineSummary,
        output_dir: &str,
    ) -> Result<(), PairswitchError>;

    /// Default implementation: every ledger, then the comparison.
    fn write_all(
        &self,
        runs: &[SweepRun],
        baseline: &BaselineSummary,
        output_dir: &str,
    ) -> Result<(), PairswitchError> {
        for run in runs {
            self.write_run(run, output_dir)?;
        }
        self.write_comparison(runs, baseline, output_dir)
    }
}
