//! CSV ledger and markdown comparison report adapter.
//!
//! Writes one `ledger_<direction>_<window>.csv` per run and a single
//! `comparison.md` ranking every run against the buy-and-hold baseline.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::error::PairswitchError;
use crate::domain::ledger::{LedgerEntry, LedgerKind};
use crate::domain::summary::{BaselineSummary, SweepRun};
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

const LEDGER_HEADER: [&str; 11] = [
    "date",
    "event",
    "from",
    "to",
    "shares_sold",
    "sell_price",
    "shares_bought",
    "buy_price",
    "dividend_per_share",
    "dividend_total",
    "cash_after",
];

impl ReportPort for CsvReportAdapter {
    fn write_run(&self, run: &SweepRun, output_dir: &str) -> Result<(), PairswitchError> {
        let path = Path::new(output_dir).join(format!(
            "ledger_{}_{}.csv",
            run.direction.label(),
            run.window
        ));
        let mut writer = csv::Writer::from_path(&path).map_err(|e| PairswitchError::Report {
            reason: format!("failed to open {}: {e}", path.display()),
        })?;

        write_ledger(&mut writer, &run.result.ledger).map_err(|e| PairswitchError::Report {
            reason: format!("failed to write {}: {e}", path.display()),
        })
    }

    fn write_comparison(
        &self,
        runs: &[SweepRun],
        baseline: &BaselineSummary,
        output_dir: &str,
    ) -> Result<(), PairswitchError> {
        let mut ranked: Vec<&SweepRun> = runs.iter().collect();
        ranked.sort_by(|a, b| {
            b.summary
                .return_ex_dividends_pct
                .total_cmp(&a.summary.return_ex_dividends_pct)
        });

        let mut report = String::new();
        let _ = writeln!(report, "# Strategy comparison\n");
        let _ = writeln!(
            report,
            "| window | direction | return (ex dividends) | final value | switches | dividends received |"
        );
        let _ = writeln!(report, "|---|---|---|---|---|---|");
        for run in &ranked {
            let s = &run.summary;
            let _ = writeln!(
                report,
                "| {} | {} | {:.2}% | {:.2} | {} | {:.2} |",
                s.window,
                s.direction,
                s.return_ex_dividends_pct,
                s.final_value,
                s.switches_to_primary + s.switches_to_secondary,
                s.total_dividends,
            );
        }

        let _ = writeln!(report, "\n## Buy and hold ({})\n", baseline.instrument);
        let _ = writeln!(
            report,
            "- return (ex dividends): {:.2}%",
            baseline.return_ex_dividends_pct
        );
        let _ = writeln!(report, "- final value: {:.2}", baseline.final_value);
        let _ = writeln!(
            report,
            "- dividends received: {:.2} over {} events",
            baseline.total_dividends, baseline.dividend_events
        );

        let path = Path::new(output_dir).join("comparison.md");
        fs::write(&path, report).map_err(|e| PairswitchError::Report {
            reason: format!("failed to write {}: {e}", path.display()),
        })
    }
}

fn write_ledger(
    writer: &mut csv::Writer<std::fs::File>,
    ledger: &[LedgerEntry],
) -> Result<(), csv::Error> {
    writer.write_record(LEDGER_HEADER)?;
    for entry in ledger {
        let date = entry.date.to_string();
        let cash = entry.cash_after.to_string();
        let row: [String; 11] = match &entry.kind {
            LedgerKind::Initial { instrument, shares } => [
                date,
                "initial".into(),
                String::new(),
                instrument.to_string(),
                String::new(),
                String::new(),
                shares.to_string(),
                String::new(),
                String::new(),
                String::new(),
                cash,
            ],
            LedgerKind::Switch {
                from,
                to,
                shares_sold,
                sell_price,
                shares_bought,
                buy_price,
            } => [
                date,
                "switch".into(),
                from.to_string(),
                to.to_string(),
                shares_sold.to_string(),
                sell_price.to_string(),
                shares_bought.to_string(),
                buy_price.to_string(),
                String::new(),
                String::new(),
                cash,
            ],
            LedgerKind::DividendAccrual {
                per_share,
                shares,
                total,
            } => [
                date,
                "dividend".into(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                shares.to_string(),
                String::new(),
                per_share.to_string(),
                total.to_string(),
                cash,
            ],
        };
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
