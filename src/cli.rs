//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::domain::analysis::{self, AnalysisSeries};
use crate::domain::baseline;
use crate::domain::config_validation::{
    parse_analysis_settings, parse_backtest_settings, parse_baseline_config, parse_data_settings,
    parse_report_settings,
};
use crate::domain::error::PairswitchError;
use crate::domain::merge;
use crate::domain::summary::{self, BaselineSummary};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "pairswitch", about = "Spread-quantile switching backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the analysis series from raw data and write the snapshot
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Extend an existing snapshot with newly available rows
    Update {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run the strategy sweep and the buy-and-hold baseline over the snapshot
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored snapshot's range
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze { config } => run_analyze(&config),
        Command::Update { config } => run_update(&config),
        Command::Backtest { config, output } => run_backtest(&config, output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config } => run_info(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PairswitchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: PairswitchError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

fn run_analyze(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match analyze_from_scratch(&config) {
        Ok(series) => {
            eprintln!(
                "Analyzed {} rows ({} windows)",
                series.len(),
                series.windows().len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn analyze_from_scratch(
    config: &dyn ConfigPort,
) -> Result<AnalysisSeries, PairswitchError> {
    let data = parse_data_settings(config)?;
    let settings = parse_analysis_settings(config)?;

    eprintln!("Fetching pair {} / {}", data.primary, data.secondary);
    let adapter = CsvDataAdapter::new(PathBuf::from(&data.path), data.dividends.clone());
    let records = adapter.fetch_pair(
        &data.primary,
        &data.secondary,
        data.start_date.unwrap_or(NaiveDate::MIN),
        data.end_date.unwrap_or(NaiveDate::MAX),
    )?;
    eprintln!("Fetched {} rows", records.len());

    let series = analysis::analyze(records, &settings.windows)?;
    JsonStoreAdapter.save(&settings.snapshot, &series)?;
    eprintln!("Snapshot written to {}", settings.snapshot);
    Ok(series)
}

fn run_update(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = (|| -> Result<(usize, usize), PairswitchError> {
        let data = parse_data_settings(&config)?;
        let settings = parse_analysis_settings(&config)?;

        let prior = JsonStoreAdapter
            .load(&settings.snapshot)?
            .ok_or_else(|| PairswitchError::Store {
                reason: format!(
                    "no snapshot at {}; run `pairswitch analyze` first",
                    settings.snapshot
                ),
            })?;

        // fetch only rows past the stored range; the merge handles the rest
        let fetch_from = prior
            .last_date()
            .and_then(|d| d.succ_opt())
            .unwrap_or(NaiveDate::MIN);
        let adapter = CsvDataAdapter::new(PathBuf::from(&data.path), data.dividends.clone());
        let new_rows = adapter.fetch_pair(
            &data.primary,
            &data.secondary,
            fetch_from,
            data.end_date.unwrap_or(NaiveDate::MAX),
        )?;
        let fetched = new_rows.len();

        let merged = merge::extend(&prior, new_rows)?;
        JsonStoreAdapter.save(&settings.snapshot, &merged)?;
        Ok((fetched, merged.len()))
    })();

    match result {
        Ok((fetched, total)) => {
            eprintln!("Appended {fetched} rows, snapshot now covers {total}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_backtest(config_path: &PathBuf, output_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = (|| -> Result<(), PairswitchError> {
        let settings = parse_analysis_settings(&config)?;
        let backtest = parse_backtest_settings(&config)?;
        let baseline_config = parse_baseline_config(&config)?;
        let report = parse_report_settings(&config)?;
        let output_dir = output_override
            .map(|p| p.display().to_string())
            .unwrap_or(report.output_dir);

        eprintln!("Loading snapshot from {}", settings.snapshot);
        let snapshot = JsonStoreAdapter
            .load(&settings.snapshot)?
            .ok_or_else(|| PairswitchError::Store {
                reason: format!(
                    "no snapshot at {}; run `pairswitch analyze` first",
                    settings.snapshot
                ),
            })?;

        let series = match backtest.start_date {
            Some(start) => snapshot.slice_from(start),
            None => snapshot,
        };
        eprintln!(
            "Backtesting {} rows from {}",
            series.len(),
            series
                .first_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "empty series".to_string())
        );

        let runs = summary::run_sweep(
            &series,
            backtest.initial_holding,
            backtest.initial_shares,
        )?;
        let baseline_result = baseline::run_baseline(&series, &baseline_config)?;
        let baseline_summary = BaselineSummary::compute(&baseline_result, &series);

        for run in &runs {
            let s = &run.summary;
            println!(
                "{}/{}: {:.2}% ex dividends, final value {:.2}, {} switches",
                s.direction,
                s.window,
                s.return_ex_dividends_pct,
                s.final_value,
                s.switches_to_primary + s.switches_to_secondary,
            );
        }
        println!(
            "buy and hold ({}): {:.2}% ex dividends, final value {:.2}",
            baseline_summary.instrument,
            baseline_summary.return_ex_dividends_pct,
            baseline_summary.final_value,
        );

        fs::create_dir_all(&output_dir)?;
        CsvReportAdapter.write_all(&runs, &baseline_summary, &output_dir)?;
        eprintln!("Reports written to {output_dir}");
        Ok(())
    })();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = parse_data_settings(&config)
        .map(|_| ())
        .and_then(|_| parse_analysis_settings(&config).map(|_| ()))
        .and_then(|_| parse_backtest_settings(&config).map(|_| ()))
        .and_then(|_| parse_baseline_config(&config).map(|_| ()))
        .and_then(|_| parse_report_settings(&config).map(|_| ()));

    match result {
        Ok(()) => {
            println!("configuration OK");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_info(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = (|| -> Result<(), PairswitchError> {
        let settings = parse_analysis_settings(&config)?;
        match JsonStoreAdapter.load(&settings.snapshot)? {
            None => println!("no snapshot at {}", settings.snapshot),
            Some(series) => {
                let range = match (series.first_date(), series.last_date()) {
                    (Some(first), Some(last)) => format!("{first} to {last}"),
                    _ => "empty".to_string(),
                };
                let windows: Vec<String> =
                    series.windows().iter().map(|w| w.to_string()).collect();
                println!(
                    "{}: {} rows, {range}, windows [{}]",
                    settings.snapshot,
                    series.len(),
                    windows.join(", ")
                );
            }
        }
        Ok(())
    })();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}
