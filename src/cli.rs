//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::basket::{self, Basket, BasketError, SkipReason};
use crate::domain::error::BasketIndexError;
use crate::domain::index::{compute_index, IndexConfig, IndexMode};
use crate::domain::price_series::{assemble_price_matrix, CloseObservation};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;
use crate::ports::symbol_port::SymbolLookupPort;
use std::collections::BTreeMap;

#[derive(Parser, Debug)]
#[command(name = "basketindex", about = "Equal-weight basket index builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the index series for a basket
    Compute {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "csv")]
        format: ReportFormat,
        /// Include per-constituent contributions even if the config does not
        #[arg(long)]
        breakdown: bool,
    },
    /// Validate a basket definition and its data availability
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List asset ids available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored date range for basket symbols
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ReportFormat {
    Csv,
    Json,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Compute {
            config,
            output,
            format,
            breakdown,
        } => run_compute(&config, output.as_ref(), format, breakdown),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BasketIndexError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build a [`Basket`] from the `[basket]` section of a config source.
pub fn build_basket(adapter: &dyn ConfigPort) -> Result<Basket, BasketIndexError> {
    let name = adapter
        .get_string("basket", "name")
        .unwrap_or_else(|| "unnamed".to_string());

    let symbols_str =
        adapter
            .get_string("basket", "symbols")
            .ok_or_else(|| BasketIndexError::ConfigMissing {
                section: "basket".into(),
                key: "symbols".into(),
            })?;
    let symbols = basket::parse_symbols(&symbols_str)?;

    let start_str =
        adapter
            .get_string("basket", "start_date")
            .ok_or_else(|| BasketIndexError::ConfigMissing {
                section: "basket".into(),
                key: "start_date".into(),
            })?;
    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        BasketIndexError::ConfigInvalid {
            section: "basket".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    let mode_str = adapter
        .get_string("basket", "mode")
        .unwrap_or_else(|| "static".to_string());
    let min_entry_price = adapter.get_double("basket", "min_entry_price", 10.0);
    let mode = basket::parse_mode(&mode_str, min_entry_price)?;

    Ok(Basket {
        name,
        symbols,
        mode,
        base_value: adapter.get_double("basket", "base_value", 100.0),
        include_breakdown: adapter.get_bool("basket", "include_breakdown", false),
        start_date,
    })
}

fn build_price_adapter(adapter: &dyn ConfigPort) -> Result<CsvPriceAdapter, BasketIndexError> {
    let csv_dir =
        adapter
            .get_string("data", "csv_dir")
            .ok_or_else(|| BasketIndexError::ConfigMissing {
                section: "data".into(),
                key: "csv_dir".into(),
            })?;
    Ok(CsvPriceAdapter::new(PathBuf::from(csv_dir)))
}

fn fetch_observations(
    price_port: &dyn PricePort,
    symbols: &[String],
    start_date: NaiveDate,
) -> Result<Vec<CloseObservation>, BasketIndexError> {
    let mut observations = Vec::new();
    for symbol in symbols {
        observations.extend(price_port.fetch_closes(symbol, start_date)?);
    }
    Ok(observations)
}

fn run_compute(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    format: ReportFormat,
    breakdown_override: bool,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut basket = match build_basket(&adapter) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if breakdown_override {
        basket.include_breakdown = true;
    }

    let price_port = match build_price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let validation =
        match basket::validate_symbols(&price_port, basket.symbols.clone(), basket.start_date) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

    let series = if validation.symbols.is_empty() {
        Vec::new()
    } else {
        let observations =
            match fetch_observations(&price_port, &validation.symbols, basket.start_date) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            };

        let trim_leading = basket.mode == IndexMode::Static;
        let matrix = assemble_price_matrix(&observations, &validation.symbols, trim_leading);

        let labels: BTreeMap<String, String> = validation
            .symbols
            .iter()
            .filter_map(|id| adapter.display_symbol(id).map(|label| (id.clone(), label)))
            .collect();

        let config = IndexConfig {
            base_value: basket.base_value,
            mode: basket.mode.clone(),
            include_breakdown: basket.include_breakdown,
        };
        compute_index(&matrix, &config, &labels)
    };

    if series.is_empty() {
        eprintln!("{}: no data yet", basket.name);
    }

    let report: &dyn ReportPort = match format {
        ReportFormat::Csv => &CsvReportAdapter,
        ReportFormat::Json => &JsonReportAdapter,
    };

    let result = match output_path {
        Some(path) => fs::File::create(path)
            .map_err(BasketIndexError::from)
            .and_then(|mut file| report.write(&series, &mut file)),
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            report
                .write(&series, &mut lock)
                .and_then(|_| lock.flush().map_err(BasketIndexError::from))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let basket = match build_basket(&adapter) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let price_port = match build_price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let validation =
        match basket::validate_symbols(&price_port, basket.symbols.clone(), basket.start_date) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

    for skipped in &validation.skipped {
        match &skipped.reason {
            SkipReason::NoData => println!("{}: no data", skipped.symbol),
            SkipReason::InsufficientRows { rows } => {
                println!("{}: insufficient data ({} rows)", skipped.symbol, rows)
            }
        }
    }

    if validation.symbols.is_empty() {
        let err = BasketIndexError::from(BasketError::AllSymbolsFailed);
        eprintln!("error: {err}");
        return (&err).into();
    }

    println!(
        "{}: {} of {} symbols ready",
        basket.name,
        validation.symbols.len(),
        validation.symbols.len() + validation.skipped.len()
    );
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let price_port = match build_price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match price_port.list_assets() {
        Ok(assets) => {
            for asset_id in assets {
                println!("{asset_id}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, symbol: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let price_port = match build_price_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match build_basket(&adapter) {
            Ok(b) => b.symbols,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for symbol in &symbols {
        match price_port.data_range(symbol) {
            Ok(Some((first, last, rows))) => {
                println!("{symbol}: {first} to {last} ({rows} rows)")
            }
            Ok(None) => println!("{symbol}: no data"),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}
