//! Cellgrid - a terminal spreadsheet with a prefix-call formula language

mod config;
mod error;
#[cfg(feature = "tui")]
mod tui;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use cellgrid_core::Sheet;
use log::debug;

use error::{AppError, Result};

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sample                  Start from the rainy-days example sheet");
    eprintln!("  -s, --set <KEY=RAW>       Store RAW in cell KEY (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate FORMULA against the sheet and print it");
    eprintln!("  -p, --print               Print every non-empty cell and exit");
    eprintln!("  --config <FILE>           Read settings from FILE");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    sample: bool,
    sets: Vec<(String, String)>,
    command: Option<String>,
    print: bool,
    config: Option<PathBuf>,
}

impl Options {
    /// Whether this run answers on stdout instead of opening the grid.
    fn is_batch(&self) -> bool {
        self.command.is_some() || self.print
    }
}

/// Parse argv (without the program name). `Ok(None)` means help was asked for.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| AppError::InvalidArgument(format!("{} requires a value", flag)))
        };
        match arg {
            "-h" | "--help" => return Ok(None),
            "--sample" => options.sample = true,
            "-p" | "--print" => options.print = true,
            "-c" | "--command" => options.command = Some(value(arg)?),
            "--config" => options.config = Some(PathBuf::from(value(arg)?)),
            "-s" | "--set" => {
                let assignment = value(arg)?;
                let (key, raw) = assignment.split_once('=').ok_or_else(|| {
                    AppError::InvalidArgument(format!(
                        "expected KEY=RAW for {}, got '{}'",
                        arg, assignment
                    ))
                })?;
                options.sets.push((key.to_string(), raw.to_string()));
            }
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "unknown option: {}",
                    other
                )));
            }
        }
    }
    Ok(Some(options))
}

fn build_sheet(options: &Options, sample: bool) -> Result<Sheet> {
    let sheet = if sample { Sheet::sample()? } else { Sheet::new() };
    for (key, raw) in &options.sets {
        sheet.set_cell(key, raw)?;
    }
    Ok(sheet)
}

/// Print `KEY<TAB>RAW<TAB>VALUE` lines, returning how many cells failed.
fn print_cells(sheet: &Sheet) -> usize {
    let mut failed = 0;
    for cell in sheet.non_empty_cells() {
        if cell.error {
            failed += 1;
        }
        println!("{}\t{}\t{}", cell.coord, cell.raw_value, cell.value);
    }
    failed
}

fn run(options: Options) -> anyhow::Result<()> {
    let (config, warnings) = config::load_config(options.config.as_deref());
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    debug!("config: {:?}", config);

    let sheet = build_sheet(&options, options.sample || config.sample)
        .context("failed to prepare sheet")?;

    if options.is_batch() {
        if let Some(formula) = &options.command {
            let value = sheet.evaluate(formula)?;
            println!("{}", value);
        }
        if options.print {
            let failed = print_cells(&sheet);
            if failed > 0 {
                eprintln!("Warning: {} cell(s) failed to evaluate", failed);
            }
        }
        return Ok(());
    }

    run_interactive(sheet, config.column_width, &warnings)
}

#[cfg(feature = "tui")]
fn run_interactive(sheet: Sheet, column_width: usize, warnings: &[String]) -> anyhow::Result<()> {
    let mut app = tui::App::new(sheet, column_width);
    if !warnings.is_empty() {
        app.warn(&warnings.join("; "));
    }
    tui::run(&mut app).context("terminal session failed")?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_interactive(
    _sheet: Sheet,
    _column_width: usize,
    _warnings: &[String],
) -> anyhow::Result<()> {
    anyhow::bail!("built without the terminal UI; use -c or -p")
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
