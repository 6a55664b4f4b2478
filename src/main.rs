//! truthtable - CLI Entry Point
//!
//! `truthtable <netlist>` prints one line per input combination:
//! the input levels, a `|`, then the output levels.

use clap::{ArgAction, Parser, ValueEnum};
use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::process;
use truthtable::{describe, format_row, load_netlist, table_to_json, SimConfig, Simulator};

#[derive(Parser)]
#[command(name = "truthtable")]
#[command(version = "0.1.0")]
#[command(about = "Print the truth table of a combinational gate-level netlist")]
struct Cli {
    /// Path to the netlist file
    file: String,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Maximum settle passes per row (default: number of gates + 1)
    #[arg(long)]
    max_passes: Option<usize>,
    /// Print the parsed netlist to stderr before simulating
    #[arg(long)]
    dump: bool,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `0 1 | 1` rows
    Text,
    /// A single JSON document
    Json,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit with 1; --help and --version are not errors.
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(cli.verbose);

    let netlist = match load_netlist(&cli.file) {
        Ok(netlist) => netlist,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    if cli.dump {
        eprint!("{}", describe(&netlist));
    }

    let config = SimConfig { max_passes: cli.max_passes };
    let mut sim = Simulator::with_config(netlist, config);
    match sim.row_count() {
        Some(rows) => log::info!("enumerating {} rows (pass limit {})", rows, sim.pass_limit()),
        None => log::warn!("at least 2^64 rows to enumerate"),
    }

    let result = match cli.format {
        Format::Text => print_rows(&mut sim),
        Format::Json => print_json(&mut sim),
    };

    log::info!("{} rows, {} settle passes", sim.rows_emitted, sim.total_passes);

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

/// Stream rows to stdout as they settle.
fn print_rows(sim: &mut Simulator) -> Result<(), Box<dyn Error>> {
    let mut out = BufWriter::new(io::stdout().lock());
    for row in sim.rows() {
        match row {
            Ok(row) => writeln!(out, "{}", format_row(&row))?,
            Err(e) => {
                out.flush()?;
                return Err(e.into());
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Settle every row, then print the whole table as JSON.
fn print_json(sim: &mut Simulator) -> Result<(), Box<dyn Error>> {
    let table = sim.run()?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", table_to_json(&table)?)?;
    Ok(())
}

/// Log to stderr without timestamps. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .format_timestamp(None)
        .filter_level(level)
        .target(env_logger::Target::Stderr);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
