use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paye_core::calculations::common::round_half_up;
use paye_core::{PayeCalculator, PayeConfig};
use paye_sweep::{DEFAULT_MAX_ROWS, SweepRange, format_row, parse_amount, run_sweep, write_csv};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// South African PAYE and UIF calculator (2023-2024 tables).
///
/// Converts monthly gross ("bruto") income to net ("netto") income and back.
#[derive(Debug, Parser)]
#[command(name = "paye")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Net monthly income left from a gross monthly income
    Net {
        /// Gross monthly income, e.g. `30000` or `R 30 000`
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        bruto: Decimal,
    },

    /// Gross monthly income needed to take home a net monthly income
    Gross {
        /// Target net monthly income
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        netto: Decimal,
    },

    /// Convert a range of gross incomes to net and back
    Sweep {
        /// First gross monthly income
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        start: Decimal,

        /// Last gross monthly income (inclusive)
        #[arg(long, value_parser = parse_amount, default_value = "30000")]
        end: Decimal,

        /// Increment between gross incomes
        #[arg(long, value_parser = parse_amount, default_value = "500")]
        step: Decimal,

        /// Refuse ranges that would produce more rows than this
        #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
        max_rows: usize,

        /// Write CSV to stdout instead of `bruto -> netto -> bruto` lines
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Logs to stderr so stdout stays clean for piping CSV.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = PayeConfig::sars_2023_2024();
    let calculator = PayeCalculator::new(&config);
    debug!(
        brackets = config.brackets.len(),
        tax_free_threshold = %config.brackets.tax_free_threshold(),
        top_rate = %config.brackets.top_rate(),
        max_uif = %config.max_uif,
        "loaded PAYE configuration"
    );

    match cli.command {
        Command::Net { bruto } => {
            let breakdown = calculator
                .breakdown(bruto)
                .with_context(|| format!("Failed to compute net income for {bruto}"))?;
            info!(
                yearly_tax = %round_half_up(breakdown.yearly_tax),
                monthly_tax = %round_half_up(breakdown.monthly_tax),
                uif = %round_half_up(breakdown.uif),
                "PAYE breakdown"
            );
            println!(
                "{} -> {:.2}",
                bruto,
                round_half_up(breakdown.netto_monthly_income)
            );
        }
        Command::Gross { netto } => {
            let solution = calculator
                .solve(netto)
                .with_context(|| format!("Failed to solve gross income for {netto}"))?;
            debug!(
                candidate = %solution.candidate,
                iterations = solution.iterations,
                converged = solution.converged,
                "solved"
            );
            println!("{:.2} -> {}", round_half_up(netto), solution.bruto);
        }
        Command::Sweep {
            start,
            end,
            step,
            max_rows,
            csv,
        } => {
            let range = SweepRange {
                start,
                end,
                step,
                max_rows,
            };
            let rows = run_sweep(&config, range).context("Failed to run sweep")?;

            if csv {
                write_csv(&rows, io::stdout().lock()).context("Failed to write CSV")?;
            } else {
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
            info!(rows = rows.len(), "sweep complete");
        }
    }

    Ok(())
}
