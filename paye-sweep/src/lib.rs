//! Driver for the PAYE calculator: converts single amounts and sweeps ranges
//! of gross incomes through the gross → net → gross round trip.

pub mod amount;
pub mod sweep;

pub use amount::{ParseAmountError, parse_amount};
pub use sweep::{
    DEFAULT_MAX_ROWS, SweepError, SweepRange, SweepRow, format_row, run_sweep, write_csv,
};
