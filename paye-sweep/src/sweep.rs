use std::io::Write;

use paye_core::calculations::common::round_half_up;
use paye_core::{PayeCalculator, PayeConfig, PayeError};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Row limit used when the caller does not pick one.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Errors that can occur while sweeping gross incomes.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("sweep step must be positive, got {0}")]
    NonPositiveStep(Decimal),

    #[error("sweep end {end} is below start {start}")]
    InvertedRange { start: Decimal, end: Decimal },

    #[error("sweep value overflowed after {last}")]
    Overflow { last: Decimal },

    /// `step` is below the decimal resolution at `value`.
    #[error("sweep step {step} does not advance past {value}")]
    StepTooSmall { value: Decimal, step: Decimal },

    #[error("sweep would produce more than {limit} rows")]
    TooManyRows { limit: usize },

    #[error("PAYE calculation failed: {0}")]
    Paye(#[from] PayeError),

    #[error("CSV write error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for SweepError {
    fn from(err: csv::Error) -> Self {
        SweepError::Csv(err.to_string())
    }
}

/// Inclusive range of gross monthly incomes to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    pub start: Decimal,
    pub end: Decimal,
    pub step: Decimal,

    /// Upper bound on the number of values `values` may produce.
    pub max_rows: usize,
}

impl Default for SweepRange {
    /// 0, 500, …, 30000.
    fn default() -> Self {
        Self {
            start: Decimal::ZERO,
            end: Decimal::from(30_000),
            step: Decimal::from(500),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl SweepRange {
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.step <= Decimal::ZERO {
            return Err(SweepError::NonPositiveStep(self.step));
        }
        if self.end < self.start {
            return Err(SweepError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Every gross value in the range, `end` included when it falls on a step.
    ///
    /// # Errors
    ///
    /// Besides [`validate`](Self::validate) failures, returns
    /// [`SweepError::TooManyRows`] past `max_rows` values, and
    /// [`SweepError::Overflow`] or [`SweepError::StepTooSmall`] when the next
    /// value cannot be computed or does not move.
    pub fn values(&self) -> Result<Vec<Decimal>, SweepError> {
        self.validate()?;

        let mut values = Vec::new();
        let mut current = self.start;
        loop {
            if values.len() == self.max_rows {
                return Err(SweepError::TooManyRows {
                    limit: self.max_rows,
                });
            }
            values.push(current);

            // Stop before stepping so an end near Decimal::MAX never overflows.
            // A remaining span too wide to represent is always wider than the step.
            if let Some(remaining) = self.end.checked_sub(current) {
                if remaining < self.step {
                    break;
                }
            }
            let next = current
                .checked_add(self.step)
                .ok_or(SweepError::Overflow { last: current })?;
            if next <= current {
                return Err(SweepError::StepTooSmall {
                    value: current,
                    step: self.step,
                });
            }
            current = next;
        }
        Ok(values)
    }
}

/// One gross → net → gross conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepRow {
    pub bruto: Decimal,
    pub netto: Decimal,
    pub bruto_again: Decimal,
}

/// Converts every gross value in `range` to net and back again.
pub fn run_sweep(
    config: &PayeConfig,
    range: SweepRange,
) -> Result<Vec<SweepRow>, SweepError> {
    let calculator = PayeCalculator::new(config);
    let values = range.values()?;
    debug!(rows = values.len(), "running sweep");

    values
        .into_iter()
        .map(|bruto| -> Result<SweepRow, SweepError> {
            let netto = calculator.netto_from_bruto(bruto)?;
            let bruto_again = calculator.bruto_for_target_netto(netto)?;
            Ok(SweepRow {
                bruto,
                netto,
                bruto_again,
            })
        })
        .collect()
}

/// Renders a row as `bruto -> netto -> bruto_again` with cents on the
/// converted amounts.
pub fn format_row(row: &SweepRow) -> String {
    format!(
        "{} -> {:.2} -> {:.2}",
        row.bruto,
        round_half_up(row.netto),
        round_half_up(row.bruto_again)
    )
}

/// Writes `rows` as CSV with a header line, net amounts rounded to cents.
pub fn write_csv<W: Write>(
    rows: &[SweepRow],
    writer: W,
) -> Result<(), SweepError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        let mut netto = round_half_up(row.netto);
        netto.rescale(2);
        csv_writer.serialize(SweepRow {
            netto,
            ..row.clone()
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
