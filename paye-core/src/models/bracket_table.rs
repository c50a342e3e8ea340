//! Validated progressive bracket tables.
//!
//! A [`BracketTable`] partitions yearly income from zero to infinity into
//! contiguous [`TaxBracket`]s with non-decreasing marginal rates. Once built
//! it is immutable; every calculation borrows it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

/// SARS individual rates for the 2023-2024 year of assessment.
///
/// `(lower threshold, upper threshold, rate in percent)`; the last row is
/// open-ended.
const SARS_2023_2024: [(i64, Option<i64>, i64); 8] = [
    (0, Some(95_750), 0),
    (95_750, Some(237_100), 18),
    (237_100, Some(370_500), 26),
    (370_500, Some(512_800), 31),
    (512_800, Some(673_000), 36),
    (673_000, Some(857_900), 39),
    (857_900, Some(1_817_000), 41),
    (1_817_000, None, 45),
];

/// Errors raised while building a [`BracketTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    /// Upper threshold of bracket `index` does not meet the next lower threshold.
    #[error("bracket {index} ends at {upper} but the next bracket starts at {next_lower}")]
    Gap {
        index: usize,
        upper: Decimal,
        next_lower: Decimal,
    },

    #[error("bracket {index} has non-positive width ({min_income}..{max_income})")]
    EmptyBracket {
        index: usize,
        min_income: Decimal,
        max_income: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedNotLast(usize),

    #[error("last bracket must be unbounded, got upper threshold {0}")]
    LastBracketBounded(Decimal),

    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    DecreasingRate {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },
}

/// An ordered, contiguous set of tax brackets covering `[0, ∞)`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::{BracketTable, TaxBracket};
///
/// let table = BracketTable::new(vec![
///     TaxBracket::new(dec!(0), Some(dec!(100000)), dec!(0)),
///     TaxBracket::new(dec!(100000), None, dec!(0.25)),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.top_rate(), dec!(0.25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking that the brackets form a valid partition.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] describing the first violation found.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        validate(&brackets)?;
        Ok(Self { brackets })
    }

    /// The 2023-2024 SARS table for individuals.
    pub fn sars_2023_2024() -> Self {
        let brackets = SARS_2023_2024
            .iter()
            .map(|&(lower, upper, percent)| {
                TaxBracket::new(
                    Decimal::from(lower),
                    upper.map(Decimal::from),
                    Decimal::new(percent, 2),
                )
            })
            .collect();
        Self { brackets }
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a validated table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Marginal rate of the open-ended top bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.tax_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Yearly income below which no tax is due.
    pub fn tax_free_threshold(&self) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.tax_rate > Decimal::ZERO)
            .map(|b| b.min_income)
            .unwrap_or(Decimal::MAX)
    }
}

impl<'a> IntoIterator for &'a BracketTable {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.brackets.iter()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = BracketTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

fn validate(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
    let first = brackets.first().ok_or(BracketTableError::Empty)?;
    if first.min_income != Decimal::ZERO {
        return Err(BracketTableError::FirstBracketNotAtZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut previous_rate = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }
        if bracket.tax_rate < previous_rate {
            return Err(BracketTableError::DecreasingRate {
                index,
                rate: bracket.tax_rate,
                previous: previous_rate,
            });
        }
        previous_rate = bracket.tax_rate;

        match (bracket.max_income, index == last_index) {
            (Some(max_income), true) => {
                return Err(BracketTableError::LastBracketBounded(max_income));
            }
            (None, false) => return Err(BracketTableError::UnboundedNotLast(index)),
            (None, true) => {}
            (Some(max_income), false) => {
                if max_income <= bracket.min_income {
                    return Err(BracketTableError::EmptyBracket {
                        index,
                        min_income: bracket.min_income,
                        max_income,
                    });
                }
                let next_lower = brackets[index + 1].min_income;
                if max_income != next_lower {
                    return Err(BracketTableError::Gap {
                        index,
                        upper: max_income,
                        next_lower,
                    });
                }
            }
        }
    }

    Ok(())
}
