//! Gross-to-net conversion: PAYE income tax plus the UIF contribution.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Yearly income = gross monthly income × 12 |
//! | 2    | Walk the brackets in order, taxing the slice of income inside each one at its marginal rate |
//! | 3    | Monthly tax = yearly tax ÷ 12 |
//! | 4    | UIF = smaller of 1% of gross monthly income or the UIF cap |
//! | 5    | Net monthly income = gross − monthly tax − UIF |
//!
//! No intermediate value is rounded; callers round for display with
//! [`round_half_up`](crate::calculations::common::round_half_up).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::PayeConfig;
//! use paye_core::calculations::common::round_half_up;
//! use paye_core::calculations::netto_after_paye_and_uif;
//!
//! let config = PayeConfig::sars_2023_2024();
//! let netto = netto_after_paye_and_uif(&config.brackets, config.max_uif, dec!(10000)).unwrap();
//!
//! assert_eq!(netto, dec!(9536.25));
//!
//! let netto = netto_after_paye_and_uif(&config.brackets, config.max_uif, dec!(30000)).unwrap();
//!
//! assert_eq!(round_half_up(netto), dec!(25039.80));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::BracketTable;

/// Share of gross monthly income withheld for UIF before the cap applies.
pub const UIF_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub(crate) const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Errors that can occur while converting between gross and net income.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayeError {
    /// An amount left the representable `Decimal` range.
    #[error("decimal overflow while computing {operation}")]
    Overflow { operation: &'static str },
}

/// Every intermediate amount of a gross-to-net conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBreakdown {
    pub bruto_monthly_income: Decimal,
    pub yearly_income: Decimal,
    pub yearly_tax: Decimal,
    pub monthly_tax: Decimal,
    pub uif: Decimal,
    pub netto_monthly_income: Decimal,
}

/// Tax due on `yearly_income` under the progressive `brackets`.
///
/// Stops at the first bracket that receives no income, so zero or negative
/// income yields zero tax.
pub fn annual_tax(
    brackets: &BracketTable,
    yearly_income: Decimal,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = yearly_income;

    for bracket in brackets {
        let income_inside_bracket = bracket.income_inside(remaining);
        if income_inside_bracket <= Decimal::ZERO {
            break;
        }

        tax += income_inside_bracket * bracket.tax_rate;
        remaining -= income_inside_bracket;
    }

    tax
}

/// UIF withheld from `bruto_monthly_income`, capped at `max_uif`.
///
/// Negative income gives a negative contribution; the cap only limits from above.
pub fn uif_contribution(
    bruto_monthly_income: Decimal,
    max_uif: Decimal,
) -> Decimal {
    (bruto_monthly_income * UIF_RATE).min(max_uif)
}

/// Computes every step of the gross-to-net conversion.
///
/// # Errors
///
/// Returns [`PayeError::Overflow`] when the yearly income does not fit in a
/// `Decimal`.
pub fn paye_breakdown(
    brackets: &BracketTable,
    max_uif: Decimal,
    bruto_monthly_income: Decimal,
) -> Result<PayeBreakdown, PayeError> {
    if bruto_monthly_income < Decimal::ZERO {
        debug!(
            bruto = %bruto_monthly_income,
            "negative gross income; no tax applies"
        );
    }

    let yearly_income = bruto_monthly_income
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or(PayeError::Overflow {
            operation: "yearly income",
        })?;

    let yearly_tax = annual_tax(brackets, yearly_income);
    let monthly_tax = yearly_tax / MONTHS_PER_YEAR;
    let uif = uif_contribution(bruto_monthly_income, max_uif);

    Ok(PayeBreakdown {
        bruto_monthly_income,
        yearly_income,
        yearly_tax,
        monthly_tax,
        uif,
        netto_monthly_income: bruto_monthly_income - monthly_tax - uif,
    })
}

/// Net monthly income left after PAYE and UIF are withheld from
/// `bruto_monthly_income`.
///
/// # Errors
///
/// Returns [`PayeError::Overflow`] when the yearly income does not fit in a
/// `Decimal`.
pub fn netto_after_paye_and_uif(
    brackets: &BracketTable,
    max_uif: Decimal,
    bruto_monthly_income: Decimal,
) -> Result<Decimal, PayeError> {
    paye_breakdown(brackets, max_uif, bruto_monthly_income).map(|b| b.netto_monthly_income)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PayeConfig;
    use crate::calculations::common::round_half_up;

    fn sars() -> PayeConfig {
        PayeConfig::sars_2023_2024()
    }

    fn netto(bruto: Decimal) -> Decimal {
        let config = sars();
        netto_after_paye_and_uif(&config.brackets, config.max_uif, bruto).unwrap()
    }

    // =========================================================================
    // annual_tax tests
    // =========================================================================

    #[test]
    fn annual_tax_is_zero_for_zero_income() {
        assert_eq!(annual_tax(&sars().brackets, dec!(0)), dec!(0));
    }

    #[test]
    fn annual_tax_is_zero_for_negative_income() {
        assert_eq!(annual_tax(&sars().brackets, dec!(-12000)), dec!(0));
    }

    #[test]
    fn annual_tax_is_zero_at_first_threshold() {
        assert_eq!(annual_tax(&sars().brackets, dec!(95750)), dec!(0));
    }

    #[test]
    fn annual_tax_second_bracket_starts_one_rand_later() {
        assert_eq!(annual_tax(&sars().brackets, dec!(95751)), dec!(0.18));
    }

    #[test]
    fn annual_tax_spans_three_brackets() {
        // 141350 × 0.18 + 122900 × 0.26
        assert_eq!(annual_tax(&sars().brackets, dec!(360000)), dec!(57397));
    }

    #[test]
    fn annual_tax_reaches_top_bracket() {
        // 627254 through 1817000, then 183000 × 0.45
        assert_eq!(annual_tax(&sars().brackets, dec!(2000000)), dec!(709604));
    }

    #[test]
    fn annual_tax_single_flat_bracket() {
        let table = BracketTable::new(vec![crate::TaxBracket::new(dec!(0), None, dec!(0.2))])
            .unwrap();

        assert_eq!(annual_tax(&table, dec!(1500)), dec!(300));
    }

    // =========================================================================
    // uif_contribution tests
    // =========================================================================

    #[test]
    fn uif_is_one_percent_below_cap() {
        assert_eq!(uif_contribution(dec!(10000), dec!(177.12)), dec!(100));
    }

    #[test]
    fn uif_is_capped() {
        assert_eq!(uif_contribution(dec!(30000), dec!(177.12)), dec!(177.12));
    }

    #[test]
    fn uif_is_zero_for_zero_income() {
        assert_eq!(uif_contribution(dec!(0), dec!(177.12)), dec!(0));
    }

    #[test]
    fn uif_is_negative_for_negative_income() {
        assert_eq!(uif_contribution(dec!(-500), dec!(177.12)), dec!(-5));
    }

    // =========================================================================
    // netto_after_paye_and_uif tests
    // =========================================================================

    #[test]
    fn netto_of_zero_is_zero() {
        assert_eq!(netto(dec!(0)), dec!(0));
    }

    #[test]
    fn netto_below_tax_threshold_only_loses_uif() {
        assert_eq!(netto(dec!(500)), dec!(495));
        assert_eq!(netto(dec!(5000)), dec!(4950));
        assert_eq!(netto(dec!(7500)), dec!(7425));
    }

    #[test]
    fn netto_in_second_bracket() {
        // (120000 - 95750) × 0.18 / 12 = 363.75, UIF 100
        assert_eq!(netto(dec!(10000)), dec!(9536.25));
    }

    #[test]
    fn netto_with_capped_uif() {
        assert_eq!(round_half_up(netto(dec!(20000))), dec!(17639.80));
    }

    #[test]
    fn netto_of_thirty_thousand() {
        assert_eq!(round_half_up(netto(dec!(30000))), dec!(25039.80));
    }

    #[test]
    fn netto_of_negative_income_keeps_ninety_nine_percent() {
        assert_eq!(netto(dec!(-1000)), dec!(-990));
    }

    #[test]
    fn netto_is_non_decreasing() {
        let mut previous = netto(dec!(0));
        let mut bruto = dec!(250);
        while bruto <= dec!(200000) {
            let current = netto(bruto);
            assert!(current >= previous, "netto dropped at bruto {bruto}");
            previous = current;
            bruto += dec!(250);
        }
    }

    #[test]
    fn netto_overflow_is_reported() {
        let config = sars();
        let result = netto_after_paye_and_uif(&config.brackets, config.max_uif, Decimal::MAX);

        assert_eq!(
            result,
            Err(PayeError::Overflow {
                operation: "yearly income"
            })
        );
    }

    // =========================================================================
    // paye_breakdown tests
    // =========================================================================

    #[test]
    fn breakdown_of_thirty_thousand() {
        let config = sars();
        let breakdown = paye_breakdown(&config.brackets, config.max_uif, dec!(30000)).unwrap();

        assert_eq!(breakdown.yearly_income, dec!(360000));
        assert_eq!(breakdown.yearly_tax, dec!(57397));
        assert_eq!(round_half_up(breakdown.monthly_tax), dec!(4783.08));
        assert_eq!(breakdown.uif, dec!(177.12));
        assert_eq!(
            breakdown.netto_monthly_income,
            breakdown.bruto_monthly_income - breakdown.monthly_tax - breakdown.uif
        );
    }
}
