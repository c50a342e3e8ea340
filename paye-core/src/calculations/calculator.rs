use rust_decimal::Decimal;

use crate::PayeConfig;
use crate::calculations::paye::{PayeBreakdown, PayeError, netto_after_paye_and_uif, paye_breakdown};
use crate::calculations::solver::{BrutoSolution, bruto_for_target_netto, solve_bruto_for_target_netto};

/// Gross/net conversions against one [`PayeConfig`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::{PayeCalculator, PayeConfig};
///
/// let config = PayeConfig::sars_2023_2024();
/// let calculator = PayeCalculator::new(&config);
///
/// let netto = calculator.netto_from_bruto(dec!(10000)).unwrap();
/// assert_eq!(netto, dec!(9536.25));
/// assert_eq!(calculator.bruto_for_target_netto(netto).unwrap(), dec!(10000));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PayeCalculator<'a> {
    config: &'a PayeConfig,
}

impl<'a> PayeCalculator<'a> {
    pub fn new(config: &'a PayeConfig) -> Self {
        Self { config }
    }

    pub fn netto_from_bruto(
        &self,
        bruto_monthly_income: Decimal,
    ) -> Result<Decimal, PayeError> {
        netto_after_paye_and_uif(
            &self.config.brackets,
            self.config.max_uif,
            bruto_monthly_income,
        )
    }

    pub fn bruto_for_target_netto(
        &self,
        target_netto: Decimal,
    ) -> Result<Decimal, PayeError> {
        bruto_for_target_netto(&self.config.brackets, self.config.max_uif, target_netto)
    }

    pub fn breakdown(
        &self,
        bruto_monthly_income: Decimal,
    ) -> Result<PayeBreakdown, PayeError> {
        paye_breakdown(
            &self.config.brackets,
            self.config.max_uif,
            bruto_monthly_income,
        )
    }

    /// Like [`bruto_for_target_netto`](Self::bruto_for_target_netto) but
    /// also reports the unrounded candidate and iteration count.
    pub fn solve(
        &self,
        target_netto: Decimal,
    ) -> Result<BrutoSolution, PayeError> {
        solve_bruto_for_target_netto(&self.config.brackets, self.config.max_uif, target_netto)
    }
}
