use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate band of yearly income.
///
/// `max_income` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Width of the bracket, or `None` when it is unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }

    /// Portion of `remaining` yearly income that falls inside this bracket.
    pub fn income_inside(
        &self,
        remaining: Decimal,
    ) -> Decimal {
        match self.width() {
            Some(width) => width.min(remaining),
            None => remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn width_of_bounded_bracket() {
        let bracket = TaxBracket::new(dec!(95750), Some(dec!(237100)), dec!(0.18));

        assert_eq!(bracket.width(), Some(dec!(141350)));
    }

    #[test]
    fn width_of_unbounded_bracket_is_none() {
        let bracket = TaxBracket::new(dec!(1817000), None, dec!(0.45));

        assert_eq!(bracket.width(), None);
    }

    #[test]
    fn income_inside_is_capped_by_width() {
        let bracket = TaxBracket::new(dec!(95750), Some(dec!(237100)), dec!(0.18));

        assert_eq!(bracket.income_inside(dec!(500000)), dec!(141350));
        assert_eq!(bracket.income_inside(dec!(1000)), dec!(1000));
    }

    #[test]
    fn income_inside_unbounded_takes_everything() {
        let bracket = TaxBracket::new(dec!(1817000), None, dec!(0.45));

        assert_eq!(bracket.income_inside(dec!(9999999)), dec!(9999999));
    }

    #[test]
    fn income_inside_passes_negative_remainder_through() {
        let bracket = TaxBracket::new(dec!(0), Some(dec!(95750)), dec!(0));

        assert_eq!(bracket.income_inside(dec!(-12)), dec!(-12));
    }
}
