use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BracketTable, BracketTableError};

/// Monthly UIF ceiling for 2023-2024.
const SARS_2023_2024_MAX_UIF: Decimal = Decimal::from_parts(17712, 0, 0, false, 2);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayeConfigError {
    #[error("UIF cap must be non-negative, got {0}")]
    NegativeUifCap(Decimal),

    #[error(transparent)]
    Brackets(#[from] BracketTableError),
}

/// Everything a PAYE calculation depends on: the bracket table and the
/// monthly UIF ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeConfig {
    pub brackets: BracketTable,
    pub max_uif: Decimal,
}

impl PayeConfig {
    pub fn new(
        brackets: BracketTable,
        max_uif: Decimal,
    ) -> Result<Self, PayeConfigError> {
        if max_uif < Decimal::ZERO {
            return Err(PayeConfigError::NegativeUifCap(max_uif));
        }
        Ok(Self { brackets, max_uif })
    }

    /// SARS brackets and UIF ceiling for the 2023-2024 year of assessment.
    pub fn sars_2023_2024() -> Self {
        Self {
            brackets: BracketTable::sars_2023_2024(),
            max_uif: SARS_2023_2024_MAX_UIF,
        }
    }
}

impl Default for PayeConfig {
    fn default() -> Self {
        Self::sars_2023_2024()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn sars_config_uses_177_12_cap() {
        let config = PayeConfig::sars_2023_2024();

        assert_eq!(config.max_uif, dec!(177.12));
        assert_eq!(config.brackets, BracketTable::sars_2023_2024());
    }

    #[test]
    fn default_is_sars_2023_2024() {
        assert_eq!(PayeConfig::default(), PayeConfig::sars_2023_2024());
    }

    #[test]
    fn new_accepts_zero_cap() {
        let config = PayeConfig::new(BracketTable::sars_2023_2024(), dec!(0));

        assert!(config.is_ok());
    }

    #[test]
    fn new_rejects_negative_cap() {
        let config = PayeConfig::new(BracketTable::sars_2023_2024(), dec!(-1));

        assert_eq!(config, Err(PayeConfigError::NegativeUifCap(dec!(-1))));
    }

    #[test]
    fn bracket_errors_convert_into_config_errors() {
        let err: PayeConfigError = BracketTableError::Empty.into();

        assert_eq!(err.to_string(), "bracket table is empty");
    }
}
