mod bracket_table;
mod paye_config;
mod tax_bracket;

pub use bracket_table::{BracketTable, BracketTableError};
pub use paye_config::{PayeConfig, PayeConfigError};
pub use tax_bracket::TaxBracket;
