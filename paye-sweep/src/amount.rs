use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a rand amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {reason}")]
pub struct ParseAmountError {
    input: String,
    reason: String,
}

/// Strips surrounding whitespace, an optional leading `R`, and the comma or
/// space thousands separators used in South African amounts.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = trimmed
        .strip_prefix('R')
        .or_else(|| trimmed.strip_prefix('r'))
        .unwrap_or(trimmed);
    unprefixed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parses a rand amount such as `"30000"`, `"R 30 000"` or `"1,234.56"`.
///
/// Used as the clap value parser for every amount argument.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError {
            input: s.to_string(),
            reason: "empty amount".to_string(),
        });
    }
    normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })
}
