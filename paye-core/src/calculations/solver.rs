//! Net-to-gross conversion by bisection over the forward calculator.
//!
//! Net income rises strictly with gross income (every marginal rate is
//! below 100%), and net never exceeds gross for positive amounts, so the
//! gross income for a positive target lies in `[target, 2 × target]`. The
//! interval is halved until it is no wider than [`BISECTION_TOLERANCE`];
//! the last midpoint is rounded to the nearest rand.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::PayeConfig;
//! use paye_core::calculations::bruto_for_target_netto;
//!
//! let config = PayeConfig::sars_2023_2024();
//! let bruto = bruto_for_target_netto(&config.brackets, config.max_uif, dec!(9536.25)).unwrap();
//!
//! assert_eq!(bruto, dec!(10000));
//! ```

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::BracketTable;
use crate::calculations::common::round_to_whole_rand;
use crate::calculations::paye::{PayeError, netto_after_paye_and_uif};

/// Largest bracketing interval accepted as converged (0.0001).
pub const BISECTION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Hard stop for the bisection loop.
pub const MAX_BISECTION_ITERATIONS: u32 = 256;

/// Outcome of a net-to-gross search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrutoSolution {
    /// Gross monthly income rounded to the nearest rand.
    pub bruto: Decimal,

    /// Last midpoint evaluated, before rounding.
    pub candidate: Decimal,

    /// Number of midpoints evaluated.
    pub iterations: u32,

    /// False when the search stopped before the interval reached
    /// [`BISECTION_TOLERANCE`].
    pub converged: bool,
}

/// Searches for the gross monthly income whose net income equals
/// `target_netto`.
///
/// A zero target gives a degenerate interval and returns zero without
/// evaluating anything. Negative targets search `[2 × target, target]`.
///
/// # Errors
///
/// Returns [`PayeError::Overflow`] when the search bounds or the yearly
/// income of a midpoint do not fit in a `Decimal`.
pub fn solve_bruto_for_target_netto(
    brackets: &BracketTable,
    max_uif: Decimal,
    target_netto: Decimal,
) -> Result<BrutoSolution, PayeError> {
    let doubled = target_netto
        .checked_mul(Decimal::TWO)
        .ok_or(PayeError::Overflow {
            operation: "upper search bound",
        })?;

    let mut lower_bound = target_netto.min(doubled);
    let mut upper_bound = target_netto.max(doubled);
    let mut candidate = Decimal::ZERO;
    let mut iterations = 0;
    let mut converged = true;

    while upper_bound - lower_bound > BISECTION_TOLERANCE {
        if iterations == MAX_BISECTION_ITERATIONS {
            warn!(
                target = %target_netto,
                iterations,
                "bisection hit the iteration limit; returning best candidate"
            );
            converged = false;
            break;
        }

        let middle = lower_bound + (upper_bound - lower_bound) / Decimal::TWO;
        if middle == lower_bound || middle == upper_bound {
            warn!(
                target = %target_netto,
                lower = %lower_bound,
                upper = %upper_bound,
                "bisection interval reached decimal resolution; returning best candidate"
            );
            converged = false;
            break;
        }

        iterations += 1;
        candidate = middle;
        let candidate_netto = netto_after_paye_and_uif(brackets, max_uif, middle)?;
        trace!(iterations, middle = %middle, netto = %candidate_netto, "bisection step");

        match candidate_netto.cmp(&target_netto) {
            Ordering::Less => lower_bound = middle,
            Ordering::Greater => upper_bound = middle,
            Ordering::Equal => break,
        }
    }

    let bruto = round_to_whole_rand(candidate);
    debug!(
        target = %target_netto,
        bruto = %bruto,
        iterations,
        converged,
        "solved gross income for target net"
    );

    Ok(BrutoSolution {
        bruto,
        candidate,
        iterations,
        converged,
    })
}

/// Gross monthly income, rounded to the nearest rand, that leaves
/// `target_netto` after PAYE and UIF.
///
/// # Errors
///
/// See [`solve_bruto_for_target_netto`].
pub fn bruto_for_target_netto(
    brackets: &BracketTable,
    max_uif: Decimal,
    target_netto: Decimal,
) -> Result<Decimal, PayeError> {
    solve_bruto_for_target_netto(brackets, max_uif, target_netto).map(|s| s.bruto)
}
