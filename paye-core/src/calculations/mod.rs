//! PAYE and UIF calculations.
//!
//! [`paye`] converts gross monthly income to net, [`solver`] inverts that
//! conversion by bisection, and [`PayeCalculator`] bundles both behind a
//! single [`PayeConfig`](crate::PayeConfig).

pub mod calculator;
pub mod common;
pub mod paye;
pub mod solver;

pub use calculator::PayeCalculator;
pub use paye::{
    PayeBreakdown, PayeError, UIF_RATE, annual_tax, netto_after_paye_and_uif, paye_breakdown,
    uif_contribution,
};
pub use solver::{
    BISECTION_TOLERANCE, BrutoSolution, MAX_BISECTION_ITERATIONS, bruto_for_target_netto,
    solve_bruto_for_target_netto,
};
