pub mod calculations;
pub mod models;

pub use calculations::{PayeCalculator, PayeError};
pub use models::*;
