//! # Finality
//!
//! Candidates comparing mutable (`let mut`, rebindable) and fixed bindings.
//! Every candidate subtracts 13 from 42 and must return 29.

pub mod locals;
pub mod params;
pub mod subtracter;

/// Minuend used by every candidate
pub const ASK: i32 = 42;
/// Subtrahend used by every candidate
pub const BID: i32 = 13;
/// `ASK - BID`
pub const EXPECTED: i32 = 29;

/// Run the correctness checks of every group.
pub fn verify_all() -> Result<(), String> {
    locals::test::verify_all()?;
    params::test::verify_all()?;
    subtracter::test::verify_all()
}
