//! Tests for parameter-binding variants

use super::code::get_variants;
use crate::finality::{ASK, BID, EXPECTED};

/// Verify all variants agree with each other on a spread of inputs and
/// return 29 for the benchmark literals.
pub fn verify_all() -> Result<(), String> {
    let inputs: [(i32, i32); 6] = [
        (ASK, BID),
        (0, 0),
        (13, 42),
        (-5, 7),
        (i32::MIN, 1),
        (i32::MAX, -1),
    ];

    for variant in get_variants() {
        let actual = (variant.function)(ASK, BID);
        if actual != EXPECTED {
            return Err(format!(
                "Variant '{}' failed: expected {}, got {}",
                variant.name, EXPECTED, actual
            ));
        }

        for &(a, b) in &inputs {
            let expected = a.wrapping_sub(b);
            let actual = (variant.function)(a, b);
            if actual != expected {
                return Err(format!(
                    "Variant '{}' failed for ({}, {}): expected {}, got {}",
                    variant.name, a, b, expected, actual
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should produce correct results");
    }

    #[test]
    fn test_overflow_wraps() {
        for variant in get_variants() {
            assert_eq!(
                (variant.function)(i32::MIN, 1),
                i32::MAX,
                "{}: subtraction should wrap like 32-bit int",
                variant.name
            );
        }
    }
}
