//! Tests for local-binding variants

use super::code::get_variants;
use crate::finality::EXPECTED;

/// Verify every variant returns `42 - 13`
pub fn verify_all() -> Result<(), String> {
    for variant in get_variants() {
        let actual = (variant.function)();
        if actual != EXPECTED {
            return Err(format!(
                "Variant '{}' failed: expected {}, got {}",
                variant.name, EXPECTED, actual
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finality::locals::code::{ff, fnf, nff, nfnf};

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should return 29");
    }

    #[test]
    fn test_binding_mutability_does_not_change_result() {
        assert_eq!(nfnf(), 29);
        assert_eq!(fnf(), 29);
        assert_eq!(nff(), 29);
        assert_eq!(ff(), 29);
    }

    #[test]
    fn test_variant_names_are_unique() {
        let mut names: Vec<_> = get_variants().iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
