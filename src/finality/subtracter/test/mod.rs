//! Tests for subtracter variants

use super::code::{call_dynamic, call_static, FinalSubtracter, NonFinalSubtracter};
use crate::finality::{ASK, BID, EXPECTED};

/// Verify both variants compute `sub(42, 13) = 29` through their
/// benchmark call paths
pub fn verify_all() -> Result<(), String> {
    let non_final = NonFinalSubtracter::new();
    let results = [
        ("non_final_subtracter", call_dynamic(&non_final, ASK, BID)),
        ("final_subtracter", call_static(&FinalSubtracter, ASK, BID)),
    ];

    for (name, actual) in results {
        if actual != EXPECTED {
            return Err(format!(
                "Variant '{}' failed: expected {}, got {}",
                name, EXPECTED, actual
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finality::subtracter::code::Subtracter;
    use proptest::prelude::*;

    #[test]
    fn test_all_variants() {
        verify_all().expect("Both subtracters should return 29");
    }

    #[test]
    fn test_rebind_to_equivalent_keeps_result() {
        fn via_neg(a: i32, b: i32) -> i32 {
            a.wrapping_add(b.wrapping_neg())
        }

        let mut non_final = NonFinalSubtracter::new();
        let before = non_final.sub(ASK, BID);
        non_final.rebind(via_neg);
        assert_eq!(non_final.sub(ASK, BID), before);
    }

    #[test]
    fn test_rebind_changes_binding() {
        let mut non_final = NonFinalSubtracter::new();
        non_final.rebind(|a, _| a);
        assert_eq!(non_final.sub(ASK, BID), ASK);
    }

    proptest! {
        #[test]
        fn prop_variants_agree(a in any::<i32>(), b in any::<i32>()) {
            let non_final = NonFinalSubtracter::new();
            prop_assert_eq!(call_dynamic(&non_final, a, b), a.wrapping_sub(b));
            prop_assert_eq!(call_static(&FinalSubtracter, a, b), a.wrapping_sub(b));
        }
    }
}
