//! # Subtracter dispatch
//!
//! One `Subtracter` capability, two bindings: rebindable (`non_final`) and
//! fixed (`final`). Both candidates compute `sub(42, 13)`.

pub mod code;
pub mod test;

use crate::error::RegistryError;
use crate::finality::{ASK, BID};
use crate::registry::{Candidate, CandidateRegistry};
use code::{call_dynamic, call_static, FinalSubtracter, NonFinalSubtracter, Subtracter};
use std::sync::Arc;

pub const GROUP: &str = "subtracter";

/// Register both subtracter candidates. Instances are built here, once.
pub fn register(registry: &mut CandidateRegistry) -> Result<(), RegistryError> {
    let non_final: Arc<dyn Subtracter> = Arc::new(NonFinalSubtracter::new());
    registry.add(Candidate::new(
        "non_final_subtracter",
        GROUP,
        "rebindable implementation, dynamic dispatch",
        move || call_dynamic(non_final.as_ref(), ASK, BID),
    ))?;

    let fixed = FinalSubtracter;
    registry.add(Candidate::new(
        "final_subtracter",
        GROUP,
        "fixed implementation, static dispatch",
        move || call_static(&fixed, ASK, BID),
    ))?;

    Ok(())
}
