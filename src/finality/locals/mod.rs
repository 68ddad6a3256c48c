//! # Local bindings
//!
//! `nfnf`, `fnf`, `nff` and `ff`: two locals initialised from literals,
//! each declared mutable or fixed.

pub mod code;
pub mod test;

use crate::error::RegistryError;
use crate::registry::{Candidate, CandidateRegistry};

pub const GROUP: &str = "locals";

/// Register the local-binding candidates
pub fn register(registry: &mut CandidateRegistry) -> Result<(), RegistryError> {
    for variant in code::get_variants() {
        let func = variant.function;
        registry.add(Candidate::new(
            variant.name,
            GROUP,
            variant.description,
            move || func(),
        ))?;
    }
    Ok(())
}
