//! # Parameter bindings

pub mod code;
pub mod test;

use crate::error::RegistryError;
use crate::finality::{ASK, BID};
use crate::registry::{Candidate, CandidateRegistry};

pub const GROUP: &str = "params";

/// Register the parameter-binding candidates, each called with `(42, 13)`
pub fn register(registry: &mut CandidateRegistry) -> Result<(), RegistryError> {
    for variant in code::get_variants() {
        let func = variant.function;
        registry.add(Candidate::new(
            variant.name,
            GROUP,
            variant.description,
            move || func(ASK, BID),
        ))?;
    }
    Ok(())
}
