//! # Finality-Bench
//!
//! Throughput micro-benchmarks comparing mutable and fixed bindings of
//! locals, parameters and call targets, run under a fork / warmup /
//! measurement protocol.

pub mod config;
pub mod error;
pub mod finality;
pub mod registry;
pub mod report;
pub mod utils;

pub use error::{HarnessError, Result};

/// Re-export tui from utils
pub use utils::tui;

/// Re-export run_benchmarks from utils::runner
pub use utils::runner::run_benchmarks;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{Isolation, ResultFormat, RunConfig, TimeUnit};
    pub use crate::registry::{build_registry, Candidate, CandidateRegistry};
    pub use crate::report::{CandidateResult, Outcome, Report};
    pub use crate::run_benchmarks;
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_candidates_verify() {
        crate::finality::verify_all().expect("candidate groups should verify");

        let registry = build_registry().unwrap();
        for candidate in registry.all() {
            assert_eq!(
                registry.invoke(candidate.name),
                Ok(crate::finality::EXPECTED),
                "candidate '{}' should return 29",
                candidate.name
            );
        }
    }
}
