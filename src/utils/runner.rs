//! Measurement driver.
//!
//! For every selected candidate: run the warmup forks (discarded), then the
//! measured forks, and pool the measured iteration samples into one
//! [`CandidateResult`]. A failing candidate or fork never aborts the run.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::fork::{executor_for, ForkExecutor, ForkSample};
use crate::config::{ExecutionOrder, RunConfig};
use crate::error::ConfigError;
use crate::registry::{Candidate, CandidateRegistry};
use crate::report::{aggregate, CandidateResult, Report};

/// Candidates selected by the configured filter, in registration order.
pub fn select_candidates<'a>(
    registry: &'a CandidateRegistry,
    config: &RunConfig,
) -> Result<Vec<&'a Candidate>, ConfigError> {
    let selected: Vec<&Candidate> = match &config.filter {
        Some(pattern) => registry.filtered(pattern),
        None => registry.all().iter().collect(),
    };
    if selected.is_empty() {
        return Err(ConfigError::NoMatch(
            config.filter.clone().unwrap_or_default(),
        ));
    }
    Ok(selected)
}

/// Indices `0..len` in execution order
pub fn execution_order(len: usize, order: ExecutionOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    if let ExecutionOrder::Shuffled(seed) = order {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        indices.shuffle(&mut rng);
    }
    indices
}

/// Run every fork of one candidate and aggregate the measured ones.
pub fn run_candidate(
    candidate: &Candidate,
    config: &RunConfig,
    executor: &dyn ForkExecutor,
) -> CandidateResult {
    for wf in 0..config.warmup_forks {
        info!(
            "{}: warmup fork {}/{}",
            candidate.name,
            wf + 1,
            config.warmup_forks
        );
        if let Err(e) = executor.run_fork(candidate, config) {
            warn!("{}: warmup fork {} failed: {}", candidate.name, wf + 1, e);
        }
    }

    let mut samples: Vec<ForkSample> = Vec::with_capacity(config.forks);
    let mut failures: Vec<String> = Vec::new();
    for fork in 0..config.forks {
        info!("{}: fork {}/{}", candidate.name, fork + 1, config.forks);
        match executor.run_fork(candidate, config) {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                warn!("{}: fork {} failed: {}", candidate.name, fork + 1, e);
                failures.push(e.to_string());
            }
        }
    }

    let result = aggregate(candidate.name, &samples, &failures, config.time_unit);
    if result.is_failed() {
        warn!("{}: all {} fork(s) failed", candidate.name, config.forks);
    }
    result
}

/// Run the selected candidates with an explicit executor.
pub fn run_with_executor(
    registry: &CandidateRegistry,
    config: &RunConfig,
    executor: &dyn ForkExecutor,
) -> crate::Result<Report> {
    config.validate()?;
    executor.supports(registry)?;
    let candidates = select_candidates(registry, config)?;

    let mut results: Vec<Option<CandidateResult>> = vec![None; candidates.len()];
    for idx in execution_order(candidates.len(), config.order) {
        results[idx] = Some(run_candidate(candidates[idx], config, executor));
    }

    Ok(Report {
        results: results.into_iter().flatten().collect(),
    })
}

/// Run the selected candidates with the configured isolation.
pub fn run_benchmarks(registry: &CandidateRegistry, config: &RunConfig) -> crate::Result<Report> {
    config.validate()?;
    let executor = executor_for(config)?;
    run_with_executor(registry, config, executor.as_ref())
}
