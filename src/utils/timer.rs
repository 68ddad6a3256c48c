//! Timed iterations for a single fork.
//!
//! One fork runs a warmup phase (samples discarded) followed by a
//! measurement phase. Each iteration calls the candidate in doubling
//! batches between clock reads until the iteration time has elapsed.

use std::hint::black_box;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::bench::{elapsed, now};
use super::cpu_affinity::CpuPinGuard;
use crate::config::RunConfig;
use crate::registry::Candidate;

/// Upper bound on calls between two clock reads
pub const MAX_BATCH: u64 = 1 << 16;

/// Operations completed in one timed iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSample {
    pub ops: u64,
    pub nanos: u64,
}

impl IterationSample {
    /// Throughput in operations per `unit_nanos` nanoseconds
    pub fn throughput(&self, unit_nanos: f64) -> f64 {
        self.ops as f64 * unit_nanos / self.nanos.max(1) as f64
    }
}

/// Iteration count and length of one phase
#[derive(Clone, Copy, Debug)]
pub struct PhaseConfig {
    pub iterations: usize,
    pub time: Duration,
}

impl PhaseConfig {
    pub fn warmup(config: &RunConfig) -> Self {
        Self {
            iterations: config.warmup_iterations,
            time: config.warmup_time,
        }
    }

    pub fn measurement(config: &RunConfig) -> Self {
        Self {
            iterations: config.measurement_iterations,
            time: config.measurement_time,
        }
    }
}

/// Run `candidate` repeatedly for at least `time`.
pub fn run_iteration(candidate: &Candidate, time: Duration) -> IterationSample {
    let mut ops: u64 = 0;
    let mut batch: u64 = 1;
    let start = now();

    loop {
        for _ in 0..batch {
            black_box(candidate.invoke());
        }
        ops += batch;

        let spent = elapsed(start);
        if spent >= time {
            return IterationSample {
                ops,
                nanos: spent.as_nanos().min(u64::MAX as u128) as u64,
            };
        }
        if batch < MAX_BATCH {
            batch *= 2;
        }
    }
}

/// Run all iterations of one phase.
pub fn run_phase(candidate: &Candidate, phase: PhaseConfig, label: &str) -> Vec<IterationSample> {
    (0..phase.iterations)
        .map(|i| {
            let sample = run_iteration(candidate, phase.time);
            debug!(
                "{} {} iteration {}/{}: {} ops in {} ns",
                candidate.name,
                label,
                i + 1,
                phase.iterations,
                sample.ops,
                sample.nanos
            );
            sample
        })
        .collect()
}

/// Warm up, then measure. Only measurement samples are returned.
pub fn measure_fork(candidate: &Candidate, config: &RunConfig) -> Vec<IterationSample> {
    let _pin = config.pin_cpu.then(CpuPinGuard::new);

    black_box(run_phase(candidate, PhaseConfig::warmup(config), "warmup"));
    run_phase(candidate, PhaseConfig::measurement(config), "measurement")
}
