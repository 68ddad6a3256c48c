//! Utility modules for measuring and reporting.

pub mod bench;
pub mod cpu_affinity;
pub mod fork;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use bench::{calculate_std_dev, compute_stats, confidence_half_width, Summary};
pub use cpu_affinity::CpuPinGuard;
pub use fork::{ForkExecutor, ForkSample, ProcessFork, ThreadFork};
pub use timer::{measure_fork, IterationSample, PhaseConfig};
