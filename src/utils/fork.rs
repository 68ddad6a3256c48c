//! Isolation units ("forks").
//!
//! Every fork runs one warmup + measurement cycle for one candidate with no
//! mutable state shared with other forks. Two executors exist:
//!
//! - [`ProcessFork`] re-executes the current binary with `--fork-child
//!   <name>`; the child writes one JSON [`ForkSample`] line to stdout.
//! - [`ThreadFork`] runs the cycle on a freshly spawned thread, for library
//!   use and tests where the binary cannot be re-executed.

use std::any::Any;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::timer::{measure_fork, IterationSample};
use crate::config::RunConfig;
use crate::error::{ConfigError, ForkError, RegistryError};
use crate::registry::{Candidate, CandidateRegistry};

/// Hidden CLI flag that turns the binary into a fork child
pub const CHILD_FLAG: &str = "--fork-child";

/// Measurement samples produced by one fork
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForkSample {
    pub candidate: String,
    pub iterations: Vec<IterationSample>,
}

/// Runs one fork of one candidate
pub trait ForkExecutor {
    fn run_fork(&self, candidate: &Candidate, config: &RunConfig) -> Result<ForkSample, ForkError>;

    /// Checked once before a run. Executors that cannot measure the
    /// candidates of `registry` faithfully reject it here.
    fn supports(&self, _registry: &CandidateRegistry) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Fork on a fresh OS thread
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadFork;

impl ForkExecutor for ThreadFork {
    fn run_fork(&self, candidate: &Candidate, config: &RunConfig) -> Result<ForkSample, ForkError> {
        let candidate = candidate.clone();
        let config = config.clone();

        let handle = std::thread::Builder::new()
            .name(format!("fork-{}", candidate.name))
            .spawn(move || ForkSample {
                candidate: candidate.name.to_string(),
                iterations: measure_fork(&candidate, &config),
            })
            .map_err(|e| ForkError::Spawn(e.to_string()))?;

        handle
            .join()
            .map_err(|payload| ForkError::Panicked(panic_message(payload.as_ref())))
    }
}

/// Fork by re-executing a harness binary
#[derive(Clone, Debug)]
pub struct ProcessFork {
    program: PathBuf,
}

impl ProcessFork {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Re-execute the running binary
    pub fn current() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }
}

impl ForkExecutor for ProcessFork {
    /// The child resolves names against `build_registry()`, so any other
    /// registry would be measured with the wrong thunks.
    fn supports(&self, registry: &CandidateRegistry) -> Result<(), ConfigError> {
        if registry.is_builtin() {
            Ok(())
        } else {
            Err(ConfigError::ProcessIsolation)
        }
    }

    fn run_fork(&self, candidate: &Candidate, config: &RunConfig) -> Result<ForkSample, ForkError> {
        let output = Command::new(&self.program)
            .arg(CHILD_FLAG)
            .arg(candidate.name)
            .args(config.child_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ForkError::Spawn(format!("{}: {}", self.program.display(), e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            debug!("[{} fork] {}", candidate.name, line);
        }

        if !output.status.success() {
            return Err(ForkError::Exited {
                status: output.status.to_string(),
                stderr: last_line(&stderr).unwrap_or("no output").to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = last_line(&stdout).ok_or_else(|| ForkError::Output("empty stdout".to_string()))?;
        let sample: ForkSample =
            serde_json::from_str(line).map_err(|e| ForkError::Output(e.to_string()))?;

        if sample.candidate != candidate.name {
            return Err(ForkError::Mismatch {
                expected: candidate.name.to_string(),
                got: sample.candidate,
            });
        }
        Ok(sample)
    }
}

/// Build the executor for the configured isolation
pub fn executor_for(config: &RunConfig) -> std::io::Result<Arc<dyn ForkExecutor + Send + Sync>> {
    Ok(match config.isolation {
        crate::config::Isolation::Process => Arc::new(ProcessFork::current()?),
        crate::config::Isolation::Thread => Arc::new(ThreadFork),
    })
}

/// Body of a fork child: measure `name` and write one JSON line to `out`.
pub fn child_main<W: Write>(
    registry: &CandidateRegistry,
    name: &str,
    config: &RunConfig,
    out: &mut W,
) -> crate::Result<()> {
    let candidate = registry
        .find(name)
        .ok_or_else(|| RegistryError::Unknown(name.to_string()))?;

    info!("fork child measuring {}", candidate.name);
    let sample = ForkSample {
        candidate: candidate.name.to_string(),
        iterations: measure_fork(candidate, config),
    };

    serde_json::to_writer(&mut *out, &sample)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn last_line(s: &str) -> Option<&str> {
    s.lines().rev().map(str::trim).find(|l| !l.is_empty())
}

/// Extract the message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_config() -> RunConfig {
        RunConfig {
            warmup_iterations: 1,
            measurement_iterations: 2,
            warmup_time: Duration::from_millis(1),
            measurement_time: Duration::from_millis(1),
            pin_cpu: false,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_thread_fork_produces_samples() {
        let candidate = Candidate::new("ok", "test", "", || 29);
        let sample = ThreadFork.run_fork(&candidate, &quick_config()).unwrap();
        assert_eq!(sample.candidate, "ok");
        assert_eq!(sample.iterations.len(), 2);
    }

    #[test]
    fn test_thread_fork_reports_panic() {
        let candidate = Candidate::new("boom", "test", "", || panic!("candidate exploded"));
        let err = ThreadFork.run_fork(&candidate, &quick_config()).unwrap_err();
        assert_eq!(err, ForkError::Panicked("candidate exploded".to_string()));
    }

    #[test]
    fn test_child_main_writes_json_line() {
        let registry = crate::registry::build_registry().unwrap();
        let mut out = Vec::new();
        child_main(&registry, "ff", &quick_config(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let sample: ForkSample = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(sample.candidate, "ff");
        assert_eq!(sample.iterations.len(), 2);
    }

    #[test]
    fn test_child_main_unknown_candidate() {
        let registry = crate::registry::build_registry().unwrap();
        let mut out = Vec::new();
        let err = child_main(&registry, "missing", &quick_config(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            crate::HarnessError::Registry(RegistryError::Unknown(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let fork = ProcessFork::new("/nonexistent/finality-bench");
        let candidate = Candidate::new("ok", "test", "", || 29);
        let err = fork.run_fork(&candidate, &quick_config()).unwrap_err();
        assert!(matches!(err, ForkError::Spawn(_)));
    }

    #[test]
    fn test_process_fork_rejects_custom_registry() {
        let fork = ProcessFork::new("/nonexistent/finality-bench");
        let mut registry = CandidateRegistry::new();
        registry.register("ff", || panic!("not the built-in ff")).unwrap();
        assert_eq!(fork.supports(&registry), Err(ConfigError::ProcessIsolation));

        let builtin = crate::registry::build_registry().unwrap();
        assert_eq!(fork.supports(&builtin), Ok(()));
        assert_eq!(ThreadFork.supports(&registry), Ok(()));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_child_is_exit_error() {
        let fork = ProcessFork::new("/bin/false");
        let candidate = Candidate::new("ok", "test", "", || 29);
        let err = fork.run_fork(&candidate, &quick_config()).unwrap_err();
        assert!(matches!(err, ForkError::Exited { .. }), "got {:?}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_json_child_output_is_output_error() {
        // echo prints its arguments back, which is not a ForkSample
        let fork = ProcessFork::new("/bin/echo");
        let candidate = Candidate::new("ok", "test", "", || 29);
        let err = fork.run_fork(&candidate, &quick_config()).unwrap_err();
        assert!(matches!(err, ForkError::Output(_)), "got {:?}", err);
    }
}
