//! Error types for the harness.

use thiserror::Error;

/// Harness-wide Result type.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Invalid run configuration. Raised before any measurement starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fork count must be at least 1 (got {0})")]
    ZeroForks(usize),
    #[error("measurement iteration count must be at least 1 (got {0})")]
    ZeroIterations(usize),
    #[error("{0} iteration time must be greater than zero")]
    ZeroIterationTime(&'static str),
    #[error("malformed duration '{0}' (expected e.g. 500ms, 1s, 10us)")]
    Duration(String),
    #[error("unknown time unit '{0}' (expected s, ms, us or ns)")]
    TimeUnit(String),
    #[error("unknown result format '{0}' (expected text, csv or json)")]
    ResultFormat(String),
    #[error("unknown isolation '{0}' (expected process or thread)")]
    Isolation(String),
    #[error("filter '{0}' matches no registered candidate")]
    NoMatch(String),
    #[error("process isolation only runs the built-in candidates; use thread isolation for a custom registry")]
    ProcessIsolation,
}

/// Candidate registry failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("candidate '{0}' is already registered")]
    Duplicate(String),
    #[error("no candidate named '{0}'")]
    Unknown(String),
    #[error("candidate '{name}' is not deterministic: {first} then {second}")]
    Nondeterministic {
        name: String,
        first: i32,
        second: i32,
    },
}

/// Failure of one isolation unit (a forked process or thread).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForkError {
    #[error("failed to spawn fork: {0}")]
    Spawn(String),
    #[error("candidate panicked: {0}")]
    Panicked(String),
    #[error("fork exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },
    #[error("malformed fork output: {0}")]
    Output(String),
    #[error("fork reported samples for '{got}' instead of '{expected}'")]
    Mismatch { expected: String, got: String },
}

/// Top-level error returned by harness entry points.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("fork error: {0}")]
    Fork(#[from] ForkError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
