//! Run configuration.
//!
//! A `RunConfig` is built once per execution, validated, and never changed
//! afterwards. Forked child processes receive it back as command line
//! arguments (see [`RunConfig::child_args`]).

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Benchmark mode. Only throughput is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "thrpt")]
    Throughput,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Throughput => f.pad("thrpt"),
        }
    }
}

/// Time unit used to express throughput (operations per unit)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Nanoseconds in one unit
    pub fn nanos(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1e9,
            TimeUnit::Millis => 1e6,
            TimeUnit::Micros => 1e3,
            TimeUnit::Nanos => 1.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "us",
            TimeUnit::Nanos => "ns",
        }
    }

    /// Report unit label, e.g. `ops/s`
    pub fn throughput_label(self) -> String {
        format!("ops/{}", self.suffix())
    }
}

impl FromStr for TimeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "ms" => Ok(TimeUnit::Millis),
            "us" => Ok(TimeUnit::Micros),
            "ns" => Ok(TimeUnit::Nanos),
            other => Err(ConfigError::TimeUnit(other.to_string())),
        }
    }
}

/// How each fork is isolated from the others
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Isolation {
    /// Re-execute the current binary for every fork. Only valid for the
    /// built-in registry, since the child rebuilds it from scratch.
    Process,
    /// Run every fork on a freshly spawned thread
    #[default]
    Thread,
}

impl FromStr for Isolation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Isolation::Process),
            "thread" => Ok(Isolation::Thread),
            other => Err(ConfigError::Isolation(other.to_string())),
        }
    }
}

/// Report output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for ResultFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ResultFormat::Text),
            "csv" => Ok(ResultFormat::Csv),
            "json" => Ok(ResultFormat::Json),
            _ => Err(ConfigError::ResultFormat(s.to_string())),
        }
    }
}

/// Order in which candidates are executed. Reports always follow
/// registration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionOrder {
    #[default]
    Registration,
    /// Shuffled, reproducible when a seed is given
    Shuffled(Option<u64>),
}

/// Configuration for one benchmark execution
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Measured forks per candidate (default: 1)
    pub forks: usize,
    /// Forks run first and discarded entirely (default: 1)
    pub warmup_forks: usize,
    /// Discarded iterations at the start of every fork (default: 5)
    pub warmup_iterations: usize,
    /// Measured iterations per fork (default: 5)
    pub measurement_iterations: usize,
    pub warmup_time: Duration,
    pub measurement_time: Duration,
    pub time_unit: TimeUnit,
    pub mode: Mode,
    pub isolation: Isolation,
    pub order: ExecutionOrder,
    pub result_format: ResultFormat,
    /// Pin the measuring thread to its current core
    pub pin_cpu: bool,
    /// Substring filter on candidate names
    pub filter: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            forks: 1,
            warmup_forks: 1,
            warmup_iterations: 5,
            measurement_iterations: 5,
            warmup_time: Duration::from_secs(1),
            measurement_time: Duration::from_secs(1),
            time_unit: TimeUnit::default(),
            mode: Mode::default(),
            isolation: Isolation::default(),
            order: ExecutionOrder::default(),
            result_format: ResultFormat::default(),
            pin_cpu: true,
            filter: None,
        }
    }
}

impl RunConfig {
    /// Reject configurations that cannot produce a measurement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forks == 0 {
            return Err(ConfigError::ZeroForks(self.forks));
        }
        if self.measurement_iterations == 0 {
            return Err(ConfigError::ZeroIterations(self.measurement_iterations));
        }
        if self.measurement_time.is_zero() {
            return Err(ConfigError::ZeroIterationTime("measurement"));
        }
        if self.warmup_iterations > 0 && self.warmup_time.is_zero() {
            return Err(ConfigError::ZeroIterationTime("warmup"));
        }
        Ok(())
    }

    /// Arguments that reproduce the per-fork part of this configuration in
    /// a child process.
    pub fn child_args(&self) -> Vec<String> {
        let mut args = vec![
            "--warmup-iterations".to_string(),
            self.warmup_iterations.to_string(),
            "--iterations".to_string(),
            self.measurement_iterations.to_string(),
            "--warmup-time".to_string(),
            format_duration(self.warmup_time),
            "--measurement-time".to_string(),
            format_duration(self.measurement_time),
        ];
        if !self.pin_cpu {
            args.push("--no-pin".to_string());
        }
        args
    }
}

/// Parse `500ms`, `1s`, `10us`, `250ns`. A bare number means seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| ConfigError::Duration(s.to_string()))?;
    let scale = match unit.trim() {
        "" | "s" => 1e9,
        "ms" => 1e6,
        "us" => 1e3,
        "ns" => 1.0,
        _ => return Err(ConfigError::Duration(s.to_string())),
    };

    let nanos = value * scale;
    if !nanos.is_finite() || nanos < 0.0 || nanos > u64::MAX as f64 {
        return Err(ConfigError::Duration(s.to_string()));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Lossless inverse of [`parse_duration`]
pub fn format_duration(d: Duration) -> String {
    format!("{}ns", d.as_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(RunConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_library_default_isolation_is_thread() {
        assert_eq!(RunConfig::default().isolation, Isolation::Thread);
        assert_eq!("process".parse::<Isolation>(), Ok(Isolation::Process));
    }

    #[test]
    fn test_zero_forks_rejected() {
        let config = RunConfig {
            forks: 0,
            ..RunConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroForks(0)));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = RunConfig {
            measurement_iterations: 0,
            ..RunConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations(0)));
    }

    #[test]
    fn test_zero_warmup_time_allowed_without_warmup() {
        let config = RunConfig {
            warmup_iterations: 0,
            warmup_time: Duration::ZERO,
            ..RunConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_duration("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("10us"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("250ns"), Ok(Duration::from_nanos(250)));
        assert_eq!(parse_duration("0.5s"), Ok(Duration::from_millis(500)));
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("10min").is_err());
    }

    #[test]
    fn test_child_args_reparse() {
        let config = RunConfig {
            warmup_time: Duration::from_millis(3),
            measurement_time: Duration::from_micros(1500),
            pin_cpu: false,
            ..RunConfig::default()
        };
        let args = config.child_args();
        assert_eq!(parse_duration(&args[5]), Ok(Duration::from_millis(3)));
        assert_eq!(parse_duration(&args[7]), Ok(Duration::from_micros(1500)));
        assert_eq!(args.last().map(String::as_str), Some("--no-pin"));
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("ms".parse::<TimeUnit>(), Ok(TimeUnit::Millis));
        assert_eq!(TimeUnit::Micros.throughput_label(), "ops/us");
        assert!("h".parse::<TimeUnit>().is_err());
    }
}
