//! Per-candidate results and machine-readable report formats.

use std::io::Write;

use serde::Serialize;

use crate::config::{Mode, TimeUnit};
use crate::utils::bench::compute_stats;
use crate::utils::fork::ForkSample;

/// Outcome of measuring one candidate
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Completed {
        /// Iteration samples pooled across all successful forks
        samples: usize,
        /// Mean throughput
        score: f64,
        /// Half-width of the 99.9% confidence interval
        error: f64,
        unit: String,
        failed_forks: usize,
    },
    Failed {
        reason: String,
    },
}

/// Result row for one candidate
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateResult {
    pub name: String,
    pub mode: Mode,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl CandidateResult {
    pub fn failed(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            mode: Mode::Throughput,
            outcome: Outcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Pool the iteration samples of successful measured forks.
///
/// Returns a failed result when no fork succeeded.
pub fn aggregate(
    name: &str,
    forks: &[ForkSample],
    failures: &[String],
    unit: TimeUnit,
) -> CandidateResult {
    let throughputs: Vec<f64> = forks
        .iter()
        .flat_map(|f| f.iterations.iter())
        .map(|s| s.throughput(unit.nanos()))
        .collect();

    if throughputs.is_empty() {
        let reason = failures
            .last()
            .cloned()
            .unwrap_or_else(|| "no samples recorded".to_string());
        return CandidateResult::failed(name, reason);
    }

    let stats = compute_stats(&throughputs);
    CandidateResult {
        name: name.to_string(),
        mode: Mode::Throughput,
        outcome: Outcome::Completed {
            samples: stats.samples,
            score: stats.mean,
            error: stats.error,
            unit: unit.throughput_label(),
            failed_forks: failures.len(),
        },
    }
}

/// All results of one run, in registration order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Report {
    pub results: Vec<CandidateResult>,
}

impl Report {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    pub fn find(&self, name: &str) -> Option<&CandidateResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Write the report as CSV
pub fn write_csv<W: Write>(out: &mut W, report: &Report) -> std::io::Result<()> {
    writeln!(out, "benchmark,mode,samples,score,error,units,status")?;

    for result in &report.results {
        match &result.outcome {
            Outcome::Completed {
                samples,
                score,
                error,
                unit,
                ..
            } => writeln!(
                out,
                "{},{},{},{},{},{},ok",
                result.name, result.mode, samples, score, error, unit
            )?,
            Outcome::Failed { reason } => writeln!(
                out,
                "{},{},0,,,,\"failed: {}\"",
                result.name,
                result.mode,
                csv_reason(reason)
            )?,
        }
    }
    Ok(())
}

/// One-line, quote-escaped form of a failure reason. Panic messages may
/// span several lines and must not break the one-row-per-candidate shape.
fn csv_reason(reason: &str) -> String {
    reason
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
        .replace('"', "\"\"")
}

/// Write the report as pretty-printed JSON
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
