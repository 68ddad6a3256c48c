//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use std::io::Write;

use terminal_size::{terminal_size, Width};

use crate::config::RunConfig;
use crate::registry::CandidateRegistry;
use crate::report::{Outcome, Report};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Width of the benchmark name column: wide enough for the longest name,
/// narrowed on small terminals.
fn name_column_width(report: &Report, term_width: usize) -> usize {
    let longest = report
        .results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Benchmark".len());
    // Mode, Cnt, Score, Error, Units take 6 + 5 + 16 + 16 + 10 + 5 spaces.
    let fixed_width = 58;
    longest.min(term_width.saturating_sub(fixed_width).max(15))
}

/// Write the results table: one row per candidate
pub fn write_results_table<W: Write>(
    out: &mut W,
    report: &Report,
    term_width: usize,
) -> std::io::Result<()> {
    let name_width = name_column_width(report, term_width);

    writeln!(
        out,
        "{:<nw$} {:>6} {:>5} {:>16} {:>16}  {:<10}",
        "Benchmark",
        "Mode",
        "Cnt",
        "Score",
        "Error",
        "Units",
        nw = name_width
    )?;

    for result in &report.results {
        let name = truncate(&result.name, name_width);
        match &result.outcome {
            Outcome::Completed {
                samples,
                score,
                error,
                unit,
                failed_forks,
            } => {
                write!(
                    out,
                    "{:<nw$} {:>6} {:>5} {:>16.3} ± {:>14.3}  {:<10}",
                    name,
                    result.mode,
                    samples,
                    score,
                    error,
                    unit,
                    nw = name_width
                )?;
                if *failed_forks > 0 {
                    write!(out, " ({} fork(s) failed)", failed_forks)?;
                }
                writeln!(out)?;
            }
            Outcome::Failed { reason } => writeln!(
                out,
                "{:<nw$} {:>6} {:>5} {:>16}   {:>14}  {}",
                name,
                result.mode,
                0,
                "FAILED",
                "",
                reason,
                nw = name_width
            )?,
        }
    }
    Ok(())
}

/// Print the results table to stdout
pub fn print_results_table(report: &Report) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    if let Err(e) = write_results_table(&mut lock, report, get_term_width()) {
        log::error!("failed to write results table: {}", e);
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80); // Cap header at 80
    let title = " Finality Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the run configuration in a box, before measuring
pub fn print_config_box(config: &RunConfig, candidates: usize) {
    let lines = [
        format!(
            "Forks: {} (+{} warmup)   Candidates: {}",
            config.forks, config.warmup_forks, candidates
        ),
        format!(
            "Warmup: {} x {:?}   Measurement: {} x {:?}",
            config.warmup_iterations,
            config.warmup_time,
            config.measurement_iterations,
            config.measurement_time
        ),
        format!(
            "Mode: {}   Units: {}   Isolation: {:?}",
            config.mode,
            config.time_unit.throughput_label(),
            config.isolation
        ),
    ];

    let max_content_width = get_term_width().saturating_sub(4).max(40);
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for line in &lines {
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print the list of available candidates
pub fn print_available_candidates(registry: &CandidateRegistry) {
    println!("Available candidates:");
    println!();
    for candidate in registry.all() {
        println!(
            "  {:<22} [{}] - {}",
            candidate.name, candidate.group, candidate.description
        );
    }
}
