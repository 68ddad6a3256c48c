//! CLI for running the finality benchmarks.
//!
//! Usage:
//!   finality-bench                      # Run all candidates
//!   finality-bench --list               # List available candidates
//!   finality-bench subtracter           # Run candidates matching a filter
//!   finality-bench -f 2 -i 10 -r 500ms  # Two forks, ten 500 ms iterations
//!   finality-bench --rf json            # Machine-readable report

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;

use finality_bench::config::{
    parse_duration, ExecutionOrder, Isolation, ResultFormat, RunConfig, TimeUnit,
};
use finality_bench::registry::build_registry;
use finality_bench::report::{write_csv, write_json, Report};
use finality_bench::utils::fork;
use finality_bench::utils::runner::select_candidates;
use finality_bench::{run_benchmarks, tui};

#[derive(Parser, Debug)]
#[command(name = "finality-bench", version, about = "Throughput benchmarks for mutable vs fixed bindings", long_about = None)]
struct Args {
    /// Measured forks per candidate
    #[arg(short = 'f', long, default_value_t = 1)]
    forks: usize,

    /// Forks run first and discarded
    #[arg(long, visible_alias = "wf", default_value_t = 1)]
    warmup_forks: usize,

    /// Warmup iterations per fork
    #[arg(long, visible_alias = "wi", default_value_t = 5)]
    warmup_iterations: usize,

    /// Measurement iterations per fork
    #[arg(short = 'i', long, default_value_t = 5)]
    iterations: usize,

    /// Length of one warmup iteration (e.g. 500ms, 1s)
    #[arg(short = 'w', long, default_value = "1s", value_parser = parse_duration)]
    warmup_time: Duration,

    /// Length of one measurement iteration
    #[arg(short = 'r', long, default_value = "1s", value_parser = parse_duration)]
    measurement_time: Duration,

    /// Throughput time unit: s, ms, us or ns
    #[arg(long, visible_alias = "tu", default_value = "s")]
    time_unit: TimeUnit,

    /// Report format: text, csv or json
    #[arg(long, visible_alias = "rf", default_value = "text")]
    result_format: ResultFormat,

    /// Fork isolation: process or thread
    #[arg(long, default_value = "process")]
    isolation: Isolation,

    /// Run candidates in random order (report keeps registration order)
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle; implies --shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Do not pin the measuring thread to a CPU core
    #[arg(long)]
    no_pin: bool,

    /// Exit with status 2 if any candidate failed
    #[arg(long)]
    fail_on_error: bool,

    /// List available candidates
    #[arg(short, long)]
    list: bool,

    /// Check every candidate returns the expected value, then exit
    #[arg(long)]
    verify: bool,

    #[arg(long = "fork-child", hide = true)]
    fork_child: Option<String>,

    /// Only run candidates whose name contains FILTER
    filter: Option<String>,
}

impl Args {
    fn to_config(&self) -> RunConfig {
        let order = if self.shuffle || self.seed.is_some() {
            ExecutionOrder::Shuffled(self.seed)
        } else {
            ExecutionOrder::Registration
        };

        RunConfig {
            forks: self.forks,
            warmup_forks: self.warmup_forks,
            warmup_iterations: self.warmup_iterations,
            measurement_iterations: self.iterations,
            warmup_time: self.warmup_time,
            measurement_time: self.measurement_time,
            time_unit: self.time_unit,
            isolation: self.isolation,
            order,
            result_format: self.result_format,
            pin_cpu: !self.no_pin,
            filter: self.filter.clone(),
            ..RunConfig::default()
        }
    }
}

fn emit(report: &Report, format: ResultFormat) -> finality_bench::Result<()> {
    if format == ResultFormat::Text {
        println!();
        tui::print_results_table(report);
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        ResultFormat::Csv => write_csv(&mut out, report)?,
        _ => write_json(&mut out, report)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Every startup error exits with 1; clap's own code (2) is reserved
    // for --fail-on-error.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::from(1);
            }
        },
    };
    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("failed to build candidate registry: {}", e);
            return ExitCode::from(1);
        }
    };
    let config = args.to_config();

    if let Some(name) = &args.fork_child {
        let stdout = std::io::stdout();
        return match fork::child_main(&registry, name, &config, &mut stdout.lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("fork child for '{}' failed: {}", name, e);
                ExitCode::from(1)
            }
        };
    }

    if args.list {
        tui::print_available_candidates(&registry);
        return ExitCode::SUCCESS;
    }

    if args.verify {
        let checks = finality_bench::finality::verify_all()
            .map_err(|e| e.to_string())
            .and_then(|()| registry.verify().map_err(|e| e.to_string()));
        return match checks {
            Ok(()) => {
                println!("All {} candidates verified.", registry.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("verification failed: {}", e);
                ExitCode::from(1)
            }
        };
    }

    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        return ExitCode::from(1);
    }

    if config.result_format == ResultFormat::Text {
        tui::print_header();
        let selected = select_candidates(&registry, &config).map_or(0, |c| c.len());
        tui::print_config_box(&config, selected);
    }

    let report = match run_benchmarks(&registry, &config) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = emit(&report, config.result_format) {
        error!("failed to write report: {}", e);
        return ExitCode::from(1);
    }

    let failed = report.failed_count();
    if failed > 0 {
        log::warn!("{} of {} candidate(s) failed", failed, report.results.len());
        if args.fail_on_error {
            return ExitCode::from(2);
        }
    }
    ExitCode::SUCCESS
}
