//! Cache simulator CLI.
//!
//! This binary is a thin front end over `cachesim-core`. It provides:
//! 1. **Run:** Replay a trace against one configuration and print one CSV row.
//! 2. **Interactive:** Prompt for the configuration on stdin (the default with no subcommand).
//! 3. **Generate:** Write a canned access-pattern trace.
//! 4. **Sweep:** Run a grid of configurations over one trace into a results CSV.
//!
//! Results go to stdout; logs go to stderr.

mod interactive;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Associativity, CacheConfig, ReplacementPolicy, defaults};
use cachesim_core::sim::{self, ExperimentReport, SweepPlan};
use cachesim_core::trace::{self, generator, generator::Pattern};
use cachesim_core::{Result, SimError, SimulationResult};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven cache hit-rate simulator",
    long_about = "Replay a memory-access trace against a configurable cache and report hits.\n\nExamples:\n  cachesim run 10 4 4way lru trace.txt\n  cachesim generate random 5000 -o trace.txt\n  cachesim sweep --trace trace.txt --output results.csv\n  cachesim            (interactive prompts)"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace against one configuration and print a CSV row.
    Run(RunArgs),

    /// Replay a trace against a configuration read from a JSON file.
    RunConfig {
        /// JSON file with `cache_size_exp`, `line_size_exp`, `associativity`, `policy`.
        config: PathBuf,

        /// Trace file to replay.
        trace: PathBuf,

        /// Print the result as JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for the configuration and trace file on stdin.
    Interactive,

    /// Write a canned access-pattern trace.
    Generate {
        /// sequential, repeated, random, or mixed (unknown names fall back to sequential).
        #[arg(default_value = "sequential")]
        pattern: String,

        /// Number of records.
        #[arg(default_value_t = defaults::TRACE_LENGTH)]
        count: usize,

        /// Output file.
        #[arg(short, long, default_value = defaults::TRACE_FILE)]
        output: PathBuf,

        /// Seed for the random pattern.
        #[arg(long, default_value_t = defaults::TRACE_SEED)]
        seed: u64,
    },

    /// Run the default configuration grid over one trace.
    Sweep {
        /// Trace file to replay.
        #[arg(short, long, default_value = defaults::TRACE_FILE)]
        trace: PathBuf,

        /// Results CSV to write.
        #[arg(short, long, default_value = defaults::RESULTS_FILE)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Cache size as a power-of-two exponent of bytes.
    cache_size_exp: u32,

    /// Line size as a power-of-two exponent of bytes.
    line_size_exp: u32,

    /// direct, 2way, 4way, 8way, 16way, or fully.
    associativity: String,

    /// lru or fifo.
    policy: String,

    /// Trace file to replay.
    trace: PathBuf,

    /// Print the result as JSON instead of CSV.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::RunConfig {
            config,
            trace,
            json,
        }) => cmd_run_config(&config, &trace, json),
        Some(Commands::Interactive) | None => {
            interactive::run(&mut io::stdin().lock(), &mut io::stdout())
        }
        Some(Commands::Generate {
            pattern,
            count,
            output,
            seed,
        }) => cmd_generate(&pattern, count, &output, seed),
        Some(Commands::Sweep { trace, output }) => cmd_sweep(&trace, &output),
    };

    if let Err(e) = outcome {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Validates the positional parameters and replays the trace.
///
/// The configuration is checked before the trace is opened.
fn cmd_run(args: &RunArgs) -> Result<()> {
    let associativity: Associativity = args.associativity.parse()?;
    let policy: ReplacementPolicy = args.policy.parse()?;
    let config = CacheConfig::new(
        args.cache_size_exp,
        args.line_size_exp,
        associativity,
        policy,
    )?;
    let result = sim::run_file(&config, &args.trace)?;
    print_result(&result, args.json)
}

fn cmd_run_config(config_path: &Path, trace_path: &Path, json: bool) -> Result<()> {
    let text = fs::read_to_string(config_path).map_err(|e| {
        SimError::config(format!("cannot read '{}': {e}", config_path.display()))
    })?;
    let config = CacheConfig::from_json(&text)?;
    let result = sim::run_file(&config, trace_path)?;
    print_result(&result, json)
}

fn print_result(result: &SimulationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", result.csv_row());
    }
    Ok(())
}

fn cmd_generate(pattern: &str, count: usize, output: &Path, seed: u64) -> Result<()> {
    let pattern = Pattern::parse_or_default(pattern);
    generator::write_trace_file(output, pattern, count, seed)?;
    println!(
        "Generated {} with {count} {pattern} memory accesses",
        output.display()
    );
    Ok(())
}

/// Loads the trace once, then runs every experiment of the default plan.
fn cmd_sweep(trace_path: &Path, output: &Path) -> Result<()> {
    let records = trace::load(trace_path)?;
    let plan = SweepPlan::default();

    println!("Running cache simulation experiments...");
    let summary = plan.run_to_file(&records, output, report_progress)?;
    println!(
        "\nExperiments complete ({} run, {} failed). Results saved to {}",
        summary.completed,
        summary.failed,
        output.display()
    );
    Ok(())
}

fn report_progress(report: &ExperimentReport) {
    let e = &report.experiment;
    let status = match &report.outcome {
        Ok(_) => "Done".to_string(),
        Err(err) => format!("Error: {err}"),
    };
    println!(
        "Experiment {}/{}: Cache={}B, Line={}B, Assoc={}, Policy={}... {status}",
        report.index,
        report.total,
        1u64 << e.cache_size_exp,
        1u64 << e.line_size_exp,
        e.associativity,
        e.policy.label(),
    );
}
