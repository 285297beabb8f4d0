use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use calculator::config::HarnessConfig;
use calculator::error::HarnessError;
use calculator::harness::logger::HarnessLogger;
use calculator::harness::reports::ReportGenerator;
use calculator::harness::runner::HarnessRunner;
use calculator::harness::scenarios;
use calculator::harness::types::{ReportFormat, RunReport};

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the addition cases (the default when no subcommand is given).
    Run(RunArgs),
    /// List the cases in execution order.
    List,
    /// Write the default configuration as TOML.
    InitConfig {
        #[arg(long, default_value = "calculator.toml")]
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run only the named case; repeatable.
    #[arg(long = "case")]
    cases: Vec<String>,
    #[arg(long)]
    keep_going: bool,
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
    #[arg(long)]
    output: Option<String>,
    /// Sample the commutativity and associativity properties N times.
    #[arg(long)]
    properties: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    dotenv().ok();
    let log_handle = init_tracing();
    let cli = Cli::parse();

    dispatch(cli, &log_handle).inspect_err(|e| {
        if let Some(e) = e.downcast_ref::<HarnessError>() {
            e.log();
        }
    })
}

fn dispatch(cli: Cli, log_handle: &LogHandle) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run(args, log_handle),
        Some(Commands::List) => {
            for scenario in scenarios::all() {
                println!(
                    "{:<24} {:<46} {}",
                    scenario.name, scenario.summary, scenario.description
                );
            }
            Ok(())
        }
        Some(Commands::InitConfig { path, force }) => {
            if path.exists() && !force {
                HarnessLogger::fix("Pass --force to overwrite it.");
                return Err(HarnessError::Validation(format!(
                    "refusing to overwrite {}",
                    path.display()
                ))
                .into());
            }
            HarnessConfig::default().write_toml(&path)?;
            HarnessLogger::info(&format!("Config saved to {}", path.display()));
            Ok(())
        }
        None => run(RunArgs::default(), log_handle),
    }
}

fn run(args: RunArgs, log_handle: &LogHandle) -> Result<()> {
    let mut config = HarnessConfig::load(args.config.as_deref())?;
    if !args.cases.is_empty() {
        config.cases = args.cases;
    }
    if args.keep_going {
        config.fail_fast = false;
    }
    if let Some(format) = args.format {
        config.report_format = format;
    }
    if args.output.is_some() {
        config.report_output_path = args.output;
    }
    if let Some(samples) = args.properties {
        config.property_samples = samples;
    }
    if let Some(seed) = args.seed {
        config.property_seed = seed;
    }

    apply_log_level(log_handle, &config.log_level);

    let selected = scenarios::select(scenarios::all(), &config.cases)?;
    let runner = HarnessRunner::new(config.clone());
    let report = runner.run_all(&selected).inspect_err(|_| {
        HarnessLogger::fix("Check the add implementation against the failing case.");
    })?;

    let rendered = ReportGenerator::new().generate_report(
        &report,
        config.report_format,
        config.report_output_path.as_deref(),
    )?;
    if config.report_output_path.is_none() && config.report_format != ReportFormat::Console {
        println!("{}", rendered);
    }

    match run_failure(&report) {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn run_failure(report: &RunReport) -> Option<HarnessError> {
    if report.failed_cases > 0 {
        return Some(HarnessError::RunFailed {
            failed: report.failed_cases,
            total: report.total_cases,
        });
    }
    report
        .properties
        .iter()
        .find(|p| !p.holds)
        .map(|p| HarnessError::PropertyViolated {
            property: p.property.clone(),
            counterexample: p.counterexample.clone().unwrap_or_default(),
        })
}

type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Installs the stderr subscriber before any command runs. `RUST_LOG` wins;
/// otherwise the level starts at `warn` until a config file is loaded.
fn init_tracing() -> LogHandle {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

fn apply_log_level(handle: &LogHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(level)) {
        warn!(error = %e, "Failed to apply configured log level");
    }
}
