//! qroute Command-Line Interface
//!
//! Runs the single-step quantum routing heuristic on the local statevector
//! simulator and prints the resulting routes.
//!
//! ```text
//! qroute                          # solve the built-in 4-customer example
//! qroute solve --problem p.yaml   # solve an instance from a file
//! qroute example > p.yaml         # dump the built-in example for editing
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use qroute_adapter_sim::StatevectorSimulator;
use qroute_hal::Simulator;
use qroute_vrp::{ProblemInstance, VrpPipeline};

mod config;
mod output;

use config::SolverConfig;
use output::{DocumentFormat, SolveFormat};

/// qroute - single-step quantum heuristic for vehicle routing
#[derive(Parser)]
#[command(name = "qroute")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `solve` with the built-in example
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode, optimize, measure and price a routing problem
    Solve(SolveArgs),

    /// Print the built-in example problem
    Example {
        /// Document format
        #[arg(short, long, value_enum, default_value_t = DocumentFormat::Yaml)]
        format: DocumentFormat,
    },
}

#[derive(Args, Default)]
struct SolveArgs {
    /// Problem file (JSON or YAML); the built-in example if omitted
    #[arg(short, long)]
    problem: Option<String>,

    /// Number of measurement shots
    #[arg(short, long)]
    shots: Option<u32>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Largest circuit the simulator accepts
    #[arg(long)]
    max_qubits: Option<u32>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = SolveFormat::Table)]
    format: SolveFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Solve(args)) => solve(&args, cli.verbose),
        None => solve(&SolveArgs::default(), cli.verbose),
        Some(Commands::Example { format }) => {
            init_logging(log_filter(cli.verbose, "warn"));
            example(format)
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Pick the log filter from `-v` flags, falling back to the configured level.
fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_lowercase(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_logging(filter: String) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply command-line overrides on top of the loaded configuration.
fn resolve_config(args: &SolveArgs) -> Result<SolverConfig> {
    let mut config =
        SolverConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(shots) = args.shots {
        config.shots = shots;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_qubits) = args.max_qubits {
        config.max_qubits = max_qubits;
    }

    config.validate().context("Invalid command-line options")?;
    Ok(config)
}

fn load_problem(path: Option<&str>) -> Result<ProblemInstance> {
    match path {
        Some(path) => ProblemInstance::from_file(path)
            .with_context(|| format!("Failed to load problem from '{path}'")),
        None => Ok(ProblemInstance::example()),
    }
}

fn solve(args: &SolveArgs, verbose: u8) -> Result<()> {
    let config = resolve_config(args)?;
    init_logging(log_filter(verbose, &config.log_level));
    debug!("Configuration: {:?}", config);

    let problem = load_problem(args.problem.as_deref())?;

    let mut simulator = StatevectorSimulator::new().with_max_qubits(config.max_qubits);
    if let Some(seed) = config.seed {
        simulator = simulator.with_seed(seed);
    }
    let pipeline = VrpPipeline::new(simulator).with_shots(config.shots);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!(
        "Simulating {} qubits on {}...",
        problem.num_customers() * problem.num_vehicles(),
        pipeline.simulator().name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let solution = pipeline.solve(&problem);
    spinner.finish_and_clear();
    let solution = solution.context("Routing pipeline failed")?;

    print!("{}", output::render_solution(&problem, &solution, args.format)?);
    Ok(())
}

fn example(format: DocumentFormat) -> Result<()> {
    print!("{}", output::render_problem(&ProblemInstance::example(), format)?);
    Ok(())
}
