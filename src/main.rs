// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ising Bench CLI
//!
//! Evaluates assignments of bqpjson Ising instances and tabulates solver
//! benchmark logs.
//!
//! # Usage
//!
//! ```bash
//! # Energy of the solution reported in a solver log
//! ising-bench evaluate -i instance.json -r run.stdout
//!
//! # Best of 10000 random spin assignments on 4 workers
//! ising-bench sample -i instance.json -n 10000 --workers 4 --seed 7
//!
//! # Best-energy table of an experiment directory
//! ising-bench tabulate -i results/ -o tables/best_energy.csv
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ising_bench::bqpjson::load_instance;
use ising_bench::config::{Config, LoggingConfig};
use ising_bench::energy::{compute_energy, scaled_energy, Assignment};
use ising_bench::results::log::read_solution_values;
use ising_bench::results::{collect_records, write_records_csv, BestEnergyTable};
use ising_bench::sampling::{evaluate_random_solution, sample_random_parallel};
use ising_bench::validation::{validate_assignment_values, validate_num_reads};
use ising_bench::{Result, VERSION};

/// Ising instance evaluation and solver benchmark tabulation
#[derive(Parser)]
#[command(name = "ising-bench")]
#[command(author = "Ising Bench Contributors")]
#[command(version = VERSION)]
#[command(about = "Evaluate bqpjson Ising instances and tabulate solver results")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the energy of the solution in a solver log
    Evaluate {
        /// bqpjson instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Solver log containing a BQP_SOLUTION line
        #[arg(short, long)]
        result: PathBuf,

        /// Also print the scaled bqpjson objective
        #[arg(long)]
        scaled: bool,
    },

    /// Energy of one uniformly random spin assignment
    Random {
        /// bqpjson instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Best energy over many random spin assignments
    Sample {
        /// bqpjson instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Number of random assignments
        #[arg(short = 'n', long, env = "ISING_BENCH_NUM_READS")]
        num_reads: Option<u64>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Number of sampling workers
        #[arg(long, env = "ISING_BENCH_WORKERS")]
        workers: Option<usize>,
    },

    /// Write the best-energy table of an experiment directory
    Tabulate {
        /// Experiment directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write one row per solver run of an experiment directory
    Records {
        /// Experiment directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a bqpjson instance for consistency
    Validate {
        /// bqpjson instance file
        #[arg(short, long)]
        instance: PathBuf,
    },

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging);
    config.validate()?;

    let strict = config.validation.strict;
    let limits = config.validation.limits.clone();

    match cli.command {
        Commands::Evaluate {
            instance,
            result,
            scaled,
        } => {
            let model = load_instance(&instance, &limits)?;
            let values = read_solution_values(&result, &config.results)?;
            validate_assignment_values(&model, &values, strict)?;

            let assignment = Assignment::from_positional(&model, &values)?;
            let energy = compute_energy(&model, &assignment)?;
            info!(
                instance = %instance.display(),
                result = %result.display(),
                energy,
                "Evaluated assignment"
            );

            println!("Energy of assignment: {:?}", energy);
            if scaled {
                println!("Scaled objective: {:?}", scaled_energy(&model, energy));
            }
        }

        Commands::Random { instance, seed } => {
            let model = load_instance(&instance, &limits)?;
            let mut rng = match seed.or(config.sampling.seed) {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let energy = evaluate_random_solution(&model, &mut rng)?;
            println!("Energy: {:?}", energy);
        }

        Commands::Sample {
            instance,
            num_reads,
            seed,
            workers,
        } => {
            // Override config with CLI args
            if let Some(n) = num_reads {
                config.sampling.num_reads = n;
            }
            if let Some(s) = seed {
                config.sampling.seed = Some(s);
            }
            if let Some(w) = workers {
                config.sampling.workers = w;
            }
            config.validate()?;
            validate_num_reads(config.sampling.num_reads, &limits)?;

            let model = load_instance(&instance, &limits)?;
            info!(
                instance = %instance.display(),
                num_reads = config.sampling.num_reads,
                workers = config.sampling.workers,
                seed = ?config.sampling.seed,
                "Starting random sampling"
            );

            let summary = sample_random_parallel(
                &model,
                config.sampling.num_reads,
                config.sampling.workers,
                config.sampling.seed,
            )
            .await?;

            if let Some(mean) = summary.mean_energy() {
                info!(mean_energy = mean, "Mean energy of drawn assignments");
            }
            println!("Best energy found: {:?}", summary.best_energy);
        }

        Commands::Tabulate { input, output } => {
            let records = collect_records(&input, &config.results).await?;
            let table = BestEnergyTable::from_records(&records);
            table.write_csv_file(&output)?;
            println!(
                "Wrote {} instances x {} solvers to {}",
                table.len(),
                table.solvers().count(),
                output.display()
            );
        }

        Commands::Records { input, output } => {
            let records = collect_records(&input, &config.results).await?;
            match output {
                Some(path) => {
                    create_parent_dir(&path)?;
                    let file = std::fs::File::create(&path)?;
                    write_records_csv(&records, std::io::BufWriter::new(file))?;
                    info!(path = %path.display(), records = records.len(), "Wrote run records");
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    write_records_csv(&records, &mut out)?;
                    out.flush()?;
                }
            }
        }

        Commands::Validate { instance } => {
            match load_instance(&instance, &limits) {
                Ok(model) => {
                    println!(
                        "Instance is valid: {} variables, {} linear terms, {} quadratic terms ({} domain)",
                        model.num_variables(),
                        model.linear_terms.len(),
                        model.quadratic_terms.len(),
                        model.variable_domain
                    );
                }
                Err(e) => {
                    error!(instance = %instance.display(), error = %e, "Validation failed");
                    eprintln!("Instance is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Initialize logging with tracing. Output goes to stderr.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
