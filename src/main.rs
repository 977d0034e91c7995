//! geoclump CLI
//!
//! # Commands
//!
//! - `simulate`: write simulated pings for a subject to a CSV file
//! - `cluster`: cluster the pings in a CSV file into predominant locations
//! - `track`: simulate a named subject, then print its history and predominant locations

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use geoclump::cluster::{DEFAULT_MAX_ITER, DEFAULT_N_CLUSTERS, DEFAULT_TOLERANCE};
use geoclump::ping::{subject_index, SUBJECTS};
use geoclump::report::render_history;
use geoclump::{records, Kmeans, Ping, Report, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Simulated geolocation tracking and location clustering
#[derive(Parser)]
#[command(name = "geoclump")]
#[command(version)]
#[command(about = "Simulate geolocation pings and cluster them into predominant locations")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write simulated pings to a CSV file
    Simulate {
        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,

        #[command(flatten)]
        sim: SimArgs,

        /// Subject index (offsets the simulated centre)
        #[arg(long, conflicts_with = "subject")]
        subject_index: Option<usize>,

        /// Subject name from the roster
        #[arg(long)]
        subject: Option<String>,
    },
    /// Cluster the pings stored in a CSV file
    Cluster {
        /// Input CSV path
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        kmeans: KmeansArgs,

        /// RNG seed for reproducible clustering
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate a subject, then report its location history and predominant locations
    Track {
        /// Subject name from the roster
        #[arg(short, long)]
        subject: String,

        #[command(flatten)]
        sim: SimArgs,

        #[command(flatten)]
        kmeans: KmeansArgs,

        /// Also save the simulated pings to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SimArgs {
    /// Number of pings to simulate
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct KmeansArgs {
    /// Number of clusters
    #[arg(short, default_value_t = DEFAULT_N_CLUSTERS)]
    k: usize,

    /// Iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Convergence tolerance on the total squared centroid shift
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

impl KmeansArgs {
    fn model(&self) -> Kmeans {
        Kmeans::new(self.k)
            .with_max_iter(self.max_iter)
            .with_tolerance(self.tolerance)
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn resolve_subject(name: &str) -> Result<usize> {
    match subject_index(name) {
        Some(i) => Ok(i),
        None => bail!("unknown subject {name:?}; choose one of {}", SUBJECTS.join(", ")),
    }
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_table());
    }
    Ok(())
}

fn simulate(sim: &SimArgs, subject: usize, rng: &mut StdRng) -> Vec<Ping> {
    Simulation::new(sim.samples)
        .with_subject_index(subject)
        .run(rng, now())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            out,
            sim,
            subject_index: explicit_index,
            subject,
        } => {
            let index = match subject {
                Some(name) => resolve_subject(&name)?,
                None => explicit_index.unwrap_or(0),
            };
            let pings = simulate(&sim, index, &mut rng_for(sim.seed));
            records::save(&out, &pings)
                .with_context(|| format!("writing pings to {}", out.display()))?;
            info!(count = pings.len(), path = %out.display(), "simulated pings");
        }
        Commands::Cluster {
            input,
            kmeans,
            seed,
            json,
        } => {
            let pings = records::load(&input)
                .with_context(|| format!("reading pings from {}", input.display()))?;
            let points = records::locations(&pings);
            let fit = kmeans
                .model()
                .fit_with(&points, &mut rng_for(seed))
                .context("clustering pings")?;
            print_report(&Report::new(&pings, &fit), json)?;
        }
        Commands::Track {
            subject,
            sim,
            kmeans,
            out,
            json,
        } => {
            let index = resolve_subject(&subject)?;
            let name = SUBJECTS[index];
            let mut rng = rng_for(sim.seed);
            let pings = simulate(&sim, index, &mut rng);
            if let Some(out) = &out {
                records::save(out, &pings)
                    .with_context(|| format!("writing pings to {}", out.display()))?;
            }

            let points = records::locations(&pings);
            let fit = kmeans
                .model()
                .fit_with(&points, &mut rng)
                .with_context(|| format!("clustering pings of {name}"))?;
            let report = Report::new(&pings, &fit).with_subject(name);

            if !json {
                println!("Location history of {name}:");
                print!("{}", render_history(&pings));
                println!();
            }
            print_report(&report, json)?;
        }
    }

    Ok(())
}
