use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_transit::catalog::Catalog;
use u_transit::config::EngineConfig;
use u_transit::scheduler::AssignmentEngine;
use u_transit::validation::validate_catalog;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a day schedule and print it as JSON
    Solve {
        /// Catalog document (stops, buses, drivers, routes, timetables)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Engine parameters; every field is optional
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the solution
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check a catalog document for structural problems
    #[command(visible_alias = "check")]
    Validate {
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            catalog,
            config,
            pretty,
        } => {
            let catalog = Catalog::from_json_path(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;
            let config = match config {
                Some(path) => EngineConfig::from_json_path(&path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => EngineConfig::default(),
            };

            let solution = AssignmentEngine::new(config).solve(&catalog);
            info!(explanation = %solution.score_explanation, "schedule built");

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if pretty {
                serde_json::to_writer_pretty(&mut out, &solution)?;
            } else {
                serde_json::to_writer(&mut out, &solution)?;
            }
            writeln!(out)?;
        }
        Commands::Validate { catalog } => {
            let catalog = Catalog::from_json_path(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;
            if let Err(errors) = validate_catalog(&catalog) {
                for e in &errors {
                    error!("{e}");
                }
                anyhow::bail!("catalog has {} problem(s)", errors.len());
            }
            info!("catalog is valid");
        }
    }

    Ok(())
}
