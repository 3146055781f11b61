use anyhow::Context;
use clap::{Parser, Subcommand};
use pwa_devtools::config::{DEFAULT_HOST, DEFAULT_PORT};
use pwa_devtools::utils::logger::init_cli_logger;
use pwa_devtools::relocate::RelocationFailure;
use pwa_devtools::{icons, relocate, server, IconConfig, LocalFs, RelocationPlan, ServerConfig};
use std::path::PathBuf;

/// Small helpers for building and testing the PWA site
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the PWA app icons
    Icons {
        /// Directory where the icons are written
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Icon edge length in pixels; repeat for several sizes
        #[arg(short, long = "size", default_values_t = [192, 512])]
        sizes: Vec<u32>,
    },
    /// Serve a directory over HTTP for local PWA testing
    Serve {
        /// Interface to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory to serve (defaults to the directory holding this executable)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// Move the site pages into the quit/ subdirectory
    Relocate {
        /// Site root to relocate from
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// TOML file describing the moves
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose);

    match args.command {
        Commands::Icons { out_dir, sizes } => {
            let config = IconConfig {
                sizes,
                output_dir: out_dir,
            };
            let writer = icons::probe();
            icons::generate_icons(&config, writer.as_deref())
                .context("Icon generation failed")?;
        }
        Commands::Serve { host, port, root } => {
            let config = ServerConfig::new(host, port, root)?;
            server::run(config).await.context("Server failed")?;
        }
        Commands::Relocate { root, plan, json } => {
            let mut plan = match plan {
                Some(path) => RelocationPlan::from_file(&path)?,
                None => RelocationPlan::default(),
            };
            if let Some(root) = root {
                plan.root = root;
            }

            match relocate::relocate(&plan, &LocalFs) {
                Ok(report) if json => println!("{}", report.to_json()?),
                Ok(report) => report.print(),
                Err(e) => {
                    // A missing destination ends the run but is not a crash.
                    let Some(failure) = RelocationFailure::from_error(&e) else {
                        return Err(e.into());
                    };
                    if json {
                        println!("{}", failure.to_json()?);
                    } else {
                        println!("{}", failure.message());
                    }
                }
            }
        }
    }

    Ok(())
}
