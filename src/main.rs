pub mod types;
pub mod config;
pub mod data;
pub mod classify;
pub mod landmarks;
pub mod processing;
pub mod render;
pub mod export;
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the volcano map as a standalone HTML page
    Generate {
        /// TOML config; built-in defaults are used when omitted
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Serve the map and a small query API
    Serve {
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config } => {
            info!("Generating map with config: {:?}", config);
            let app_config = config::AppConfig::load(config.as_deref())?;

            // 1. Load Data
            let volcanoes = data::load_data(&app_config.input)?;

            // 2. Classify and assemble layers
            let map = processing::process_data(&app_config.map, &volcanoes)?;

            // 3. Render
            render::write_html(&map, &app_config.output.html)?;
            if let Some(path) = &app_config.output.geojson {
                export::write_geojson(&map, path)?;
            }

            println!("Map saved to {}", app_config.output.html.display());
        }
        Commands::Serve { config } => {
            info!("Serving map with config: {:?}", config);
            let app_config = config::AppConfig::load(config.as_deref())?;

            let volcanoes = data::load_data(&app_config.input)?;
            let map = processing::process_data(&app_config.map, &volcanoes)?;

            server::start_server(app_config, volcanoes, map).await?;
        }
    }

    Ok(())
}
