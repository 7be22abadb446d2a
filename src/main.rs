pub mod types;
pub mod config;
pub mod coords;
pub mod data;
pub mod processing;
pub mod server;

use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and print a summary without serving
    Check {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Serve the dashboard
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let records = data::load_data(&app_config)?;

            let years = processing::distinct_years(&records);
            println!("{} records across years {:?}", records.len(), years);

            // Departments the map will silently drop.
            let unmatched: BTreeSet<&str> = records
                .iter()
                .map(|r| r.department.as_str())
                .filter(|d| coords::coordinates_of(d).is_none())
                .collect();
            if unmatched.is_empty() {
                println!("All departments have coordinates");
            } else {
                for dept in unmatched {
                    println!("No coordinates for department: {:?}", dept);
                }
            }
        }
        Commands::Serve { config } => {
            println!("Serving dashboard with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            // Load failure is fatal here: never serve a broken page.
            let records = data::load_data(&app_config)?;

            server::start_server(app_config, records).await?;
        }
    }

    Ok(())
}
