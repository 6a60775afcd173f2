use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Settings;
use commands::{fetch_stats, list_repositories, serve};

#[derive(Parser)]
#[command(name = "forecast-dashboard")]
#[command(about = "Repository forecast dashboard server and tools")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON, picked by extension)
    #[arg(short, long, global = true, env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard and forward forecast requests
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Base URL of the forecasting service (e.g., http://localhost:8080)
        #[arg(short, long)]
        upstream_url: Option<String>,

        /// Directory with the built frontend bundle
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },
    /// Print the configured repositories
    Repositories,
    /// Request stats for one repository from the forecasting service and
    /// print the JSON answer
    Fetch {
        /// Repository key in owner/name form
        repository: String,

        /// Base URL of the forecasting service
        #[arg(short, long)]
        upstream_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings = Settings::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve { bind_address, upstream_url, static_dir } => {
                if let Some(bind_address) = bind_address {
                    settings.bind_address = bind_address;
                }
                if let Some(upstream_url) = upstream_url {
                    settings.upstream_url = upstream_url;
                }
                if let Some(static_dir) = static_dir {
                    settings.static_dir = static_dir;
                }
                serve(settings).await?;
            }
            Commands::Repositories => {
                list_repositories(&settings)?;
            }
            Commands::Fetch { repository, upstream_url } => {
                if let Some(upstream_url) = upstream_url {
                    settings.upstream_url = upstream_url;
                }
                fetch_stats(&settings, &repository).await?;
            }
        }
        Ok(())
    }
}
