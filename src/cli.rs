use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::HeatmapSettings;
use commands::{render, serve};

#[derive(Parser)]
#[command(name = "loadmap")]
#[command(about = "Weekly branch load heatmaps: web server and CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        #[command(flatten)]
        settings: HeatmapSettings,
    },
    /// Fetch one branch and write its heatmap to a PNG file
    ///
    /// Examples:
    ///   loadmap render --slug oktyabrskiy --output oktyabrskiy.png
    ///   loadmap render --slug oktyabrskiy --output load.png --renderer chart
    Render {
        /// Branch slug as used by the data provider
        #[arg(short, long)]
        slug: String,

        /// Path of the PNG file to write
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        settings: HeatmapSettings,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, settings } => {
                serve(&bind_address, &settings).await?;
            }
            Commands::Render { slug, output, settings } => {
                render(&slug, &output, &settings).await?;
            }
        }
        Ok(())
    }
}
