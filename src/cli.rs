use crate::map::MapProvider;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graffiti-archive")]
#[command(about = "Graffiti documentation archive: Drive fetch pipeline and map page generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull images and GPS metadata from the Drive folder into the dataset
    Fetch {
        /// Dataset file (default: data/images.json)
        #[arg(short, long, default_value = "data/images.json")]
        output: PathBuf,

        /// Pause between per-file metadata requests, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Rewrite the dataset even when nothing changed
        #[arg(short, long)]
        force: bool,
    },

    /// Build image records from a local photo folder (EXIF GPS)
    Scan {
        /// Photo folder path
        #[arg(required = true)]
        folder: PathBuf,

        /// Dataset file (default: data/images.json)
        #[arg(short, long, default_value = "data/images.json")]
        output: PathBuf,

        /// Rewrite the dataset even when nothing changed
        #[arg(short, long)]
        force: bool,
    },

    /// Render the mappable subset of the dataset into an HTML map page
    Render {
        /// Dataset file
        #[arg(short, long, default_value = "data/images.json")]
        input: PathBuf,

        /// Map backend (leaflet/google)
        #[arg(short, long, default_value = "leaflet")]
        provider: MapProvider,

        /// Output HTML file
        #[arg(short, long, default_value = "map.html")]
        output: PathBuf,
    },

    /// Show dataset statistics
    Status {
        /// Dataset file
        #[arg(short, long, default_value = "data/images.json")]
        input: PathBuf,
    },

    /// Show or edit configuration
    Config {
        /// Set the browser-side Google Maps API key
        #[arg(long)]
        set_maps_api_key: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
