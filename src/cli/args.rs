use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every fixture with its shape
    List,

    /// Print a fixture's description as JSON
    Describe {
        /// The fixture name, e.g. `sample_image`
        name: String,
    },

    /// Write fixtures as PNG files
    Render {
        /// JSON file with render settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory, overrides the config file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Seed for randomized fixtures
        #[arg(short, long)]
        seed: Option<u64>,

        /// Render only the named fixture; may be repeated
        #[arg(long = "only", value_name = "NAME")]
        only: Vec<String>,

        /// Do not write manifest.csv
        #[arg(long, default_value_t = false)]
        no_manifest: bool,
    },
}
