use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rihla::coord::Coordinate;
use rihla::school::SchoolId;

/// CLI arguments for rihla
#[derive(Debug, Parser)]
#[command(
    name = "rihla",
    version,
    about = "Browse, filter and export Moroccan schools, and plan driving routes to them"
)]
pub struct CliArgs {
    /// JSON dataset to load instead of the bundled sample (overrides RIHLA_DATASET)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Log debug output from rihla
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Facet selections and search text shared by the listing commands.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Region labels, comma-separated
    #[arg(short = 'r', long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Province labels, comma-separated
    #[arg(short = 'p', long = "province", value_delimiter = ',')]
    pub provinces: Vec<String>,

    /// Commune labels, comma-separated
    #[arg(short = 'c', long = "commune", value_delimiter = ',')]
    pub communes: Vec<String>,

    /// Free-text search over names, addresses and location labels
    #[arg(short = 'q', long = "query", default_value = "")]
    pub query: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all regions
    Regions,

    /// List provinces, optionally restricted to some regions
    Provinces {
        /// Region labels, comma-separated
        #[arg(short = 'r', long = "region", value_delimiter = ',')]
        regions: Vec<String>,
    },

    /// List communes reachable from the given regions and provinces
    Communes {
        #[arg(short = 'r', long = "region", value_delimiter = ',')]
        regions: Vec<String>,
        #[arg(short = 'p', long = "province", value_delimiter = ',')]
        provinces: Vec<String>,
    },

    /// List the schools matching the filters and query
    Search(FilterArgs),

    /// Summary counts for the schools matching the filters and query
    Stats(FilterArgs),

    /// Write the matching schools as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (default: morocco-schools-<date>.csv); "-" writes to stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Driving routes to a school
    Route {
        /// School identifier
        id: SchoolId,

        /// Starting position as lat,lng (overrides RIHLA_ORIGIN)
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Option<Coordinate>,
    },
}
