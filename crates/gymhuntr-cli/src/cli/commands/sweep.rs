//! Sweep command for gymhuntr-cli

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::client::GymHuntrClient;
use crate::error::Result;
use crate::grid::{GridBounds, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::storage::{BatchWriter, DEFAULT_BATCH_SIZE};
use crate::sweep::{RateLimiter, SweepEngine, SweepOptions, DEFAULT_INTERVAL};

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Directory for flushed batch files
    #[arg(long, default_value = "pickles")]
    pub out: PathBuf,

    /// Records per batch file
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Minimum seconds between API requests
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub interval: u64,

    /// Southern latitude bound
    #[arg(long, default_value_t = MIN_LAT, allow_negative_numbers = true)]
    pub min_lat: f64,

    /// Northern latitude bound
    #[arg(long, default_value_t = MAX_LAT, allow_negative_numbers = true)]
    pub max_lat: f64,

    /// Western longitude bound
    #[arg(long, default_value_t = MIN_LON, allow_negative_numbers = true)]
    pub min_lon: f64,

    /// Eastern longitude bound
    #[arg(long, default_value_t = MAX_LON, allow_negative_numbers = true)]
    pub max_lon: f64,

    /// Stop after this many grid cells
    #[arg(long)]
    pub max_cells: Option<u64>,
}

/// Run the grid sweep
pub async fn run(args: SweepArgs) -> Result<()> {
    let bounds = GridBounds {
        min_lat: args.min_lat,
        max_lat: args.max_lat,
        min_lon: args.min_lon,
        max_lon: args.max_lon,
    };
    bounds.validate()?;

    let writer = BatchWriter::create(&args.out, args.batch_size)?;
    let client = GymHuntrClient::new()?;
    let limiter = RateLimiter::new(Duration::from_secs(args.interval));
    let engine = SweepEngine::new(client, writer, limiter);

    println!(
        "Sweeping lat [{}, {}) lon [{}, {}), writing batches to {}",
        bounds.min_lat,
        bounds.max_lat,
        bounds.min_lon,
        bounds.max_lon,
        args.out.display()
    );

    let opts = SweepOptions {
        bounds,
        max_cells: args.max_cells,
    };
    let stats = engine.run(&opts).await?;

    println!("\nSweep complete: {}", stats);
    Ok(())
}
