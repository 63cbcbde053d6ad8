//! Sweep engine walking the coordinate grid
//!
//! Per cell: authorise, fetch gyms, decode each double-encoded element, and
//! append the normalized records to the batch writer. Transient faults
//! (transport errors, unparsable bodies, 5xx answers, 429s) are retried with
//! bounded backoff; a cell the API refuses to authorise
//! is skipped; a malformed element is logged and dropped without failing the
//! cell. The writer is flushed on completion and on terminal failure, so no
//! collected record is ever lost to a partial batch.

pub mod rate_limiter;

use std::fmt;

use tracing::{debug, info, warn};

use crate::client::GymHuntrClient;
use crate::error::{HuntrError, Result};
use crate::grid::{Grid, GridBounds, GridCell};
use crate::models::decode_gym;
use crate::storage::BatchWriter;

pub use rate_limiter::{RateLimiter, DEFAULT_INTERVAL};

/// Attempts per cell before a transient fault becomes terminal
const MAX_ATTEMPTS: u32 = 3;

/// Whether an error is worth retrying within a cell.
///
/// Transport faults, unparsable response bodies, and server-side 5xx answers
/// are all transient against this API; anything else (a 4xx, a local IO or
/// database failure) is terminal.
fn is_transient(err: &HuntrError) -> bool {
    match err {
        HuntrError::Http(_) | HuntrError::InvalidResponse(_) => true,
        HuntrError::Api { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Sweep configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOptions {
    pub bounds: GridBounds,
    /// Stop after visiting this many cells (None sweeps the full grid)
    pub max_cells: Option<u64>,
}

/// Counters reported at the end of a sweep
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub cells_visited: u64,
    pub cells_denied: u64,
    pub gyms_collected: u64,
    pub malformed_skipped: u64,
    pub batches_written: u32,
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells visited ({} denied), {} gyms collected ({} malformed skipped), {} batches written",
            self.cells_visited,
            self.cells_denied,
            self.gyms_collected,
            self.malformed_skipped,
            self.batches_written
        )
    }
}

/// What one cell yielded
enum CellScan {
    Denied,
    Gyms(Vec<String>),
}

/// Sweep engine owning the client, the pacing state, and the batch writer
pub struct SweepEngine {
    client: GymHuntrClient,
    limiter: RateLimiter,
    writer: BatchWriter,
}

impl SweepEngine {
    pub fn new(client: GymHuntrClient, writer: BatchWriter, limiter: RateLimiter) -> Self {
        Self {
            client,
            limiter,
            writer,
        }
    }

    /// Run the sweep to completion, consuming the engine.
    ///
    /// The trailing partial batch is flushed whether the sweep finishes or
    /// fails terminally.
    pub async fn run(mut self, opts: &SweepOptions) -> Result<SweepStats> {
        opts.bounds.validate()?;

        let mut stats = SweepStats::default();
        let outcome = self.visit_cells(opts, &mut stats).await;

        match self.writer.close() {
            Ok(Some(path)) => {
                stats.batches_written += 1;
                info!(path = %path.display(), "flushed trailing batch");
            }
            Ok(None) => {}
            Err(e) => {
                if outcome.is_ok() {
                    return Err(e);
                }
                warn!(error = %e, "failed to flush trailing batch after sweep error");
            }
        }

        outcome?;
        Ok(stats)
    }

    async fn visit_cells(&mut self, opts: &SweepOptions, stats: &mut SweepStats) -> Result<()> {
        for cell in Grid::new(opts.bounds) {
            if let Some(max) = opts.max_cells {
                if stats.cells_visited >= max {
                    break;
                }
            }
            stats.cells_visited += 1;

            let encoded = match self.scan_cell(cell).await? {
                CellScan::Denied => {
                    debug!(lat = cell.lat, lon = cell.lon, "authorization denied, skipping cell");
                    stats.cells_denied += 1;
                    continue;
                }
                CellScan::Gyms(encoded) => encoded,
            };

            for element in &encoded {
                match decode_gym(element) {
                    Ok(gym) => {
                        stats.gyms_collected += 1;
                        if let Some(path) = self.writer.append(gym)? {
                            stats.batches_written = self.writer.batches_written();
                            info!(
                                total = self.writer.total_flushed(),
                                lat = cell.lat,
                                lon = cell.lon,
                                path = %path.display(),
                                "flushed batch"
                            );
                        }
                    }
                    Err(e) => {
                        stats.malformed_skipped += 1;
                        warn!(lat = cell.lat, lon = cell.lon, error = %e, "skipping malformed gym record");
                    }
                }
            }
        }
        Ok(())
    }

    /// Fetch one cell with pacing and bounded retry
    async fn scan_cell(&mut self, cell: GridCell) -> Result<CellScan> {
        let mut attempts = 0;
        loop {
            self.limiter.wait().await;
            attempts += 1;

            match self.try_scan(cell).await {
                Ok(scan) => {
                    self.limiter.on_success();
                    return Ok(scan);
                }
                Err(HuntrError::RateLimited) => {
                    self.limiter.on_rate_limit();
                    if attempts >= MAX_ATTEMPTS {
                        return Err(HuntrError::RateLimited);
                    }
                    if self.limiter.should_pause() {
                        let pause = self.limiter.pause_duration();
                        warn!(secs = pause.as_secs(), "repeated rate limits, pausing sweep");
                        tokio::time::sleep(pause).await;
                    }
                }
                Err(e) if is_transient(&e) => {
                    if attempts >= MAX_ATTEMPTS {
                        return Err(e);
                    }
                    warn!(
                        lat = cell.lat,
                        lon = cell.lon,
                        attempt = attempts,
                        error = %e,
                        "transient error, retrying cell"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_scan(&self, cell: GridCell) -> Result<CellScan> {
        match self.client.authorise(cell.lat, cell.lon).await? {
            None => Ok(CellScan::Denied),
            Some(cf_id) => {
                let encoded = self.client.gyms_with_token(cell.lat, cell.lon, cf_id).await?;
                Ok(CellScan::Gyms(encoded))
            }
        }
    }
}
