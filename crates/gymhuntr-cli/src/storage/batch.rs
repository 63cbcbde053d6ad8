//! Batched persistence of normalized gym records
//!
//! The sweep appends records here; every `threshold` records the pending
//! batch is serialized to its own file and the accumulator reset. `close`
//! flushes whatever remains, so a run that ends mid-batch loses nothing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Gym;

/// Records accumulated before a flush
pub const DEFAULT_BATCH_SIZE: usize = 20_000;

/// Batch writer owning the accumulator and the output directory.
///
/// Invariant: the pending count stays strictly below the threshold after
/// every operation.
pub struct BatchWriter {
    dir: PathBuf,
    threshold: usize,
    pending: Vec<Gym>,
    total_flushed: u64,
    batches_written: u32,
}

impl BatchWriter {
    /// Create a writer, creating the output directory if needed
    pub fn create(dir: impl Into<PathBuf>, threshold: usize) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            threshold: threshold.max(1),
            pending: Vec::new(),
            total_flushed: 0,
            batches_written: 0,
        })
    }

    /// Number of records waiting for the next flush
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total records persisted so far
    pub fn total_flushed(&self) -> u64 {
        self.total_flushed
    }

    /// Number of batch files written so far
    pub fn batches_written(&self) -> u32 {
        self.batches_written
    }

    /// Append one record, flushing when the threshold is reached.
    ///
    /// Returns the path of the flushed file when a flush happened.
    pub fn append(&mut self, gym: Gym) -> Result<Option<PathBuf>> {
        self.pending.push(gym);
        if self.pending.len() >= self.threshold {
            self.flush()
        } else {
            Ok(None)
        }
    }

    /// Serialize pending records to a new file and reset the accumulator.
    ///
    /// Files are named by the cumulative record total at flush time, which is
    /// strictly increasing and therefore unique within a run. No-op when
    /// nothing is pending.
    pub fn flush(&mut self) -> Result<Option<PathBuf>> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        self.total_flushed += self.pending.len() as u64;
        let path = self.dir.join(format!("{}.p", self.total_flushed));

        let mut file = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut file, &self.pending)?;
        file.flush()?;

        self.pending.clear();
        self.batches_written += 1;
        Ok(Some(path))
    }

    /// Flush any trailing partial batch and consume the writer
    pub fn close(mut self) -> Result<Option<PathBuf>> {
        self.flush()
    }
}

/// Read a flushed batch file back into records
pub fn read_batch(path: impl AsRef<Path>) -> Result<Vec<Gym>> {
    let file = File::open(path.as_ref())?;
    let gyms = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(gyms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    fn gym(id: i64) -> Gym {
        Gym {
            gym_id: id,
            name: format!("Gym {}", id),
            location: GeoPoint {
                lat: 39.55,
                lon: -119.81,
            },
            enabled: true,
            url: "http://x".to_string(),
            inid: format!("in{}", id),
        }
    }

    #[test]
    fn test_pending_mirrors_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::create(dir.path(), 5).unwrap();

        for i in 0..4 {
            writer.append(gym(i)).unwrap();
            assert_eq!(writer.pending(), (i + 1) as usize);
        }
    }

    #[test]
    fn test_flush_at_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::create(dir.path(), 3).unwrap();

        assert!(writer.append(gym(1)).unwrap().is_none());
        assert!(writer.append(gym(2)).unwrap().is_none());
        let flushed = writer.append(gym(3)).unwrap().expect("should flush");

        assert_eq!(writer.pending(), 0);
        assert_eq!(writer.total_flushed(), 3);
        assert_eq!(writer.batches_written(), 1);

        let records = read_batch(&flushed).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], gym(1));
    }

    #[test]
    fn test_pending_always_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::create(dir.path(), 4).unwrap();

        for i in 0..20 {
            writer.append(gym(i)).unwrap();
            assert!(writer.pending() < 4);
        }
        assert_eq!(writer.batches_written(), 5);
    }

    #[test]
    fn test_batch_files_uniquely_named() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::create(dir.path(), 2).unwrap();

        let mut paths = Vec::new();
        for i in 0..6 {
            if let Some(path) = writer.append(gym(i)).unwrap() {
                paths.push(path);
            }
        }

        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].file_name().unwrap(), "2.p");
        assert_eq!(paths[1].file_name().unwrap(), "4.p");
        assert_eq!(paths[2].file_name().unwrap(), "6.p");
    }

    #[test]
    fn test_close_flushes_trailing_partial_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BatchWriter::create(dir.path(), 100).unwrap();

        writer.append(gym(1)).unwrap();
        writer.append(gym(2)).unwrap();

        let path = writer.close().unwrap().expect("partial batch should flush");
        let records = read_batch(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_close_with_nothing_pending() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BatchWriter::create(dir.path(), 10).unwrap();
        assert!(writer.close().unwrap().is_none());
    }
}
