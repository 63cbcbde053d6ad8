//! Local persistence: batch files written during the sweep, and the SQLite
//! gym store fed by the import command.

pub mod batch;
pub mod gym_store;

pub use batch::{read_batch, BatchWriter, DEFAULT_BATCH_SIZE};
pub use gym_store::GymStore;
