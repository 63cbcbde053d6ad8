mod store;
mod sweep;

pub use store::{import, status};
pub use sweep::{run as sweep_run, SweepArgs};
