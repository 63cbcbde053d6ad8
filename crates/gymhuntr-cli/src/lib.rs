pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod storage;
pub mod sweep;

pub use error::{HuntrError, Result};
