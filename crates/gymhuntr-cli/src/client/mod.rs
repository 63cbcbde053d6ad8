//! GymHuntr API client

pub mod api;
pub mod signing;

pub use api::GymHuntrClient;
pub use signing::calc_time_until;
