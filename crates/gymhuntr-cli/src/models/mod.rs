pub mod gym;

pub use gym::{decode_gym, GeoPoint, Gym, RawGym};
