//! Gym data models
//!
//! `RawGym` mirrors the wire shape the GymHuntr API returns; `Gym` is the
//! normalized record the rest of the tool works with.

use serde::{Deserialize, Serialize};

use crate::error::{HuntrError, Result};

/// Gym record as returned by the API, before normalization.
///
/// Arrives double-encoded: each element of the `gyms` response array is a
/// JSON-encoded string containing one of these objects.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGym {
    pub gym_id: i64,
    pub gym_name: String,
    /// [latitude, longitude]
    pub location: [f64; 2],
    pub enabled: bool,
    pub url: String,
    pub gym_inid: String,
}

/// A latitude/longitude point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Normalized gym record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gym {
    /// External id, also the document key in the gym store
    pub gym_id: i64,
    pub name: String,
    pub location: GeoPoint,
    pub enabled: bool,
    pub url: String,
    pub inid: String,
}

impl From<RawGym> for Gym {
    fn from(raw: RawGym) -> Self {
        Self {
            gym_id: raw.gym_id,
            name: raw.gym_name,
            location: GeoPoint {
                lat: raw.location[0],
                lon: raw.location[1],
            },
            enabled: raw.enabled,
            url: raw.url,
            inid: raw.gym_inid,
        }
    }
}

/// Decode one double-encoded gym element into a normalized record.
///
/// Missing or mistyped fields surface as `MalformedRecord`, which the sweep
/// logs and skips rather than failing the whole cell.
pub fn decode_gym(encoded: &str) -> Result<Gym> {
    let raw: RawGym =
        serde_json::from_str(encoded).map_err(|e| HuntrError::malformed(e.to_string()))?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENO_GYM: &str = r#"{"gym_id":1,"gym_name":"X","location":[39.55,-119.81],"enabled":true,"url":"http://x","gym_inid":"a1"}"#;

    #[test]
    fn test_decode_gym() {
        let gym = decode_gym(RENO_GYM).unwrap();
        assert_eq!(gym.gym_id, 1);
        assert_eq!(gym.name, "X");
        assert_eq!(
            gym.location,
            GeoPoint {
                lat: 39.55,
                lon: -119.81
            }
        );
        assert!(gym.enabled);
        assert_eq!(gym.url, "http://x");
        assert_eq!(gym.inid, "a1");
    }

    #[test]
    fn test_decode_is_deterministic() {
        let first = decode_gym(RENO_GYM).unwrap();
        let second = decode_gym(RENO_GYM).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let err = decode_gym(r#"{"gym_id":1,"gym_name":"X"}"#).unwrap_err();
        assert!(matches!(err, HuntrError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_not_json_is_malformed() {
        let err = decode_gym("not json at all").unwrap_err();
        assert!(matches!(err, HuntrError::MalformedRecord(_)));
    }

    #[test]
    fn test_gym_serde_round_trip() {
        let gym = decode_gym(RENO_GYM).unwrap();
        let json = serde_json::to_string(&gym).unwrap();
        let back: Gym = serde_json::from_str(&json).unwrap();
        assert_eq!(gym, back);
    }
}
