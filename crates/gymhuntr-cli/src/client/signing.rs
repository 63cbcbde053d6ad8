//! Request signing shim for the GymHuntr API
//!
//! Every value here was reverse-engineered from browser traffic against an
//! undocumented API. The `timeUntil` formula and the fixed credentials are a
//! black-box compatibility shim, not a designed algorithm; validate against
//! live responses before assuming any of it generalizes.

/// API base URL, taken from browser dev tools
pub const BASE_URL: &str = "https://api.gymhuntr.com/api";

/// Fixed "monster" value observed on every gyms request
pub const MONSTER: &str = "83jhs";

/// Fixed hash credential observed on every request
pub const HASH_CHECK: &str = "57b34b3eca72eed3178b785dcca4289g4";

/// Browser user-agent the API expects
pub const SWEEP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_3) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36";

/// Derive the `timeUntil` request parameter.
///
/// `time` is the current Unix time in whole seconds; `cf_id` is the token
/// returned by the authorise endpoint.
pub fn calc_time_until(time: i64, lat: f64, lon: f64, cf_id: i64) -> f64 {
    lat * cf_id as f64 + lon * cf_id as f64 + time as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_time_until_exact() {
        assert_eq!(calc_time_until(100, 2.0, 3.0, 10), 2.0 * 10.0 + 3.0 * 10.0 + 100.0);
        assert_eq!(calc_time_until(0, 0.0, 0.0, 0), 0.0);
    }

    #[test]
    fn test_calc_time_until_negative_coordinates() {
        let t = 1_519_000_000;
        let got = calc_time_until(t, 39.5502358, -119.8158075, 42);
        let want = 39.5502358 * 42.0 + -119.8158075 * 42.0 + t as f64;
        assert_eq!(got, want);
    }

    #[test]
    fn test_calc_time_until_zero_token_is_time() {
        assert_eq!(calc_time_until(12345, 50.0, -4.0, 0), 12345.0);
    }
}
