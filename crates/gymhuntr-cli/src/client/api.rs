//! HTTP client for the GymHuntr API
//!
//! Two endpoints: `/authorise` hands out a per-request `cf-id` token in a
//! response header, and `/gyms` returns gym records for a coordinate. The
//! gyms payload is double-encoded upstream: the `gyms` array holds
//! JSON-encoded strings, not objects, so each element needs a second decode
//! (see `models::decode_gym`).

use chrono::Utc;
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::client::signing::{calc_time_until, BASE_URL, HASH_CHECK, MONSTER, SWEEP_USER_AGENT};
use crate::error::{HuntrError, Result};

/// Response header carrying the authorisation token
const CF_ID_HEADER: &str = "cf-id";

/// Body shape of the gyms endpoint
#[derive(Debug, Deserialize)]
struct GymsResponse {
    gyms: Vec<String>,
}

/// GymHuntr API client
pub struct GymHuntrClient {
    client: Client,
    base_url: String,
}

impl GymHuntrClient {
    /// Create a new API client against the production base URL
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(BASE_URL)
    }

    /// Create a new API client with a custom base URL (for testing)
    #[doc(hidden)]
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(HuntrError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request an authorisation token for a coordinate.
    ///
    /// Returns `Ok(None)` when the response carries no `cf-id` header, which
    /// the API uses to signal "authorization denied" for that cell.
    pub async fn authorise(&self, lat: f64, lon: f64) -> Result<Option<i64>> {
        let response = self
            .client
            .get(self.build_url("/authorise"))
            .header(USER_AGENT, HeaderValue::from_static(SWEEP_USER_AGENT))
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hashCheck", HASH_CHECK.to_string()),
            ])
            .send()
            .await
            .map_err(HuntrError::Http)?;

        let response = self.handle_response_status(response).await?;

        match response.headers().get(CF_ID_HEADER) {
            None => Ok(None),
            Some(value) => {
                let token = value
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .ok_or_else(|| {
                        HuntrError::invalid_response(format!(
                            "{} header is not an integer: {:?}",
                            CF_ID_HEADER, value
                        ))
                    })?;
                Ok(Some(token))
            }
        }
    }

    /// Fetch the raw gym list for a coordinate using an already-obtained
    /// token. Each element of the result is a JSON-encoded string.
    pub async fn gyms_with_token(&self, lat: f64, lon: f64, cf_id: i64) -> Result<Vec<String>> {
        let time = Utc::now().timestamp();
        let time_until = calc_time_until(time, lat, lon, cf_id);

        let response = self
            .client
            .get(self.build_url("/gyms"))
            .header(USER_AGENT, HeaderValue::from_static(SWEEP_USER_AGENT))
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hashCheck", HASH_CHECK.to_string()),
                ("monster", MONSTER.to_string()),
                ("timeUntil", time_until.to_string()),
                ("time", time.to_string()),
            ])
            .send()
            .await
            .map_err(HuntrError::Http)?;

        let response = self.handle_response_status(response).await?;
        let body: GymsResponse = response.json().await.map_err(|e| {
            HuntrError::invalid_response(format!("Failed to parse gyms response: {}", e))
        })?;

        Ok(body.gyms)
    }

    /// Fetch gyms for a coordinate, authorising first.
    ///
    /// A cell that cannot authorise yields an empty list; the gyms request is
    /// never issued for it.
    pub async fn gyms(&self, lat: f64, lon: f64) -> Result<Vec<String>> {
        match self.authorise(lat, lon).await? {
            None => Ok(Vec::new()),
            Some(cf_id) => self.gyms_with_token(lat, lon, cf_id).await,
        }
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        match status {
            StatusCode::OK => Ok(response),
            StatusCode::TOO_MANY_REQUESTS => Err(HuntrError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(HuntrError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = GymHuntrClient::new().unwrap();
        assert_eq!(
            client.build_url("/authorise"),
            "https://api.gymhuntr.com/api/authorise"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let client = GymHuntrClient::new_with_base_url("http://localhost:8080").unwrap();
        assert_eq!(client.build_url("/gyms"), "http://localhost:8080/gyms");
    }
}
