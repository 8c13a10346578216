//! Runtime settings for the fetch services and the injected UI.

use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::time::Duration;

/// Endpoints and tuning knobs. Intended for saving to extension storage.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Base url of the float inspection service. The inspect link is passed
    /// as the `url` query parameter.
    pub float_api_url: String,
    /// Base url of the per-user stall listing service.
    pub stall_api_url: String,
    /// Public market site, used for listing and rank links.
    pub market_url: String,
    /// How often the selected item is re-read from the host page.
    pub poll_interval_ms: u64,
    /// Ranks above this value are not shown.
    pub rank_threshold: u32,
}

impl Settings {
    /// Creates a Settings instance from environment variables, with
    /// conservative in-code defaults.
    ///
    /// # Environment Variables
    /// - `FLOAT_API_URL`
    /// - `STALL_API_URL`
    /// - `MARKET_URL`
    /// - `SELECTION_POLL_MS`: milliseconds, must be non-zero.
    /// - `RANK_THRESHOLD`
    pub fn from_env() -> Self {
        const FLOAT_API_URL: &str = "https://api.csfloat.com/";
        const STALL_API_URL: &str = "https://csfloat.com/api/v1/users";
        const MARKET_URL: &str = "https://csfloat.com";
        const POLL_INTERVAL_MS: u64 = 100;
        const RANK_THRESHOLD: u32 = 1000;

        let float_api_url =
            env::var("FLOAT_API_URL").unwrap_or_else(|_| FLOAT_API_URL.to_string());
        let stall_api_url =
            env::var("STALL_API_URL").unwrap_or_else(|_| STALL_API_URL.to_string());
        let market_url = env::var("MARKET_URL").unwrap_or_else(|_| MARKET_URL.to_string());

        let poll_interval_ms = env::var("SELECTION_POLL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(POLL_INTERVAL_MS);

        let rank_threshold = env::var("RANK_THRESHOLD")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(RANK_THRESHOLD);

        Self {
            float_api_url,
            stall_api_url: stall_api_url.trim_end_matches('/').to_string(),
            market_url: market_url.trim_end_matches('/').to_string(),
            poll_interval_ms,
            rank_threshold,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Link to a single market listing.
    pub fn listing_url(&self, listing_id: &str) -> String {
        format!("{}/item/{}", self.market_url, listing_id)
    }

    /// Link to the rank database, narrowed to one skin and one rank position.
    pub fn rank_url(&self, defindex: u32, paintindex: u32, rank: u32) -> String {
        format!(
            "{}/db?defIndex={}&paintIndex={}&min={}&max={}",
            self.market_url, defindex, paintindex, rank, rank
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}
