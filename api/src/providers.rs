//! HTTP providers for float and stall data, and the process-wide memoizing
//! fetchers built on them.

use crate::fetcher::{MemoizingFetcher, Provider};
use crate::inventory::{InspectLink, SteamId};
use crate::item_info::ItemInfo;
use crate::settings::Settings;
use crate::stall::StallSnapshot;
use crate::ApiError;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

/// A failure reported by one of the remote services.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderError {
    #[error("service responded with HTTP {0}")]
    Status(u16),
    #[error("service error {code}: {message}")]
    Service { code: i64, message: String },
    #[error("response contained no item info")]
    MissingItemInfo,
}

/// Body shape shared by both services when a request fails.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default, alias = "error")]
    message: String,
}

/// Response of the inspection service.
#[derive(Deserialize, Debug)]
struct InspectResponse {
    iteminfo: Option<ItemInfo>,
}

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    match resp.json::<ErrorBody>().await {
        Ok(body) if !body.message.is_empty() => Err(ProviderError::Service {
            code: body.code,
            message: body.message,
        }
        .into()),
        _ => Err(ProviderError::Status(status.as_u16()).into()),
    }
}

/// Looks up float data for an inspect link.
pub struct FloatProvider {
    settings: Settings,
}

impl FloatProvider {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Provider for FloatProvider {
    type Key = InspectLink;
    type Value = ItemInfo;

    async fn get(&self, key: &InspectLink) -> Result<ItemInfo, ApiError> {
        let client = reqwest::Client::new();
        let resp = client
            .get(&self.settings.float_api_url)
            .query(&[("url", key.as_str())])
            .send()
            .await?;

        let body: InspectResponse = read_json(resp).await?;
        body.iteminfo
            .ok_or_else(|| ProviderError::MissingItemInfo.into())
    }
}

/// Looks up the market listings of one owner.
pub struct StallProvider {
    settings: Settings,
}

impl StallProvider {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    fn stall_url(&self, owner: &SteamId) -> String {
        format!("{}/{}/stall", self.settings.stall_api_url, owner)
    }
}

impl Provider for StallProvider {
    type Key = SteamId;
    type Value = StallSnapshot;

    async fn get(&self, key: &SteamId) -> Result<StallSnapshot, ApiError> {
        let client = reqwest::Client::new();
        let resp = client.get(self.stall_url(key)).send().await?;
        read_json(resp).await
    }
}

pub type FloatFetcher = MemoizingFetcher<FloatProvider>;
pub type StallFetcher = MemoizingFetcher<StallProvider>;

/// The float fetcher shared by every component instance in the process.
pub fn float_fetcher() -> &'static FloatFetcher {
    static FETCHER: OnceLock<FloatFetcher> = OnceLock::new();
    FETCHER.get_or_init(|| MemoizingFetcher::new(FloatProvider::new(Settings::default())))
}

/// The stall fetcher shared by every component instance in the process.
pub fn stall_fetcher() -> &'static StallFetcher {
    static FETCHER: OnceLock<StallFetcher> = OnceLock::new();
    FETCHER.get_or_init(|| MemoizingFetcher::new(StallProvider::new(Settings::default())))
}
