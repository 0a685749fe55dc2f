// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GameBanana catalog client, plus GitHub release lookups.
//!
//! ```text
//! {base}/Mod/{id}/ProfilePage                        -> RemoteCatalogEntry
//! {base}/Game/{game}/Subfeed?_nPage=N&_nPerpage=15   -> _aRecords[]
//! {github}/repos/{owner}/{repo}/releases/latest      -> first *.zip asset
//!
//! get_json(url):  cache hit? -> limiter.acquire() -> GET -> cache.set
//! ```

use std::sync::Arc;

use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{CatalogClient, RateLimiter, RemoteCatalogEntry, RemoteFile, ResponseCache};
use crate::config::types::{GameConfig, NetworkConfig};
use crate::error::{KamiResult, NetworkError};

/// Records per subfeed page.
pub const PAGE_SIZE: u32 = 15;

const DEFAULT_AUTHOR: &str = "Unknown";
const DEFAULT_VERSION: &str = "1.0";

/// HTTP client for the catalog and release APIs.
#[derive(Debug)]
pub struct GameBananaClient {
    http: Client,
    base_url: String,
    github_url: String,
    game_id: u64,
    limiter: RateLimiter,
    cache: Option<Arc<ResponseCache>>,
}

impl GameBananaClient {
    /// Build a client from configuration, sharing `cache` if given.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Reqwest`] if the HTTP client cannot be built.
    pub fn from_config(
        network: &NetworkConfig,
        game: &GameConfig,
        cache: Option<Arc<ResponseCache>>,
    ) -> KamiResult<Self> {
        let http = Client::builder()
            .user_agent(network.user_agent.as_str())
            .build()
            .map_err(NetworkError::Reqwest)?;

        Ok(Self {
            http,
            base_url: network.gamebanana_url.trim_end_matches('/').to_string(),
            github_url: network.github_url.trim_end_matches('/').to_string(),
            game_id: game.game_id,
            limiter: RateLimiter::new(network.rate_limit_capacity, network.rate_limit_per_second),
            cache,
        })
    }

    #[must_use]
    pub fn profile_url(&self, remote_id: u64) -> String {
        format!("{}/Mod/{remote_id}/ProfilePage", self.base_url)
    }

    #[must_use]
    pub fn subfeed_url(&self, page: u32) -> String {
        format!(
            "{}/Game/{}/Subfeed?_nPage={page}&_nPerpage={PAGE_SIZE}",
            self.base_url, self.game_id
        )
    }

    #[must_use]
    pub fn release_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/releases/latest", self.github_url)
    }

    /// Fetch and map one mod profile.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on transport failure, non-success status
    /// or an unexpected body.
    pub async fn profile(&self, remote_id: u64) -> KamiResult<RemoteCatalogEntry> {
        let url = self.profile_url(remote_id);
        let value = self.get_json(&url).await?;
        let record: RawRecord = decode(&url, value)?;
        Ok(record.into_entry(remote_id))
    }

    /// Fetch one page of the game subfeed.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on transport failure, non-success status
    /// or an unexpected body.
    pub async fn subfeed(&self, page: u32) -> KamiResult<Vec<RemoteCatalogEntry>> {
        let url = self.subfeed_url(page.max(1));
        let value = self.get_json(&url).await?;
        let feed: RawSubfeed = decode(&url, value)?;
        Ok(feed
            .records
            .into_iter()
            .filter_map(|r| r.id_row.map(|id| r.into_entry(id)))
            .collect())
    }

    /// Download URL of the latest release's preferred asset.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NoAssets`] for a release without assets, or
    /// another [`NetworkError`] if the lookup fails.
    pub async fn latest_release_url(&self, owner: &str, repo: &str) -> KamiResult<String> {
        let url = self.release_url(owner, repo);
        let value = self.get_json(&url).await?;
        let release: RawRelease = decode(&url, value)?;
        pick_asset(&release.assets)
            .map(|a| a.browser_download_url.clone())
            .ok_or_else(|| {
                NetworkError::NoAssets {
                    repo: format!("{owner}/{repo}"),
                }
                .into()
            })
    }

    async fn get_json(&self, url: &str) -> KamiResult<Value> {
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(url)
        {
            debug!(url, "served from cache");
            return Ok(hit);
        }

        self.limiter.acquire().await;
        debug!(url, "requesting");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let value: Value = response.json().await.map_err(NetworkError::Reqwest)?;
        if let Some(cache) = &self.cache {
            cache.set(url, value.clone());
        }
        Ok(value)
    }
}

impl CatalogClient for GameBananaClient {
    fn fetch_profile(&self, remote_id: u64) -> BoxFuture<'_, KamiResult<RemoteCatalogEntry>> {
        Box::pin(self.profile(remote_id))
    }

    fn fetch_latest_release<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, KamiResult<String>> {
        Box::pin(self.latest_release_url(owner, repo))
    }

    fn search(&self, page: u32) -> BoxFuture<'_, KamiResult<Vec<RemoteCatalogEntry>>> {
        Box::pin(self.subfeed(page))
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Result<T, NetworkError> {
    serde_json::from_value(value).map_err(|e| NetworkError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

// --- Raw API shapes ---

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "_idRow", default)]
    id_row: Option<u64>,
    #[serde(rename = "_sName", default)]
    name: String,
    #[serde(rename = "_sVersion", default)]
    version: Option<String>,
    #[serde(rename = "_sText", default)]
    text: Option<String>,
    #[serde(rename = "_aSubmitter", default)]
    submitter: Option<RawNamed>,
    #[serde(rename = "_aRootCategory", default)]
    root_category: Option<RawNamed>,
    #[serde(rename = "_sLicense", default)]
    license: Option<String>,
    #[serde(rename = "_bIsNsfw", default)]
    is_nsfw: bool,
    #[serde(rename = "_tsDateAdded", default)]
    date_added: Option<i64>,
    /// Object with `_aImages`, or an empty array when there is no media.
    #[serde(rename = "_aPreviewMedia", default)]
    preview_media: Value,
    #[serde(rename = "_aFiles", default)]
    files: Option<Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    #[serde(rename = "_sName", default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(rename = "_idRow")]
    id: u64,
    #[serde(rename = "_sDownloadUrl")]
    download_url: String,
}

#[derive(Debug, Deserialize)]
struct RawSubfeed {
    #[serde(rename = "_aRecords", default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRelease {
    #[serde(default)]
    assets: Vec<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    name: String,
    browser_download_url: String,
}

impl RawRecord {
    fn into_entry(self, remote_id: u64) -> RemoteCatalogEntry {
        let (icon_url, images) = preview_images(&self.preview_media);
        RemoteCatalogEntry {
            remote_id: self.id_row.unwrap_or(remote_id),
            name: self.name,
            author: self
                .submitter
                .and_then(|s| s.name)
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            version: self
                .version
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: self.text.unwrap_or_default(),
            icon_url,
            images,
            category: self.root_category.and_then(|c| c.name),
            license: self.license,
            files: self
                .files
                .unwrap_or_default()
                .into_iter()
                .map(|f| RemoteFile {
                    id: f.id,
                    download_url: f.download_url,
                })
                .collect(),
            is_nsfw: self.is_nsfw,
            date_added: self.date_added,
        }
    }
}

/// Icon (220px thumbnail when present) and full-size image URLs.
fn preview_images(media: &Value) -> (Option<String>, Vec<String>) {
    let Some(images) = media.get("_aImages").and_then(Value::as_array) else {
        return (None, Vec::new());
    };

    let url = |img: &Value, key: &str| -> Option<String> {
        let base = img.get("_sBaseUrl")?.as_str()?;
        let file = img.get(key)?.as_str()?;
        Some(format!("{base}/{file}"))
    };

    let icon = images
        .first()
        .and_then(|img| url(img, "_sFile220").or_else(|| url(img, "_sFile")));
    let full = images.iter().filter_map(|img| url(img, "_sFile")).collect();
    (icon, full)
}

/// First `.zip` asset, else the first asset.
fn pick_asset(assets: &[RawAsset]) -> Option<&RawAsset> {
    assets
        .iter()
        .find(|a| {
            std::path::Path::new(&a.name)
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
        })
        .or_else(|| assets.first())
}

#[cfg(test)]
pub(crate) fn entry_from_json(value: Value, remote_id: u64) -> RemoteCatalogEntry {
    decode::<RawRecord>("test", value)
        .map(|r| r.into_entry(remote_id))
        .unwrap_or_default()
}
