// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote mod catalog and release lookups.
//!
//! ```text
//! CatalogClient (trait, object safe)
//!   fetch_profile(remote_id)         -> RemoteCatalogEntry
//!   fetch_latest_release(owner,repo) -> download url
//!   search(page)                     -> [RemoteCatalogEntry]
//!        |
//!        v
//! GameBananaClient
//!   ResponseCache  (injected, memory + api-cache.json)
//!   RateLimiter    (owned token bucket)
//!   reqwest::Client
//! ```
//!
//! The library only ever sees [`RemoteCatalogEntry`]; the raw API shapes
//! stay private to the client.

pub mod cache;
pub mod gamebanana;
pub mod rate_limit;

#[cfg(test)]
mod tests;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::KamiResult;

pub use cache::ResponseCache;
pub use gamebanana::GameBananaClient;
pub use rate_limit::RateLimiter;

/// One downloadable file of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub id: u64,
    pub download_url: String,
}

/// A mod as described by the remote catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCatalogEntry {
    pub remote_id: u64,
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub license: Option<String>,
    /// Newest first.
    pub files: Vec<RemoteFile>,
    pub is_nsfw: bool,
    pub date_added: Option<i64>,
}

impl RemoteCatalogEntry {
    /// The file treated as the current release.
    #[must_use]
    pub fn latest_file(&self) -> Option<&RemoteFile> {
        self.files.first()
    }
}

/// Source of catalog metadata and release downloads.
///
/// Methods return `BoxFuture` so the manager can hold a
/// `Arc<dyn CatalogClient>` and tests can substitute their own.
pub trait CatalogClient: Send + Sync {
    /// Full profile of one catalog entry.
    fn fetch_profile(&self, remote_id: u64) -> BoxFuture<'_, KamiResult<RemoteCatalogEntry>>;

    /// Download URL of the preferred asset of a repository's latest release.
    fn fetch_latest_release<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> BoxFuture<'a, KamiResult<String>>;

    /// One page of the game's newest submissions.
    fn search(&self, page: u32) -> BoxFuture<'_, KamiResult<Vec<RemoteCatalogEntry>>>;
}
