// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::gamebanana::entry_from_json;
use super::{GameBananaClient, RateLimiter, ResponseCache};
use crate::config::types::{GameConfig, NetworkConfig};

// =============================================================================
// Profile mapping
// =============================================================================

#[test]
fn test_profile_mapping() {
    let entry = entry_from_json(
        json!({
            "_idRow": 512,
            "_sName": "Ultra Instinct Goku",
            "_sVersion": "2.1",
            "_sText": "<b>new aura</b>",
            "_aSubmitter": { "_sName": "Modder" },
            "_aRootCategory": { "_sName": "Skins" },
            "_sLicense": "Ask first",
            "_bIsNsfw": false,
            "_tsDateAdded": 1_700_000_000,
            "_aPreviewMedia": { "_aImages": [
                { "_sBaseUrl": "https://images/a", "_sFile": "full.jpg", "_sFile220": "thumb.jpg" },
                { "_sBaseUrl": "https://images/b", "_sFile": "two.jpg" }
            ]},
            "_aFiles": [
                { "_idRow": 9001, "_sDownloadUrl": "https://dl/9001" },
                { "_idRow": 8000, "_sDownloadUrl": "https://dl/8000" }
            ]
        }),
        512,
    );

    assert_eq!(entry.remote_id, 512);
    assert_eq!(entry.author, "Modder");
    assert_eq!(entry.category.as_deref(), Some("Skins"));
    assert_eq!(entry.icon_url.as_deref(), Some("https://images/a/thumb.jpg"));
    assert_eq!(
        entry.images,
        vec!["https://images/a/full.jpg", "https://images/b/two.jpg"]
    );
    assert_eq!(entry.latest_file().map(|f| f.id), Some(9001));
    assert_eq!(entry.date_added, Some(1_700_000_000));
}

#[test]
fn test_profile_mapping_defaults_for_sparse_record() {
    let entry = entry_from_json(
        json!({ "_sName": "Bare", "_aPreviewMedia": [] }),
        77,
    );

    insta::assert_snapshot!(
        format!(
            "{} by {} v{} files={} icon={:?}",
            entry.name,
            entry.author,
            entry.version,
            entry.files.len(),
            entry.icon_url
        ),
        @"Bare by Unknown v1.0 files=0 icon=None"
    );
    assert_eq!(entry.remote_id, 77);
}

// =============================================================================
// Client URLs
// =============================================================================

#[test]
fn test_client_urls() {
    let network = NetworkConfig {
        gamebanana_url: "https://gb.example/apiv11/".into(),
        github_url: "https://gh.example".into(),
        ..NetworkConfig::default()
    };
    let client = GameBananaClient::from_config(&network, &GameConfig::default(), None).unwrap();

    assert_eq!(
        client.profile_url(42),
        "https://gb.example/apiv11/Mod/42/ProfilePage"
    );
    assert_eq!(
        client.subfeed_url(3),
        "https://gb.example/apiv11/Game/21179/Subfeed?_nPage=3&_nPerpage=15"
    );
    assert_eq!(
        client.release_url("UE4SS-RE", "RE-UE4SS"),
        "https://gh.example/repos/UE4SS-RE/RE-UE4SS/releases/latest"
    );
}

// =============================================================================
// Response cache
// =============================================================================

#[test]
fn test_cache_get_set_and_expiry() {
    let cache = ResponseCache::in_memory(Duration::from_secs(60));

    cache.set("a", json!({"x": 1}));
    cache.set_with_ttl("b", json!(2), Duration::ZERO);

    assert_eq!(cache.get("a"), Some(json!({"x": 1})));
    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("missing"), None);
}

#[test]
fn test_cache_invalidate_wildcard() {
    let cache = ResponseCache::in_memory(Duration::from_secs(60));
    cache.set("https://gb/Mod/1/ProfilePage", json!(1));
    cache.set("https://gb/Mod/2/ProfilePage", json!(2));
    cache.set("https://gb/Game/21179/Subfeed?_nPage=1", json!(3));

    assert_eq!(cache.invalidate("https://gb/Mod/*"), 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.invalidate("nothing*here"), 0);
}

#[test]
fn test_cache_prune_and_clear() {
    let cache = ResponseCache::in_memory(Duration::from_secs(60));
    cache.set("live", json!(true));
    cache.set_with_ttl("dead", json!(false), Duration::ZERO);

    assert_eq!(cache.prune(), 1);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_flush_and_reopen() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(super::cache::CACHE_FILE);

    let cache = ResponseCache::open(&path, Duration::from_secs(60));
    cache.set("k", json!("v"));
    cache.set_with_ttl("gone", json!(0), Duration::ZERO);
    cache.flush().unwrap();

    let reopened = ResponseCache::open(&path, Duration::from_secs(60));
    assert_eq!(reopened.get("k"), Some(json!("v")));
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_cache_open_corrupt_file_starts_empty() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("api-cache.json");
    std::fs::write(&path, "[[[").unwrap();

    let cache = ResponseCache::open(&path, Duration::from_secs(60));
    assert!(cache.is_empty());
}

#[test]
fn test_cache_instances_are_independent() {
    let a = Arc::new(ResponseCache::in_memory(Duration::from_secs(60)));
    let b = ResponseCache::in_memory(Duration::from_secs(60));
    a.set("shared?", json!(1));
    assert!(b.get("shared?").is_none());
}

// =============================================================================
// Rate limiter
// =============================================================================

#[test]
fn test_rate_limiter_capacity() {
    let limiter = RateLimiter::new(2, 0.001);

    assert!(limiter.try_acquire());
    assert!(limiter.try_acquire());
    assert!(!limiter.try_acquire());
}

#[test]
fn test_rate_limiters_do_not_share_state() {
    let a = RateLimiter::new(1, 0.001);
    let b = RateLimiter::new(1, 0.001);

    assert!(a.try_acquire());
    assert!(!a.try_acquire());
    assert!(b.try_acquire());
}

#[tokio::test]
async fn test_rate_limiter_acquire_waits_for_refill() {
    let limiter = RateLimiter::new(1, 50.0);
    limiter.acquire().await;

    let started = tokio::time::Instant::now();
    limiter.acquire().await;
    assert!(started.elapsed() >= Duration::from_millis(10));
    assert!(limiter.available() < 1.0);
}
