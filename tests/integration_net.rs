// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the network layer using wiremock.
//!
//! Covers:
//! - File downloads and HTTP errors
//! - Background transfers through `DownloadManager`
//! - Catalog profile, subfeed and release lookups
//! - Response caching

use std::sync::Arc;
use std::time::Duration;

use kamisama_rs::config::types::{GameConfig, NetworkConfig};
use kamisama_rs::error::{KamiError, NetworkError};
use kamisama_rs::net::{DownloadManager, Downloader, ProgressDisplay};
use kamisama_rs::remote::cache::ResponseCache;
use kamisama_rs::remote::gamebanana::GameBananaClient;
use kamisama_rs::remote::CatalogClient;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn network_config(server: &MockServer) -> NetworkConfig {
    NetworkConfig {
        gamebanana_url: format!("{}/apiv11", server.uri()),
        github_url: server.uri(),
        rate_limit_capacity: 100,
        rate_limit_per_second: 100.0,
        ..NetworkConfig::default()
    }
}

fn client(server: &MockServer, cache: Option<Arc<ResponseCache>>) -> GameBananaClient {
    GameBananaClient::from_config(&network_config(server), &GameConfig::default(), cache)
        .expect("client")
}

fn http_status(err: &KamiError) -> Option<u16> {
    match err {
        KamiError::Network(boxed) => match boxed.as_ref() {
            NetworkError::HttpError { status, .. } => Some(*status),
            _ => None,
        },
        _ => None,
    }
}

// =============================================================================
// Downloader
// =============================================================================

#[tokio::test]
async fn test_download_file_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/9001"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PAK\x00data".to_vec()))
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("nested").join("mod.zip");

    let url = format!("{}/files/9001", mock_server.uri());
    let result = Downloader::new().url(&url).file(&output_file).silent().download().await;

    assert!(result.is_ok(), "Download failed: {:?}", result.err());
    assert_eq!(std::fs::read(&output_file).unwrap(), b"PAK\x00data");
}

#[tokio::test]
async fn test_download_http_errors_leave_no_file() {
    for status in [404, 500] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.zip"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let temp_dir = temp_dir();
        let output_file = temp_dir.path().join("missing.zip");
        let url = format!("{}/missing.zip", mock_server.uri());
        let err = Downloader::new()
            .url(&url)
            .file(&output_file)
            .silent()
            .download()
            .await
            .unwrap_err();

        assert_eq!(http_status(&err), Some(status));
        assert!(!output_file.exists());
    }
}

#[tokio::test]
async fn test_download_without_url() {
    let temp_dir = temp_dir();
    let err = Downloader::new()
        .file(temp_dir.path().join("x"))
        .silent()
        .download()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        KamiError::Network(ref boxed) if matches!(boxed.as_ref(), NetworkError::InvalidUrl(_))
    ));
}

// =============================================================================
// DownloadManager
// =============================================================================

#[tokio::test]
async fn test_manager_runs_transfers_concurrently() {
    let mock_server = MockServer::start().await;
    for n in 1..=3 {
        Mock::given(method("GET"))
            .and(path(format!("/f/{n}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("file {n}")))
            .mount(&mock_server)
            .await;
    }

    let temp_dir = temp_dir();
    let manager = DownloadManager::new(reqwest::Client::new(), ProgressDisplay::Silent);
    let handles: Vec<_> = (1..=3)
        .map(|n| {
            manager.start(
                &format!("{}/f/{n}", mock_server.uri()),
                temp_dir.path(),
                &format!("{n}.zip"),
            )
        })
        .collect();

    let ids: Vec<u64> = handles.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    for (n, handle) in (1..=3).zip(handles) {
        let dest = handle.wait().await.unwrap();
        assert_eq!(dest, temp_dir.path().join(format!("{n}.zip")));
        assert_eq!(std::fs::read_to_string(dest).unwrap(), format!("file {n}"));
    }
    manager.shutdown().await;
}

#[tokio::test]
async fn test_manager_cancel_all_interrupts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let manager = DownloadManager::new(reqwest::Client::new(), ProgressDisplay::Silent);
    let handle = manager.start(
        &format!("{}/slow.zip", mock_server.uri()),
        temp_dir.path(),
        "slow.zip",
    );
    manager.cancel_all();

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(
        err,
        KamiError::Network(ref boxed) if matches!(boxed.as_ref(), NetworkError::Interrupted)
    ));
    manager.shutdown().await;
    assert!(!temp_dir.path().join("slow.zip").exists());
}

// =============================================================================
// GameBanana client
// =============================================================================

#[tokio::test]
async fn test_profile_lookup() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv11/Mod/512/ProfilePage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_idRow": 512,
            "_sName": "Ultra Instinct Goku",
            "_sVersion": "2.1",
            "_aSubmitter": { "_sName": "Modder" },
            "_aRootCategory": { "_sName": "Skins" },
            "_aPreviewMedia": [],
            "_aFiles": [{ "_idRow": 9001, "_sDownloadUrl": "https://dl/9001" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let entry = client(&mock_server, None).fetch_profile(512).await.unwrap();
    assert_eq!(entry.name, "Ultra Instinct Goku");
    assert_eq!(entry.version, "2.1");
    assert_eq!(entry.author, "Modder");
    assert_eq!(entry.latest_file().map(|f| f.id), Some(9001));
}

#[tokio::test]
async fn test_profile_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv11/Mod/1/ProfilePage"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, None).profile(1).await.unwrap_err();
    assert_eq!(http_status(&err), Some(404));
}

#[tokio::test]
async fn test_subfeed_page_skips_records_without_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv11/Game/21179/Subfeed"))
        .and(query_param("_nPage", "2"))
        .and(query_param("_nPerpage", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_aRecords": [
                { "_idRow": 10, "_sName": "Stage Pack" },
                { "_sName": "No id" },
                { "_idRow": 11, "_sName": "Music Pack", "_bIsNsfw": true }
            ]
        })))
        .mount(&mock_server)
        .await;

    let entries = client(&mock_server, None).search(2).await.unwrap();
    let names: Vec<(u64, &str)> = entries.iter().map(|e| (e.remote_id, e.name.as_str())).collect();
    assert_eq!(names, vec![(10, "Stage Pack"), (11, "Music Pack")]);
    assert!(entries[1].is_nsfw);
}

#[tokio::test]
async fn test_latest_release_prefers_zip_asset() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/UE4SS-RE/RE-UE4SS/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v3.0.1",
            "assets": [
                { "name": "notes.txt", "browser_download_url": "https://dl/notes.txt" },
                { "name": "UE4SS_v3.0.1.zip", "browser_download_url": "https://dl/ue4ss.zip" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let url = client(&mock_server, None)
        .fetch_latest_release("UE4SS-RE", "RE-UE4SS")
        .await
        .unwrap();
    assert_eq!(url, "https://dl/ue4ss.zip");
}

#[tokio::test]
async fn test_latest_release_without_assets() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": [] })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, None)
        .latest_release_url("o", "r")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "network error: no release assets found for o/r");
}

#[tokio::test]
async fn test_cached_profile_skips_second_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv11/Mod/7/ProfilePage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_sName": "Cached" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let cache_path = temp_dir.path().join("api-cache.json");
    let cache = Arc::new(ResponseCache::open(&cache_path, Duration::from_secs(300)));
    let gb = client(&mock_server, Some(Arc::clone(&cache)));

    assert_eq!(gb.profile(7).await.unwrap().name, "Cached");
    assert_eq!(gb.profile(7).await.unwrap().name, "Cached");
    assert_eq!(cache.len(), 1);

    cache.flush().unwrap();
    let reopened = ResponseCache::open(&cache_path, Duration::from_secs(300));
    assert!(reopened.get(&gb.profile_url(7)).is_some());
}
