// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module with async downloads.
//!
//! ```text
//! Downloader::new()
//!   .url() .file() .progress() .silent() .cancel_token()
//!        |
//!        v
//!   download()            stream to file, partial file removed on error
//!
//! DownloadManager::start(url, dir, file)
//!   spawn Downloader on a TaskTracker
//!   -> DownloadHandle { id, completion }      flume::bounded(1)
//!   handle.wait().await -> path | error
//!   cancel_all()          parent CancellationToken
//!
//! Progress display
//!   Bar      [=====>     ] 50MB/100MB
//!   Spinner  * 50MB @ 5MB/s   (Bar with unknown size)
//!   Silent   (none)
//! ```

use crate::error::{KamiResult, NetworkError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// RAII guard that removes a partial download file on Drop unless explicitly kept.
///
/// Covers error returns and a dropped download future alike.
struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    /// Mark the download as complete - file will NOT be deleted on drop.
    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Shared HTTP client for downloads that were not given one.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("kamisama-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Pre-validated progress bar style for known file sizes.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Pre-validated spinner style for unknown file sizes.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    /// Progress bar with speed and ETA, or a spinner when the size is unknown
    #[default]
    Bar,
    /// No visual progress (silent mode)
    Silent,
}

/// Async HTTP downloader with builder pattern.
///
/// # Example
/// ```ignore
/// use kamisama_rs::net::Downloader;
///
/// Downloader::new()
///     .url("https://example.com/mod.zip")
///     .file("/tmp/mod.zip")
///     .download()
///     .await?;
/// ```
pub struct Downloader {
    client: Client,
    url: Option<String>,
    output_file: Option<PathBuf>,
    cancel: CancellationToken,
    progress_display: ProgressDisplay,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a new downloader using the shared client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(global_client().clone())
    }

    /// Create a downloader that sends requests through `client`.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            url: None,
            output_file: None,
            cancel: CancellationToken::new(),
            progress_display: ProgressDisplay::default(),
        }
    }

    /// Set the URL to download from.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the output file path.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Set the progress display style.
    #[must_use]
    pub const fn progress(mut self, style: ProgressDisplay) -> Self {
        self.progress_display = style;
        self
    }

    /// Disable progress display (silent mode).
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.progress_display = ProgressDisplay::Silent;
        self
    }

    /// Abort the transfer when `token` is cancelled.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Create a progress bar for the download.
    fn create_progress_bar(&self, total_size: u64) -> Option<ProgressBar> {
        match self.progress_display {
            ProgressDisplay::Silent => None,
            ProgressDisplay::Bar if total_size == 0 => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                Some(pb)
            }
            ProgressDisplay::Bar => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(bar_style());
                Some(pb)
            }
        }
    }

    /// Download to the configured file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL or output file is configured.
    /// - The network request fails or returns a non-success status code.
    /// - Parent directories cannot be created.
    /// - The output file cannot be created or written to.
    /// - The cancel token fires.
    pub async fn download(&self) -> KamiResult<()> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))?;
        let output = self
            .output_file
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: url.clone(),
                message: "no output file specified".to_string(),
            })?;

        if self.cancel.is_cancelled() {
            return Err(NetworkError::Interrupted.into());
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let total_size = response.content_length().unwrap_or(0);
        let progress_bar = self.create_progress_bar(total_size);

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!(
                        "failed to create parent directory {}: {}",
                        parent.display(),
                        e
                    ),
                })?;
        }

        let mut file =
            tokio::fs::File::create(output)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to create output file {}: {}", output.display(), e),
                })?;

        let mut guard = PartialFileGuard::new(output.clone());

        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            if self.cancel.is_cancelled() {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("interrupted");
                }
                return Err(NetworkError::Interrupted.into());
            }

            let chunk = chunk.map_err(NetworkError::Reqwest)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to write to {}: {}", output.display(), e),
                })?;

            if let Some(pb) = &progress_bar {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush()
            .await
            .map_err(|e| NetworkError::DownloadFailed {
                url: url.clone(),
                message: format!("failed to flush {}: {}", output.display(), e),
            })?;

        guard.keep();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("done");
        }

        Ok(())
    }
}

/// A transfer started by [`DownloadManager::start`].
#[derive(Debug)]
pub struct DownloadHandle {
    pub id: u64,
    completion: flume::Receiver<KamiResult<PathBuf>>,
}

impl DownloadHandle {
    /// Wait for the transfer and return the downloaded file's path.
    ///
    /// # Errors
    ///
    /// Returns the transfer's [`NetworkError`], or
    /// [`NetworkError::Interrupted`] if the task went away without a result.
    pub async fn wait(self) -> KamiResult<PathBuf> {
        self.completion
            .recv_async()
            .await
            .unwrap_or_else(|_| Err(NetworkError::Interrupted.into()))
    }
}

/// Runs downloads in the background and hands back awaitable handles.
#[derive(Debug)]
pub struct DownloadManager {
    client: Client,
    progress: ProgressDisplay,
    next_id: AtomicU64,
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new(global_client().clone(), ProgressDisplay::default())
    }
}

impl DownloadManager {
    #[must_use]
    pub fn new(client: Client, progress: ProgressDisplay) -> Self {
        Self {
            client,
            progress,
            next_id: AtomicU64::new(1),
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Start fetching `url` into `dest_dir/dest_file`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, url: &str, dest_dir: &Path, dest_file: &str) -> DownloadHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let dest = dest_dir.join(dest_file);
        let (tx, rx) = flume::bounded(1);

        let token = self.cancel.child_token();
        let downloader = Downloader::with_client(self.client.clone())
            .url(url)
            .file(&dest)
            .progress(self.progress)
            .cancel_token(token.clone());

        debug!(id, url, dest = %dest.display(), "download started");
        self.tracker.spawn(async move {
            // dropping the transfer future removes its partial file
            let result = tokio::select! {
                r = downloader.download() => r.map(|()| dest),
                () = token.cancelled() => Err(NetworkError::Interrupted.into()),
            };
            if let Err(e) = &result {
                warn!(id, error = %e, "download failed");
            }
            let _ = tx.send(result);
        });

        DownloadHandle { id, completion: rx }
    }

    /// Cancel every running transfer. Their handles resolve to
    /// [`NetworkError::Interrupted`].
    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }

    /// Wait for every spawned transfer to finish.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
