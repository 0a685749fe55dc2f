// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 KamiError (~24 bytes)
//!                        |
//!   +------+------+------+------+------+------+------+
//!   |      |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v      v
//!  Cfg  Deploy  Lib    Net  Archive  Proc    Fs   Io/Other
//!  Box   Box    Box    Box    Box    Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue
//!   Deploy   GamePathNotSet, RootCreation, Registry
//!   Library  ModNotFound, ProfileNotFound, Read, Parse, Write
//!   Network  Reqwest, HttpError, Decode, NoFiles
//!   Archive  Open, Zip, Io
//!   Process  ExecutableNotFound, SpawnFailed
//!   Fs       NotFound, PermissionDenied, IoError
//!
//! All variants boxed => KamiError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`KamiError`].
pub type KamiResult<T> = std::result::Result<T, KamiError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum KamiError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Deployment into the game tree failed.
    #[error("deploy error: {0}")]
    Deploy(#[from] Box<DeployError>),

    /// Mod library or profile store error.
    #[error("library error: {0}")]
    Library(#[from] Box<LibraryError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Archive extraction failed.
    #[error("archive error: {0}")]
    Archive(#[from] Box<ArchiveError>),

    /// Process launch failed.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl KamiError {
    /// Create a [`KamiError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for KamiError {
                fn from(err: $error) -> Self {
                    KamiError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    DeployError => Deploy,
    LibraryError => Library,
    NetworkError => Network,
    ArchiveError => Archive,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Deploy Errors ---

/// Structural deployment errors.
///
/// Per-file link and copy failures are never reported through this type;
/// they are logged and the file is skipped.
#[derive(Debug, Error)]
pub enum DeployError {
    /// No game path has been configured.
    #[error("game path is not set")]
    GamePathNotSet,

    /// A required target root could not be created.
    #[error("failed to create target directory '{path}': {source}")]
    RootCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The loader registry file could not be read or written.
    #[error("failed to update loader registry '{path}': {source}")]
    Registry {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Library Errors ---

/// Mod library and profile store errors.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No mod with the given id.
    #[error("mod '{0}' not found")]
    ModNotFound(String),

    /// No profile with the given id.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// The mod has no pending update.
    #[error("mod '{0}' has no pending update")]
    NoUpdate(String),

    /// Failed to read a library document.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A library document is not valid JSON for its schema.
    #[error("failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    /// Failed to write a library document.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was cancelled.
    #[error("download interrupted")]
    Interrupted,

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Response body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The remote entry has no downloadable files.
    #[error("No download files found for mod {remote_id}")]
    NoFiles { remote_id: u64 },

    /// The release has no downloadable assets.
    #[error("no release assets found for {repo}")]
    NoAssets { repo: String },

    /// I/O error during download.
    #[error("io error during download: {0}")]
    Io(#[from] std::io::Error),
}

// --- Archive Errors ---

/// Archive extraction errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("failed to open archive '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The archive is corrupt or uses an unsupported feature.
    #[error("invalid archive '{path}': {message}")]
    Zip { path: String, message: String },

    /// Writing an extracted entry failed.
    #[error("failed to extract to '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// No game executable could be found.
    #[error("game executable not found: '{path}'")]
    ExecutableNotFound { path: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error for `path` into the matching variant.
    #[must_use]
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests;
