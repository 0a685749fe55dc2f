// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TTL cache for API responses, in memory and optionally on disk.
//!
//! ```text
//! open(path)   load api-cache.json, drop expired
//! get(key)     hit if now - stored_at < ttl
//! set(key, v)  insert, evict oldest past MAX_ENTRIES, mark dirty
//! flush()      write live entries back (only when dirty)
//! ```
//!
//! Constructed once at startup and handed to the clients that use it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{FsError, KamiResult};
use crate::utility::fs::atomic::write_atomic;

/// File name of the on-disk cache inside the data directory.
pub const CACHE_FILE: &str = "api-cache.json";

const MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    data: Value,
    /// Unix milliseconds.
    timestamp: u64,
    /// Milliseconds.
    ttl: u64,
}

impl Entry {
    const fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) >= self.ttl
    }
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    dirty: bool,
}

/// Response cache keyed by request URL.
#[derive(Debug)]
pub struct ResponseCache {
    path: Option<PathBuf>,
    default_ttl: Duration,
    state: Mutex<State>,
}

impl ResponseCache {
    /// Memory-only cache.
    #[must_use]
    pub fn in_memory(default_ttl: Duration) -> Self {
        Self {
            path: None,
            default_ttl,
            state: Mutex::new(State::default()),
        }
    }

    /// Cache backed by `path`. A missing or unreadable file starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, default_ttl: Duration) -> Self {
        let path = path.into();
        let now = now_millis();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Entry>>(&raw) {
                Ok(mut entries) => {
                    entries.retain(|_, e| !e.is_expired(now));
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable response cache");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        debug!(path = %path.display(), entries = entries.len(), "response cache loaded");

        Self {
            path: Some(path),
            default_ttl,
            state: Mutex::new(State {
                entries,
                dirty: false,
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Cached value for `key`, if still fresh.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = now_millis();
        let mut state = self.lock();
        match state.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                trace!(key, "cache hit");
                Some(entry.data.clone())
            }
            Some(_) => {
                state.entries.remove(key);
                state.dirty = true;
                trace!(key, "cache expired");
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let entry = Entry {
            data: value,
            timestamp: now_millis(),
            ttl: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        };
        let mut state = self.lock();
        state.entries.insert(key.into(), entry);
        if state.entries.len() > MAX_ENTRIES
            && let Some(oldest) = state
                .entries
                .iter()
                .min_by_key(|(_, e)| e.timestamp)
                .map(|(k, _)| k.clone())
        {
            state.entries.remove(&oldest);
        }
        state.dirty = true;
    }

    /// Drop entries whose key matches `pattern`, where `*` matches any run
    /// of characters and the rest is literal. Returns how many were removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let Ok(re) = wildcard_regex(pattern) else {
            return 0;
        };
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|k, _| !re.is_match(k));
        let removed = before - state.entries.len();
        if removed > 0 {
            state.dirty = true;
        }
        removed
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.dirty = true;
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let now = now_millis();
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, e| !e.is_expired(now));
        let removed = before - state.entries.len();
        if removed > 0 {
            state.dirty = true;
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist live entries if anything changed since the last flush.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the cache file cannot be written.
    pub fn flush(&self) -> KamiResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let now = now_millis();
        let mut state = self.lock();
        if !state.dirty {
            return Ok(());
        }
        state.entries.retain(|_, e| !e.is_expired(now));

        let raw = serde_json::to_vec(&state.entries)
            .map_err(|e| FsError::from_io(path, std::io::Error::other(e)))?;
        write_atomic(path, &raw).map_err(|e| FsError::from_io(path, e))?;
        state.dirty = false;
        debug!(path = %path.display(), entries = state.entries.len(), "response cache flushed");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$"))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
