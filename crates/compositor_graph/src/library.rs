// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared, path-keyed cache of loaded presets.
//!
//! Unlike [`NodeGraph`](crate::NodeGraph), which is a plain value, the
//! library is shared between call sites. A single task owns the cache and
//! serves requests one at a time; [`PresetLibrary`] handles only hold a
//! channel to it, so they are cheap to clone and never lock.

use crate::config::LibraryConfig;
use crate::document::{Document, DocumentFormat};
use crate::error::DocumentError;
use crate::preset::Preset;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Pending requests before callers start waiting to send
const REQUEST_QUEUE_DEPTH: usize = 64;

/// Errors from the preset library
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Reading or decoding the preset failed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The library task is gone
    #[error("Preset library has shut down")]
    Closed,
}

/// Requests served by the library task
enum Request {
    Load {
        path: PathBuf,
        reply: oneshot::Sender<Result<Arc<Preset>, DocumentError>>,
    },
    Insert {
        path: PathBuf,
        preset: Arc<Preset>,
        reply: oneshot::Sender<()>,
    },
    Evict {
        path: PathBuf,
        reply: oneshot::Sender<Option<Arc<Preset>>>,
    },
    Paths {
        reply: oneshot::Sender<Vec<PathBuf>>,
    },
}

/// Handle to the preset library task
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    requests: mpsc::Sender<Request>,
    config: Arc<LibraryConfig>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { path, .. } => write!(f, "Load({})", path.display()),
            Self::Insert { path, .. } => write!(f, "Insert({})", path.display()),
            Self::Evict { path, .. } => write!(f, "Evict({})", path.display()),
            Self::Paths { .. } => f.write_str("Paths"),
        }
    }
}

impl PresetLibrary {
    /// Start the library task on the current tokio runtime
    pub fn spawn(config: LibraryConfig) -> Self {
        let (requests, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
        let config = Arc::new(config);
        let cache = PresetCache {
            entries: IndexMap::new(),
            config: Arc::clone(&config),
        };
        tokio::spawn(cache.run(rx));
        Self { requests, config }
    }

    /// The configuration the library was started with
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Get a preset, reading it from disk on first use
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Preset>, LibraryError> {
        let path = path.as_ref().to_path_buf();
        let reply = self.request(|reply| Request::Load { path, reply }).await?;
        Ok(reply?)
    }

    /// Get a preset by name from the configured search paths
    pub async fn load_named(&self, name: &str) -> Result<Arc<Preset>, LibraryError> {
        let path = self.config.resolve(name).ok_or_else(|| {
            DocumentError::Io {
                path: PathBuf::from(name),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "preset not in search paths"),
            }
        })?;
        self.load(path).await
    }

    /// Cache a preset under a path without touching the disk
    pub async fn insert(&self, path: impl AsRef<Path>, preset: Preset) -> Result<(), LibraryError> {
        let path = path.as_ref().to_path_buf();
        let preset = Arc::new(preset);
        self.request(|reply| Request::Insert { path, preset, reply }).await
    }

    /// Drop a cached preset
    pub async fn evict(&self, path: impl AsRef<Path>) -> Result<Option<Arc<Preset>>, LibraryError> {
        let path = path.as_ref().to_path_buf();
        self.request(|reply| Request::Evict { path, reply }).await
    }

    /// Paths currently cached, oldest first
    pub async fn cached_paths(&self) -> Result<Vec<PathBuf>, LibraryError> {
        self.request(|reply| Request::Paths { reply }).await
    }

    /// Number of cached presets
    pub async fn len(&self) -> Result<usize, LibraryError> {
        Ok(self.cached_paths().await?.len())
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> Result<bool, LibraryError> {
        Ok(self.len().await? == 0)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, LibraryError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(build(reply))
            .await
            .map_err(|_| LibraryError::Closed)?;
        response.await.map_err(|_| LibraryError::Closed)
    }
}

/// State owned by the library task
struct PresetCache {
    entries: IndexMap<PathBuf, Arc<Preset>>,
    config: Arc<LibraryConfig>,
}

impl PresetCache {
    async fn run(mut self, mut rx: mpsc::Receiver<Request>) {
        while let Some(request) = rx.recv().await {
            tracing::trace!(?request, "preset library request");
            match request {
                Request::Load { path, reply } => {
                    let result = self.load(path).await;
                    let _ = reply.send(result);
                }
                Request::Insert { path, preset, reply } => {
                    self.insert(path, preset);
                    let _ = reply.send(());
                }
                Request::Evict { path, reply } => {
                    let _ = reply.send(self.entries.shift_remove(&path));
                }
                Request::Paths { reply } => {
                    let _ = reply.send(self.entries.keys().cloned().collect());
                }
            }
        }
        tracing::debug!("Preset library stopped");
    }

    async fn load(&mut self, path: PathBuf) -> Result<Arc<Preset>, DocumentError> {
        if let Some(preset) = self.entries.get(&path) {
            return Ok(Arc::clone(preset));
        }

        let format = DocumentFormat::from_path(&path)?;
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DocumentError::Io {
                path: path.clone(),
                source,
            })?;
        let preset = if self.config.validate_on_load {
            Preset::decode(&text, format)?
        } else {
            Preset::decode_unchecked(&text, format)?
        };

        tracing::info!(preset = %preset.name, "Loaded preset {}", path.display());
        let preset = Arc::new(preset);
        self.insert(path, Arc::clone(&preset));
        Ok(preset)
    }

    fn insert(&mut self, path: PathBuf, preset: Arc<Preset>) {
        self.entries.shift_remove(&path);
        self.entries.insert(path, preset);
        while self.entries.len() > self.config.capacity.max(1) {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                tracing::debug!("Evicted preset {}", evicted.display());
            }
        }
    }
}
