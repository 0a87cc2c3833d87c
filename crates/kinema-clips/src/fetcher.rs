//! Clip fetching seam.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::clip::MotionClip;
use crate::error::Result;

/// Resolves a clip identifier to zero or more named motion clips. Hosts
/// supply their own implementation for network transports; the engine only
/// ever awaits this through the settle-all loader.
#[async_trait]
pub trait ClipFetcher: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Vec<MotionClip>>;
}

/// Reads JSON clip files relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileClipFetcher {
    base_dir: PathBuf,
}

impl FileClipFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ClipFetcher for FileClipFetcher {
    async fn fetch(&self, id: &str) -> Result<Vec<MotionClip>> {
        let path = self.base_dir.join(id);
        let bytes = tokio::fs::read(&path).await?;
        let clips = serde_json::from_slice(&bytes)?;
        Ok(clips)
    }
}
