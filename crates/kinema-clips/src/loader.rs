//! Settle-all clip loading.

use tracing::warn;

use crate::clip::MotionClip;
use crate::fetcher::ClipFetcher;

/// Identifiers for the three named clip slots. `None` slots are skipped and
/// resolve to empty clip sets.
#[derive(Debug, Clone, Default)]
pub struct ClipSources {
    pub idle: Option<String>,
    pub talk: Option<String>,
    pub wave: Option<String>,
}

/// The loader's settled output. `loaded` is always true once every request
/// has settled — an empty library still lets the engine proceed on the
/// procedural path.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    pub idle: Vec<MotionClip>,
    pub talk: Vec<MotionClip>,
    pub wave: Vec<MotionClip>,
    pub loaded: bool,
}

impl ClipLibrary {
    pub fn is_empty(&self) -> bool {
        self.idle.is_empty() && self.talk.is_empty() && self.wave.is_empty()
    }
}

async fn fetch_or_empty(
    fetcher: &dyn ClipFetcher,
    slot: &str,
    id: Option<&str>,
) -> Vec<MotionClip> {
    let Some(id) = id else {
        return Vec::new();
    };
    match fetcher.fetch(id).await {
        Ok(clips) => clips,
        Err(error) => {
            warn!(slot, id, %error, "clip fetch failed, falling back to empty set");
            Vec::new()
        }
    }
}

/// Issue the three clip requests concurrently and await all of them
/// regardless of individual outcome. One request's failure never cancels or
/// fails another; the wave slot falls back to the talk clips when its own
/// request yields nothing.
pub async fn load_clip_set(fetcher: &dyn ClipFetcher, sources: &ClipSources) -> ClipLibrary {
    let (idle, talk, wave) = tokio::join!(
        fetch_or_empty(fetcher, "idle", sources.idle.as_deref()),
        fetch_or_empty(fetcher, "talk", sources.talk.as_deref()),
        fetch_or_empty(fetcher, "wave", sources.wave.as_deref()),
    );

    let wave = if wave.is_empty() { talk.clone() } else { wave };

    ClipLibrary {
        idle,
        talk,
        wave,
        loaded: true,
    }
}
