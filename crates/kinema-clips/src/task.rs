//! Background load task polled from the frame loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use tracing::warn;

use crate::fetcher::ClipFetcher;
use crate::loader::{load_clip_set, ClipLibrary, ClipSources};

/// Liveness guard for in-flight loads. The engine bumps the generation when
/// the avatar instance is replaced or torn down; completions stamped with an
/// older generation are dropped instead of being applied to a stale engine.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Invalidate every load spawned before this call.
    #[inline]
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Handle to one in-flight clip load. The frame loop polls it; it never
/// blocks and never errors.
pub struct ClipTask {
    rx: Receiver<(u64, ClipLibrary)>,
    generation: Generation,
}

impl ClipTask {
    /// Spawn the settle-all load on the given runtime, stamped with the
    /// current generation.
    pub fn spawn(
        runtime: &tokio::runtime::Handle,
        fetcher: Arc<dyn ClipFetcher>,
        sources: ClipSources,
        generation: Generation,
    ) -> Self {
        let stamp = generation.current();
        let (tx, rx) = bounded(1);

        runtime.spawn(async move {
            let library = load_clip_set(fetcher.as_ref(), &sources).await;
            // Engine may have dropped the task already; nothing to deliver to.
            let _ = tx.try_send((stamp, library));
        });

        Self { rx, generation }
    }

    /// Non-blocking completion poll. Returns the settled library once, and
    /// only if the engine generation still matches the one the load was
    /// spawned under.
    pub fn poll(&self) -> Option<ClipLibrary> {
        let (stamp, library) = self.rx.try_recv().ok()?;
        if stamp != self.generation.current() {
            warn!(
                stamp,
                current = self.generation.current(),
                "dropping stale clip load completion"
            );
            return None;
        }
        Some(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::MotionClip;
    use crate::error::ClipError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct OkFetcher;

    #[async_trait]
    impl ClipFetcher for OkFetcher {
        async fn fetch(&self, id: &str) -> crate::Result<Vec<MotionClip>> {
            Ok(vec![MotionClip {
                name: id.to_string(),
                duration_secs: 1.0,
                tracks: Vec::new(),
            }])
        }
    }

    struct FailFetcher;

    #[async_trait]
    impl ClipFetcher for FailFetcher {
        async fn fetch(&self, id: &str) -> crate::Result<Vec<MotionClip>> {
            Err(ClipError::Unavailable(id.to_string()))
        }
    }

    fn sources() -> ClipSources {
        ClipSources {
            idle: Some("idle".into()),
            talk: Some("talk".into()),
            wave: None,
        }
    }

    fn poll_until_settled(task: &ClipTask) -> Option<ClipLibrary> {
        for _ in 0..200 {
            if let Some(library) = task.poll() {
                return Some(library);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_task_delivers_once() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let generation = Generation::new();
        let task = ClipTask::spawn(
            runtime.handle(),
            Arc::new(OkFetcher),
            sources(),
            generation,
        );

        let library = poll_until_settled(&task).expect("load never settled");
        assert!(library.loaded);
        assert_eq!(library.idle[0].name, "idle");
        // Wave had no source and falls back to talk.
        assert_eq!(library.wave[0].name, "talk");

        assert!(task.poll().is_none());
    }

    #[test]
    fn test_failed_loads_still_settle() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let task = ClipTask::spawn(
            runtime.handle(),
            Arc::new(FailFetcher),
            sources(),
            Generation::new(),
        );

        let library = poll_until_settled(&task).expect("load never settled");
        assert!(library.loaded);
        assert!(library.is_empty());
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let generation = Generation::new();
        let task = ClipTask::spawn(
            runtime.handle(),
            Arc::new(OkFetcher),
            sources(),
            generation.clone(),
        );

        // Avatar instance replaced while the load is in flight.
        generation.bump();

        // Give the load time to settle, then confirm it is discarded.
        std::thread::sleep(Duration::from_millis(100));
        assert!(task.poll().is_none());
        assert!(task.poll().is_none());
    }
}
