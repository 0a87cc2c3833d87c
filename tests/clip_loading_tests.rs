//! Background clip loading through the engine: settle-all semantics, the
//! wave→talk fallback, and invalidation of in-flight loads on rebind.

#![cfg(feature = "clips")]

#[path = "helpers/mod.rs"]
mod helpers;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use helpers::{init_tracing, FixtureRig, TICK};
use kinema::prelude::*;
use kinema::{ClipError, MotionClip, RotationTrack};

struct ScriptedFetcher {
    failing: HashSet<String>,
}

impl ScriptedFetcher {
    fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ClipFetcher for ScriptedFetcher {
    async fn fetch(&self, id: &str) -> Result<Vec<MotionClip>, ClipError> {
        if self.failing.contains(id) {
            return Err(ClipError::Unavailable(id.to_string()));
        }
        Ok(vec![MotionClip {
            name: id.to_string(),
            duration_secs: 1.0,
            tracks: vec![RotationTrack {
                bone: "mixamorigHead".to_string(),
                times: vec![0.0, 1.0],
                rotations: vec![[0.0, 0.0, 0.0], [0.1, 0.0, 0.0]],
            }],
        }])
    }
}

fn engine_with_fetcher(fetcher: Arc<dyn ClipFetcher>, runtime: &tokio::runtime::Runtime) -> AvatarEngine {
    init_tracing();
    AvatarEngine::builder()
        .clip_runtime(runtime.handle().clone())
        .clip_fetcher(fetcher)
        .build()
        .unwrap()
}

fn sources() -> ClipSources {
    ClipSources {
        idle: Some("idle.json".to_string()),
        talk: Some("talk.json".to_string()),
        wave: Some("wave.json".to_string()),
    }
}

/// Tick the engine until the clip library settles or the deadline passes.
fn tick_until_loaded(engine: &mut AvatarEngine, rig: &mut FixtureRig) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        engine.tick(TICK, rig, None);
        if engine.clips().is_some() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_load_clips_without_configuration_errors() {
    init_tracing();
    let mut engine = AvatarEngine::builder().build().unwrap();
    let err = engine.load_clips(sources()).unwrap_err();
    assert!(matches!(err, kinema::Error::ClipsNotConfigured));
}

#[test]
fn test_clip_set_settles_through_tick() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut engine = engine_with_fetcher(Arc::new(ScriptedFetcher::new(&[])), &runtime);
    let mut rig = FixtureRig::ready_player_me();
    engine.bind_rig(&rig);

    engine.load_clips(sources()).unwrap();
    assert!(tick_until_loaded(&mut engine, &mut rig));

    let library = engine.clips().unwrap();
    assert!(library.loaded);
    assert_eq!(library.idle.len(), 1);
    assert_eq!(library.talk.len(), 1);
    assert_eq!(library.wave.len(), 1);
    assert_eq!(library.wave[0].name, "wave.json");
}

#[test]
fn test_failed_wave_falls_back_to_talk() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut engine =
        engine_with_fetcher(Arc::new(ScriptedFetcher::new(&["wave.json"])), &runtime);
    let mut rig = FixtureRig::ready_player_me();
    engine.bind_rig(&rig);

    engine.load_clips(sources()).unwrap();
    assert!(tick_until_loaded(&mut engine, &mut rig));

    let library = engine.clips().unwrap();
    assert!(library.loaded);
    assert_eq!(library.wave.len(), 1);
    assert_eq!(library.wave[0].name, "talk.json");
}

#[test]
fn test_all_failures_still_settle_loaded() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut engine = engine_with_fetcher(
        Arc::new(ScriptedFetcher::new(&["idle.json", "talk.json", "wave.json"])),
        &runtime,
    );
    let mut rig = FixtureRig::ready_player_me();
    engine.bind_rig(&rig);

    engine.load_clips(sources()).unwrap();
    assert!(tick_until_loaded(&mut engine, &mut rig));

    let library = engine.clips().unwrap();
    assert!(library.loaded);
    assert!(library.is_empty());
}

#[test]
fn test_rebinding_discards_inflight_load() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut engine = engine_with_fetcher(Arc::new(ScriptedFetcher::new(&[])), &runtime);
    let mut rig = FixtureRig::ready_player_me();
    engine.bind_rig(&rig);

    engine.load_clips(sources()).unwrap();
    // A new model arrives before the load completes.
    engine.bind_rig(&rig);

    // Give the background task ample time to finish, then verify its result
    // never lands on the rebound engine.
    std::thread::sleep(Duration::from_millis(200));
    for _ in 0..30 {
        engine.tick(TICK, &mut rig, None);
    }
    assert!(engine.clips().is_none());

    // A fresh load for the new binding still works.
    engine.load_clips(sources()).unwrap();
    assert!(tick_until_loaded(&mut engine, &mut rig));
}

#[test]
fn test_procedural_path_never_blocks_on_clips() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut engine = engine_with_fetcher(Arc::new(ScriptedFetcher::new(&[])), &runtime);
    let mut rig = FixtureRig::ready_player_me();
    engine.bind_rig(&rig);

    engine.load_clips(sources()).unwrap();
    engine.signal_str("wave");
    engine.tick(TICK, &mut rig, None);

    // The wave pose is live on the very first frame, loaded clips or not.
    assert_eq!(engine.behavior(), Behavior::Wave);
    let upper = rig.rotation(rig.bone("mixamorigRightArm"));
    assert!((upper.y - 0.7).abs() < 1e-5);
}
