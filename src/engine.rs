//! AvatarEngine that coordinates the behavior, pose, and voice subsystems.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use kinema_core::{AnimState, Behavior, BehaviorFsm, EngineConfig};
use kinema_rig::{resolve_roles, BoneRoleMap, PoseSynthesizer, Rig};
use kinema_voice::{AudioFeed, EnvelopeExtractor, MorphBinding, MorphBlender};

#[cfg(feature = "clips")]
use kinema_clips::{ClipFetcher, ClipLibrary, ClipSources, ClipTask, Generation, RuntimeHandle};

/// Clone-able handle for delivering behavior signals from host callbacks.
///
/// Signals are queued and drained at the top of the next `tick`, so a
/// signal's effects are guaranteed visible to that tick — the single
/// execution context serializes signal handling and frame updates.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: Sender<Behavior>,
}

impl SignalSender {
    pub fn send(&self, behavior: Behavior) {
        // A disconnected engine just means the avatar was torn down.
        let _ = self.tx.send(behavior);
    }

    /// Accepts the raw external signal value; unrecognized strings coerce
    /// to `Idle`.
    pub fn send_str(&self, signal: &str) {
        self.send(Behavior::parse(signal));
    }
}

/// One avatar instance: behavior state machine, procedural pose
/// synthesizer, envelope extractor, and morph blender, driven by the host's
/// frame callback.
///
/// All per-avatar mutable state lives on this value — nothing is
/// process-global. `tick` and the signal path are total: they never panic
/// and never error, degrading to a still-rendering visual state on any
/// resolution miss or resource failure.
///
/// # Example
///
/// ```ignore
/// use kinema::prelude::*;
///
/// let mut engine = AvatarEngine::builder()
///     .wave_duration(2.0)
///     .build()?;
///
/// engine.bind_rig(&rig);
/// engine.signal_str("wave");
///
/// // In the host's frame callback:
/// engine.tick(delta_seconds, &mut rig, Some(&audio));
/// ```
pub struct AvatarEngine {
    config: EngineConfig,

    /// Engine clock in seconds, accumulated from tick deltas.
    clock: f64,

    fsm: BehaviorFsm,
    pose: PoseSynthesizer,
    envelope: EnvelopeExtractor,
    blender: MorphBlender,

    roles: BoneRoleMap,
    binding: MorphBinding,

    signal_tx: Sender<Behavior>,
    signal_rx: Receiver<Behavior>,

    /// Host-facing "expressive" flag, true during Talk/Wave. Deliberately
    /// decoupled from pose/morph success.
    expressive: Arc<AtomicBool>,

    #[cfg(feature = "clips")]
    clip_runtime: Option<RuntimeHandle>,
    #[cfg(feature = "clips")]
    clip_fetcher: Option<Arc<dyn ClipFetcher>>,
    #[cfg(feature = "clips")]
    clip_generation: Generation,
    #[cfg(feature = "clips")]
    clip_task: Option<ClipTask>,
    #[cfg(feature = "clips")]
    clips: Option<ClipLibrary>,
}

impl AvatarEngine {
    /// Create a new engine builder.
    pub fn builder() -> crate::AvatarEngineBuilder {
        crate::AvatarEngineBuilder::default()
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        #[cfg(feature = "clips")] clip_runtime: Option<RuntimeHandle>,
        #[cfg(feature = "clips")] clip_fetcher: Option<Arc<dyn ClipFetcher>>,
    ) -> Self {
        let (signal_tx, signal_rx) = unbounded();
        let fsm = BehaviorFsm::new(config.wave_duration, config.wave_policy);
        let envelope = EnvelopeExtractor::new(config.spectrum_bins, config.normalization_divisor);

        Self {
            config,
            clock: 0.0,
            fsm,
            pose: PoseSynthesizer::new(),
            envelope,
            blender: MorphBlender::new(),
            roles: BoneRoleMap::default(),
            binding: MorphBinding::default(),
            signal_tx,
            signal_rx,
            expressive: Arc::new(AtomicBool::new(false)),
            #[cfg(feature = "clips")]
            clip_runtime,
            #[cfg(feature = "clips")]
            clip_fetcher,
            #[cfg(feature = "clips")]
            clip_generation: Generation::new(),
            #[cfg(feature = "clips")]
            clip_task: None,
            #[cfg(feature = "clips")]
            clips: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve bone roles and morph keys for a newly loaded model.
    ///
    /// Call once per skeleton load; the resulting handle tables are reused
    /// every tick with no per-frame string matching. Rebinding invalidates
    /// in-flight clip loads so late completions cannot land on the new
    /// model.
    pub fn bind_rig(&mut self, rig: &dyn Rig) {
        self.roles = resolve_roles(rig);
        self.binding = MorphBinding::resolve(rig);
        debug!(
            roles = self.roles.resolved_count(),
            morphs_bound = !self.binding.is_empty(),
            "rig bound"
        );

        #[cfg(feature = "clips")]
        {
            self.clip_generation.bump();
            self.clip_task = None;
            self.clips = None;
        }
    }

    /// Deliver a behavior signal directly.
    pub fn signal(&self, behavior: Behavior) {
        let _ = self.signal_tx.send(behavior);
    }

    /// Deliver a raw external signal value; unrecognized strings coerce to
    /// `Idle` rather than erroring.
    pub fn signal_str(&self, signal: &str) {
        self.signal(Behavior::parse(signal));
    }

    /// Clone-able sender for host callbacks that outlive a borrow of the
    /// engine.
    pub fn signals(&self) -> SignalSender {
        SignalSender {
            tx: self.signal_tx.clone(),
        }
    }

    pub fn behavior(&self) -> Behavior {
        self.fsm.behavior()
    }

    pub fn anim_state(&self) -> AnimState {
        self.fsm.state(self.clock)
    }

    /// True while the avatar is in an expressive behavior (Talk/Wave).
    pub fn expressive(&self) -> bool {
        self.expressive.load(Ordering::Relaxed)
    }

    /// Shared flag the host UI can observe without borrowing the engine.
    pub fn expressive_flag(&self) -> Arc<AtomicBool> {
        self.expressive.clone()
    }

    /// Advance the engine by `dt` seconds and write this frame's pose and
    /// morph outputs into the host rig.
    ///
    /// Total: every failure mode inside (missing roles, missing morph keys,
    /// audio read errors, clip-load failures) degrades locally and this
    /// method always returns.
    pub fn tick(&mut self, dt: f32, rig: &mut dyn Rig, audio: Option<&dyn AudioFeed>) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        // Queued signals apply before this frame's state is read.
        while let Ok(behavior) = self.signal_rx.try_recv() {
            self.fsm.signal(behavior, self.clock);
        }

        self.clock += dt as f64;
        self.fsm.tick(self.clock);
        let state = self.fsm.state(self.clock);

        let playing = audio.map(|feed| feed.is_playing()).unwrap_or(false);
        let envelope = self.envelope.sample(audio);

        let report = self.pose.tick(&state, dt, rig, &self.roles);
        if report.hold_settled {
            self.fsm.pose_settled(self.clock);
        }

        self.blender
            .tick(&state, envelope, playing, dt, rig, &self.binding);

        self.expressive
            .store(self.fsm.behavior().is_expressive(), Ordering::Relaxed);

        #[cfg(feature = "clips")]
        self.poll_clips();
    }

    /// Current loudness envelope in [0, 1].
    pub fn envelope(&self) -> f32 {
        self.envelope.last()
    }

    /// Current morph channel weights.
    pub fn mouth_open(&self) -> f32 {
        self.blender.mouth_open()
    }

    pub fn smile(&self) -> f32 {
        self.blender.smile()
    }

    /// Kick off a best-effort background load of the named clip set.
    ///
    /// Fails only when no runtime or fetcher was configured at build time;
    /// individual clip failures degrade to empty sets and never surface
    /// here. Completion is polled from `tick`.
    #[cfg(feature = "clips")]
    pub fn load_clips(&mut self, sources: ClipSources) -> crate::Result<()> {
        let (Some(runtime), Some(fetcher)) = (&self.clip_runtime, &self.clip_fetcher) else {
            return Err(crate::Error::ClipsNotConfigured);
        };

        debug!(?sources, "starting background clip load");
        self.clip_task = Some(ClipTask::spawn(
            runtime,
            fetcher.clone(),
            sources.clone(),
            self.clip_generation.clone(),
        ));
        Ok(())
    }

    /// The settled clip library, if a load has completed for the currently
    /// bound model. Empty-but-loaded is a valid state; the procedural path
    /// never waits on this.
    #[cfg(feature = "clips")]
    pub fn clips(&self) -> Option<&ClipLibrary> {
        self.clips.as_ref()
    }

    #[cfg(feature = "clips")]
    fn poll_clips(&mut self) {
        if let Some(task) = &self.clip_task {
            if let Some(library) = task.poll() {
                self.clips = Some(library);
                self.clip_task = None;
            }
        }
    }
}
