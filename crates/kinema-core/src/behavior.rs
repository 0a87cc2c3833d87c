//! Behavior state machine.

use crate::config::WavePolicy;

/// Discrete behavior driving the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    #[default]
    Idle,
    Talk,
    Wave,
    Nod,
}

impl Behavior {
    /// Parse an external signal value. Case-insensitive; anything
    /// unrecognized coerces to `Idle` rather than erroring, since a bad
    /// signal must never freeze the character.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "talk" => Behavior::Talk,
            "wave" => Behavior::Wave,
            "nod" => Behavior::Nod,
            _ => Behavior::Idle,
        }
    }

    /// True while the avatar should read as emotionally engaged.
    /// Mirrored into the host-facing expressive flag.
    #[inline]
    pub fn is_expressive(&self) -> bool {
        matches!(self, Behavior::Talk | Behavior::Wave)
    }
}

/// Sub-phase of the `Wave` behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePhase {
    /// Oscillating the forearm.
    #[default]
    Waving,
    /// Wave duration elapsed under `SymmetricalHold`; smoothing toward the
    /// mirror-of-resting pose until the synthesizer reports it settled.
    Holding,
}

/// Result of a state machine step, in the style of an explicit transition
/// report so callers can react without re-deriving state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Entered(Behavior),
    WaveRestarted,
    HoldStarted,
    Reverted,
}

/// Read-only snapshot consumed by the pose synthesizer and morph blender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimState {
    pub behavior: Behavior,
    /// Seconds since the current behavior was entered.
    pub seconds_in_state: f32,
    pub wave_phase: WavePhase,
}

/// Converts external behavior signals into a timed internal state.
///
/// `Wave` is self-terminating: the timeout is derived from `entered_at` and
/// the current state on every tick, so there is no timer object to cancel —
/// preemption by a new signal inherently discards the pending reversion.
#[derive(Debug, Clone)]
pub struct BehaviorFsm {
    behavior: Behavior,
    entered_at: f64,
    wave_phase: WavePhase,
    wave_duration: f32,
    policy: WavePolicy,
}

impl BehaviorFsm {
    pub fn new(wave_duration: f32, policy: WavePolicy) -> Self {
        Self {
            behavior: Behavior::Idle,
            entered_at: 0.0,
            wave_phase: WavePhase::Waving,
            wave_duration,
            policy,
        }
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    #[inline]
    pub fn wave_phase(&self) -> WavePhase {
        self.wave_phase
    }

    /// Snapshot for the synthesizer/blender at engine-clock time `now`.
    pub fn state(&self, now: f64) -> AnimState {
        AnimState {
            behavior: self.behavior,
            seconds_in_state: (now - self.entered_at).max(0.0) as f32,
            wave_phase: self.wave_phase,
        }
    }

    /// Apply an external signal at engine-clock time `now`.
    ///
    /// A repeated `Wave` restarts its timer; other repeated signals are
    /// idempotent. Any signal arriving during `Wave` preempts the pending
    /// auto-reversion.
    pub fn signal(&mut self, signal: Behavior, now: f64) -> Transition {
        if signal == self.behavior {
            if signal == Behavior::Wave {
                self.entered_at = now;
                self.wave_phase = WavePhase::Waving;
                return Transition::WaveRestarted;
            }
            return Transition::None;
        }

        self.behavior = signal;
        self.entered_at = now;
        self.wave_phase = WavePhase::Waving;
        Transition::Entered(signal)
    }

    /// Autonomous transition check, evaluated once per frame tick.
    pub fn tick(&mut self, now: f64) -> Transition {
        if self.behavior != Behavior::Wave || self.wave_phase != WavePhase::Waving {
            return Transition::None;
        }
        if (now - self.entered_at) < self.wave_duration as f64 {
            return Transition::None;
        }

        match self.policy {
            WavePolicy::DirectRevert => {
                self.behavior = Behavior::Idle;
                self.entered_at = now;
                Transition::Reverted
            }
            WavePolicy::SymmetricalHold => {
                self.wave_phase = WavePhase::Holding;
                Transition::HoldStarted
            }
        }
    }

    /// Called by the pose synthesizer when the holding pose is within
    /// tolerance. Completes the `Wave` → `Idle` transition under
    /// `SymmetricalHold`; a no-op in any other state.
    pub fn pose_settled(&mut self, now: f64) -> Transition {
        if self.behavior == Behavior::Wave && self.wave_phase == WavePhase::Holding {
            self.behavior = Behavior::Idle;
            self.entered_at = now;
            self.wave_phase = WavePhase::Waving;
            return Transition::Reverted;
        }
        Transition::None
    }
}
