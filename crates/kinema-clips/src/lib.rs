//! Optional motion-clip loading for the Kinema avatar engine.
//!
//! Clip playback is a best-effort secondary path: the procedural pose
//! synthesizer never depends on anything here succeeding. Each of the three
//! named requests (idle/talk/wave) fails independently; a failed request
//! degrades to an empty clip set, and the wave slot falls back to reusing
//! the talk clips. The loader always settles and always reports loaded.

mod clip;
mod error;
mod fetcher;
mod loader;
mod task;

pub use clip::{MotionClip, RotationTrack};
pub use error::{ClipError, Result};
pub use fetcher::{ClipFetcher, FileClipFetcher};
pub use loader::{load_clip_set, ClipLibrary, ClipSources};
pub use task::{ClipTask, Generation};

/// Re-exported so the umbrella crate can accept a runtime handle without a
/// direct tokio dependency.
pub use tokio::runtime::Handle as RuntimeHandle;
