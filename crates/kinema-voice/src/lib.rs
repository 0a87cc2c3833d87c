//! Loudness-driven facial deformation.
//!
//! [`EnvelopeExtractor`] reduces a live frequency-magnitude spectrum to a
//! scalar loudness envelope; [`MorphBlender`] maps the envelope and the
//! current behavior onto the mesh's morph-influence slots. Neither side
//! owns audio playback or rendering state; both poll narrow host-owned
//! interfaces and never error on the per-tick path.

mod envelope;
mod morph;

pub use envelope::{AudioFeed, EnvelopeExtractor, NORMALIZATION_DIVISOR};
pub use morph::{MorphBinding, MorphBlender};
