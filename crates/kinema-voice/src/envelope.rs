//! Audio envelope extraction.

/// Empirically tuned divisor mapping mean 8-bit spectrum magnitude into
/// [0, 1] so typical speech loudness lands near the top of the range.
pub const NORMALIZATION_DIVISOR: f32 = 50.0;

/// Polling view of a host-owned audio source. Deliberately narrow: the
/// frame loop only asks whether playback is live and samples the current
/// spectrum, never owning or blocking on the audio pipeline.
pub trait AudioFeed {
    fn is_playing(&self) -> bool;

    /// Fill `out` with the current frequency-magnitude spectrum.
    /// Returns false on a transient read failure.
    fn fill_spectrum(&self, out: &mut [u8]) -> bool;
}

/// Reduces the spectrum to a scalar loudness value once per tick.
#[derive(Debug, Clone)]
pub struct EnvelopeExtractor {
    bins: Vec<u8>,
    divisor: f32,
    last: f32,
}

impl EnvelopeExtractor {
    pub fn new(bins: usize, divisor: f32) -> Self {
        Self {
            bins: vec![0; bins.max(1)],
            divisor: divisor.max(f32::EPSILON),
            last: 0.0,
        }
    }

    /// Sample the envelope for this tick. Total: returns 0 when nothing is
    /// playing, the previous value on a transient read failure, and a
    /// clamped [0, 1] loudness otherwise.
    pub fn sample(&mut self, feed: Option<&dyn AudioFeed>) -> f32 {
        let Some(feed) = feed else {
            self.last = 0.0;
            return 0.0;
        };
        if !feed.is_playing() {
            self.last = 0.0;
            return 0.0;
        }
        if !feed.fill_spectrum(&mut self.bins) {
            return self.last;
        }

        // u64 keeps the sum exact for any bin count the config accepts.
        let sum: u64 = self.bins.iter().map(|&b| b as u64).sum();
        let mean = sum as f32 / self.bins.len() as f32;
        self.last = (mean / self.divisor).clamp(0.0, 1.0);
        self.last
    }

    #[inline]
    pub fn last(&self) -> f32 {
        self.last
    }
}

impl Default for EnvelopeExtractor {
    fn default() -> Self {
        Self::new(128, NORMALIZATION_DIVISOR)
    }
}
