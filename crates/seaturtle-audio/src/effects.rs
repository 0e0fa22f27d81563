//! Delay-line reverb, stereo echo taps, and the output limiter.
//!
//! One fixed-capacity circular buffer serves both paths: every dry sample
//! is written once (attenuated, no feedback) and read back at fixed lags.
//! The mono path sums two long taps into the dry signal as a cheap reverb;
//! the stereo path reads two shorter taps as left/right echoes for width.
//! The buffer is scoped to a single render pass and never shared.

/// Delay buffer capacity in samples.
const DELAY_CAPACITY: usize = 8000;
/// Attenuation applied to each sample entering the delay line.
const DELAY_SEND: f64 = 0.3;
/// Mono reverb taps: (lag in samples, gain).
const MONO_TAPS: [(usize, f64); 2] = [(3500, 0.4), (7000, 0.2)];
/// Stereo echo taps: left and right lags.
const STEREO_TAPS: [usize; 2] = [2500, 4500];
/// Stereo echo gain per channel.
const STEREO_WET: f64 = 0.15;
/// Dry gain per stereo channel.
const STEREO_DRY: f64 = 0.85;
/// Magnitude above which the limiter switches to tanh saturation.
const LIMIT_THRESHOLD: f64 = 0.7;

/// A circular buffer read back at fixed integer lags.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f64>,
    write_pos: usize,
}

impl DelayLine {
    /// Creates a delay line with the given capacity in samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    /// Writes a sample and advances the write position.
    pub fn write(&mut self, sample: f64) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Reads the sample written `lag` writes ago (with wraparound).
    pub fn read(&self, lag: usize) -> f64 {
        let pos = (self.write_pos + self.buffer.len() - lag % self.buffer.len()) % self.buffer.len();
        self.buffer[pos]
    }
}

/// Per-track effect state: the shared delay buffer behind both the mono
/// reverb and the stereo echo taps.
#[derive(Debug, Clone)]
pub struct TrackReverb {
    line: DelayLine,
}

impl TrackReverb {
    /// Creates a fresh reverb for one render pass.
    pub fn new() -> Self {
        Self {
            line: DelayLine::new(DELAY_CAPACITY),
        }
    }

    /// Feeds one dry sample and returns the mono reverb mix (dry plus the
    /// two long taps). Taps are read before the write, so a tap at lag N
    /// returns the sample from exactly N calls ago.
    pub fn process_mono(&mut self, dry: f64) -> f64 {
        let mut out = dry;
        for (lag, gain) in MONO_TAPS {
            out += self.line.read(lag) * gain;
        }
        self.line.write(dry * DELAY_SEND);
        out
    }

    /// Feeds one dry sample and returns the (left, right) stereo pair:
    /// each channel mixes the dry signal with its own short echo tap.
    pub fn process_stereo(&mut self, dry: f64) -> (f64, f64) {
        let left = dry * STEREO_DRY + self.line.read(STEREO_TAPS[0]) * STEREO_WET;
        let right = dry * STEREO_DRY + self.line.read(STEREO_TAPS[1]) * STEREO_WET;
        self.line.write(dry * DELAY_SEND);
        (left, right)
    }
}

impl Default for TrackReverb {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-tier output limiter: tanh saturation above the threshold, hard
/// clamp to [-1, 1] otherwise. Out-of-range peaks are a normal signal
/// condition here, not an error.
#[inline]
pub fn limit(sample: f64) -> f64 {
    if sample.abs() > LIMIT_THRESHOLD {
        sample.tanh()
    } else {
        sample.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_line_reads_past_writes() {
        let mut dl = DelayLine::new(8);
        for i in 0..5 {
            dl.write(i as f64);
        }
        assert_eq!(dl.read(1), 4.0);
        assert_eq!(dl.read(5), 0.0);
    }

    #[test]
    fn test_delay_line_wraparound() {
        let mut dl = DelayLine::new(4);
        for i in 0..10 {
            dl.write(i as f64);
        }
        assert_eq!(dl.read(1), 9.0);
        assert_eq!(dl.read(4), 6.0);
    }

    #[test]
    fn test_mono_reverb_echoes_at_tap_lags() {
        let mut reverb = TrackReverb::new();
        // One unit impulse, then silence.
        let first = reverb.process_mono(1.0);
        assert_eq!(first, 1.0); // taps still read zeros

        let mut tail = Vec::new();
        for _ in 0..7001 {
            tail.push(reverb.process_mono(0.0));
        }
        // Impulse returns at the tap lags, attenuated by send * tap gain.
        assert!((tail[3499] - 0.3 * 0.4).abs() < 1e-12);
        assert!((tail[6999] - 0.3 * 0.2).abs() < 1e-12);
        // No recirculation: everything else in the tail is silent.
        let energy: f64 = tail
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3499 && *i != 6999)
            .map(|(_, s)| s.abs())
            .sum();
        assert_eq!(energy, 0.0);
    }

    #[test]
    fn test_stereo_taps_differ_per_channel() {
        let mut reverb = TrackReverb::new();
        let (l0, r0) = reverb.process_stereo(1.0);
        assert_eq!(l0, STEREO_DRY);
        assert_eq!(r0, STEREO_DRY);

        let mut lefts = Vec::new();
        let mut rights = Vec::new();
        for _ in 0..4501 {
            let (l, r) = reverb.process_stereo(0.0);
            lefts.push(l);
            rights.push(r);
        }
        // Left echo arrives at the short lag, right at the long one.
        assert!((lefts[2499] - 0.3 * STEREO_WET).abs() < 1e-12);
        assert_eq!(rights[2499], 0.0);
        assert!((rights[4499] - 0.3 * STEREO_WET).abs() < 1e-12);
        assert_eq!(lefts[4499], 0.0);
    }

    #[test]
    fn test_limiter_passes_quiet_signal_unchanged() {
        for &s in &[0.0, 0.35, -0.5, 0.7, -0.7] {
            assert_eq!(limit(s), s);
        }
    }

    #[test]
    fn test_limiter_saturates_peaks() {
        assert_eq!(limit(0.9), 0.9_f64.tanh());
        assert_eq!(limit(-1.8), (-1.8_f64).tanh());
        // tanh keeps the output inside the packing range.
        assert!(limit(50.0) < 1.0);
        assert!(limit(-50.0) > -1.0);
    }
}
