//! Per-sample bass and lead voice generation.
//!
//! The bass blends a sawtooth with an octave-down sine and shapes it with a
//! per-bar pluck envelope. The lead is a five-oscillator detuned sawtooth
//! unison under a repeating two-beat ADSR, with a trace of noise for analog
//! feel. Both produce instantaneous signal values from a timeline frequency;
//! a silent voice contributes exactly 0.0 by never being sampled.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sequence::BEATS_PER_BAR;

/// Overall bass contribution to the dry mix.
const BASS_LEVEL: f64 = 0.25;
/// Overall lead contribution to the dry mix.
const LEAD_LEVEL: f64 = 0.3;
/// Cent offsets of the lead unison oscillators.
const DETUNE_CENTS: [f64; 5] = [-7.0, -3.0, 0.0, 3.0, 7.0];
/// Gain of each unison oscillator.
const UNISON_GAIN: f64 = 0.15;
/// Post-sum unison trim before the noise floor is added.
const UNISON_TRIM: f64 = 0.6;
/// Peak amplitude of the lead's analog-feel noise term.
const LEAD_NOISE: f64 = 0.002;
/// Lead sustain level; also the floor of the decay stage.
const LEAD_SUSTAIN: f64 = 0.7;

/// Sample-domain timing for one track render: bar and lead-cycle lengths
/// derived from tempo, guarded to at least one sample so the envelope
/// arithmetic never divides by zero.
#[derive(Debug, Clone, Copy)]
pub struct VoiceClock {
    sample_rate: f64,
    bar_len: usize,
    cycle_len: usize,
}

impl VoiceClock {
    /// Creates a clock for the given tempo and sample rate.
    pub fn new(tempo_bpm: f64, sample_rate: u32) -> Self {
        let seconds_per_beat = 60.0 / tempo_bpm;
        let sr = sample_rate as f64;
        Self {
            sample_rate: sr,
            bar_len: ((BEATS_PER_BAR * seconds_per_beat * sr) as usize).max(1),
            cycle_len: ((2.0 * seconds_per_beat * sr) as usize).max(1),
        }
    }

    /// Bass signal at `index` for an active frequency: blended saw + sub
    /// sine under a bar-relative pluck envelope (0.1 s attack, decay toward
    /// a 0.3 floor across the bar).
    pub fn bass_sample(&self, index: usize, freq: f64) -> f64 {
        let sr = self.sample_rate;
        let t = (index as f64 / sr) * freq;
        let saw = 2.0 * (t.fract() - 0.5);
        let sub = (TAU * freq * 0.5 * t / sr).sin();

        let bar_pos = (index % self.bar_len) as f64;
        let attack = (bar_pos / (sr * 0.1)).min(1.0);
        let decay = (1.0 - bar_pos / self.bar_len as f64).max(0.3);

        BASS_LEVEL * (saw * 0.7 + sub * 0.3) * attack * decay
    }

    /// Lead signal at `index` for an active frequency: detuned sawtooth
    /// unison under the repeating two-beat ADSR, plus the noise floor.
    pub fn lead_sample(&self, index: usize, freq: f64, rng: &mut Pcg32) -> f64 {
        let sr = self.sample_rate;

        let mut unison = 0.0;
        for cents in DETUNE_CENTS {
            let detuned = freq * 2.0_f64.powf(cents / 1200.0);
            let t = (index as f64 / sr) * detuned;
            unison += 2.0 * (t.fract() - 0.5) * UNISON_GAIN;
        }

        let env = self.lead_envelope(index);
        (unison * UNISON_TRIM + rng.gen::<f64>() * LEAD_NOISE) * env * LEAD_LEVEL
    }

    /// Four-stage envelope from the position within the two-beat cycle:
    /// 0.05 s attack, decay to the 0.7 sustain over the next 0.1 s, hold,
    /// then a linear release over the cycle's final 0.5 s.
    fn lead_envelope(&self, index: usize) -> f64 {
        let sr = self.sample_rate;
        let pos = (index % self.cycle_len) as f64;

        let attack_end = sr * 0.05;
        let attack = (pos / attack_end).min(1.0);
        let decay = if pos > attack_end {
            (1.0 - (pos - attack_end) / (sr * 0.1)).max(LEAD_SUSTAIN)
        } else {
            1.0
        };

        let release_len = sr * 0.5;
        let release_start = (self.cycle_len as f64 - release_len).max(attack_end);
        let release = if pos > release_start {
            (1.0 - (pos - release_start) / release_len).max(0.0)
        } else {
            1.0
        };

        attack * decay * LEAD_SUSTAIN * release
    }
}
