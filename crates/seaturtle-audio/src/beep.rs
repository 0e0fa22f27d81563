//! Single-oscillator sound-effect generator.
//!
//! Short discrete cues (eat, hurt, dash, powerup) come from one oscillator
//! under a linear attack/release envelope. No effects chain is applied.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Waveform shape for a beep cue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeepShape {
    /// Plain sawtooth.
    Saw,
    /// Pure sine.
    Sine,
    /// Hard square (sign of a sine).
    #[default]
    Square,
    /// Three-partial composite: fundamental x0.5 + 1.5x partial x0.3 +
    /// 2x partial x0.2.
    Powerup,
}

/// Parameters for one beep cue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BeepParams {
    /// Oscillator frequency in Hz.
    pub frequency: f64,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Waveform shape.
    pub shape: BeepShape,
    /// Output volume scalar.
    pub volume: f64,
}

/// Renders a beep to a mono sample buffer in [-1, 1].
///
/// Envelope: linear attack over the first 10% of samples, linear release
/// over the final 30%, full sustain between.
pub fn render(params: &BeepParams, sample_rate: u32) -> Vec<f64> {
    let sr = sample_rate as f64;
    let num_samples = ((sr * params.duration_ms as f64 / 1000.0) as usize).max(1);

    let attack_len = num_samples as f64 * 0.1;
    let release_start = num_samples as f64 * 0.7;
    let release_len = num_samples as f64 * 0.3;

    let mut samples = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let t = i as f64 / sr;
        let f = params.frequency;
        let value = match params.shape {
            BeepShape::Saw => 2.0 * ((f * t).fract() - 0.5),
            BeepShape::Sine => (TAU * f * t).sin(),
            BeepShape::Square => {
                if (TAU * f * t).sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            BeepShape::Powerup => {
                (TAU * f * t).sin() * 0.5
                    + (TAU * f * 1.5 * t).sin() * 0.3
                    + (TAU * f * 2.0 * t).sin() * 0.2
            }
        };

        let pos = i as f64;
        let attack = (pos / attack_len).min(1.0);
        let release = if pos > release_start {
            (1.0 - (pos - release_start) / release_len).max(0.0)
        } else {
            1.0
        };

        samples.push((value * params.volume * attack * release).clamp(-1.0, 1.0));
    }

    samples
}
