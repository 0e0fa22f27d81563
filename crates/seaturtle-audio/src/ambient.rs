//! Ambient loop generators: shoreline waves, gulls, and machinery hum.
//!
//! Built from the same primitives as the rest of the core (seeded noise and
//! sine partials). Each loop gets a short edge fade at both ends so looped
//! playback has no click at the seam.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Edge fade applied at both ends of every loop, in seconds.
const EDGE_FADE_SECONDS: f64 = 0.05;

/// Which ambient bed to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientKind {
    /// Noise swells, like surf heard from the shallows.
    Waves,
    /// Sparse descending chirps over a faint noise bed.
    Gulls,
    /// Low two-tone machinery drone for the rig zone.
    Hum,
}

/// Parameters for one ambient loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmbientParams {
    /// Bed flavor.
    pub kind: AmbientKind,
    /// Loop length in seconds.
    pub duration_seconds: f64,
    /// Output volume scalar.
    pub volume: f64,
}

/// Renders an ambient loop to a mono sample buffer in [-1, 1].
pub fn render(params: &AmbientParams, sample_rate: u32, rng: &mut Pcg32) -> Vec<f64> {
    let sr = sample_rate as f64;
    let num_samples = ((params.duration_seconds * sr).round() as usize).max(1);

    let mut samples = match params.kind {
        AmbientKind::Waves => render_waves(num_samples, sr, rng),
        AmbientKind::Gulls => render_gulls(num_samples, sr, rng),
        AmbientKind::Hum => render_hum(num_samples, sr),
    };

    let fade_len = ((EDGE_FADE_SECONDS * sr) as usize).min(num_samples / 2).max(1);
    for i in 0..fade_len {
        let gain = i as f64 / fade_len as f64;
        samples[i] *= gain;
        let tail = num_samples - 1 - i;
        samples[tail] *= gain;
    }

    for sample in &mut samples {
        *sample = (*sample * params.volume).clamp(-1.0, 1.0);
    }

    samples
}

/// White noise amplitude-modulated by a slow swell.
fn render_waves(num_samples: usize, sr: f64, rng: &mut Pcg32) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sr;
            let noise = rng.gen::<f64>() * 2.0 - 1.0;
            let swell = 0.55 + 0.45 * (TAU * 0.08 * t).sin();
            noise * swell
        })
        .collect()
}

/// Quiet noise bed with occasional two-tone descending chirps.
fn render_gulls(num_samples: usize, sr: f64, rng: &mut Pcg32) -> Vec<f64> {
    const CHIRP_SECONDS: f64 = 0.35;

    // Schedule chirps ahead of time: one every 1.5-3.5 s, each with its own
    // base pitch.
    let duration = num_samples as f64 / sr;
    let mut chirps: Vec<(f64, f64)> = Vec::new();
    let mut at = 0.8 + rng.gen::<f64>();
    while at + CHIRP_SECONDS < duration {
        let base = 900.0 + rng.gen::<f64>() * 500.0;
        chirps.push((at, base));
        at += 1.5 + rng.gen::<f64>() * 2.0;
    }

    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sr;
            let mut out = (rng.gen::<f64>() * 2.0 - 1.0) * 0.05;

            for &(start, base) in &chirps {
                if t >= start && t < start + CHIRP_SECONDS {
                    let local = (t - start) / CHIRP_SECONDS;
                    // Falling pitch with a fast warble, fading over the cry.
                    let freq = base * (1.0 - 0.3 * local);
                    let warble = 1.0 + 0.02 * (TAU * 22.0 * t).sin();
                    let env = (1.0 - local) * (local * 12.0).min(1.0);
                    out += (TAU * freq * warble * t).sin() * 0.4 * env;
                }
            }

            out
        })
        .collect()
}

/// Two detuned low sines whose beat gives a slow throb.
fn render_hum(num_samples: usize, sr: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sr;
            (TAU * 50.0 * t).sin() * 0.6 + (TAU * 57.0 * t).sin() * 0.4
        })
        .collect()
}
