//! Full background-track rendering pipeline.
//!
//! One parameterized pass covers mono and stereo output: sequence the
//! melody and bass timelines, synthesize the dry signal sample by sample,
//! run it through the shared delay line, and limit. The caller picks the
//! channel count; stereo is the reference variant, mono the degraded
//! special case that uses the two long symmetric reverb taps instead of
//! the per-channel echoes.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{limit, TrackReverb};
use crate::error::{AudioError, AudioResult};
use crate::sequence::{self, Phrase, Timeline, BEATS_PER_BAR};
use crate::voice::VoiceClock;
use crate::wav::WavWriter;

/// Sample rate used for every generated asset.
pub const SAMPLE_RATE: u32 = 44100;

/// Parameters for one background track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackParams {
    /// Tempo in beats per minute.
    pub tempo_bpm: f64,
    /// Track length in 8-beat bars.
    pub bars: u32,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Stereo (true) or mono rendering.
    pub stereo: bool,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            tempo_bpm: 100.0,
            bars: 16,
            sample_rate: SAMPLE_RATE,
            stereo: true,
        }
    }
}

/// A rendered sample buffer, mono or stereo.
#[derive(Debug, Clone)]
pub enum RenderedAudio {
    /// Single channel.
    Mono(Vec<f64>),
    /// Left/right channel pair of equal length.
    Stereo {
        /// Left channel.
        left: Vec<f64>,
        /// Right channel.
        right: Vec<f64>,
    },
}

impl RenderedAudio {
    /// Number of sample frames.
    pub fn frames(&self) -> usize {
        match self {
            RenderedAudio::Mono(samples) => samples.len(),
            RenderedAudio::Stereo { left, .. } => left.len(),
        }
    }

    /// Serializes to complete WAV bytes at the given sample rate.
    pub fn to_wav(&self, sample_rate: u32) -> Vec<u8> {
        match self {
            RenderedAudio::Mono(samples) => WavWriter::mono(sample_rate).write_mono(samples),
            RenderedAudio::Stereo { left, right } => {
                WavWriter::stereo(sample_rate).write_stereo(left, right)
            }
        }
    }

    /// BLAKE3 hash of the packed PCM payload.
    pub fn pcm_hash(&self, sample_rate: u32) -> String {
        match self {
            RenderedAudio::Mono(samples) => WavWriter::mono(sample_rate).pcm_hash_mono(samples),
            RenderedAudio::Stereo { left, right } => {
                WavWriter::stereo(sample_rate).pcm_hash_stereo(left, right)
            }
        }
    }
}

/// The deep-synth melody phrase every track is built from. Loops until it
/// covers the requested bar count.
pub fn default_melody() -> Phrase {
    Phrase::from_pairs(&[
        ("A3", 2.0),
        ("C4", 2.0),
        ("E4", 2.0),
        ("D4", 2.0),
        ("F3", 2.0),
        ("A3", 2.0),
        ("C4", 2.0),
        ("E4", 2.0),
        ("G3", 2.0),
        ("B3", 2.0),
        ("D4", 2.0),
        ("C4", 2.0),
        ("F3", 2.0),
        ("A3", 2.0),
        ("G3", 2.0),
        ("E3", 2.0),
        ("A4", 1.0),
        ("G4", 1.0),
        ("F4", 2.0),
        ("E4", 2.0),
        ("D4", 2.0),
        ("C4", 2.0),
        ("E4", 2.0),
        ("A3", 2.0),
        ("C4", 2.0),
        ("D4", 1.0),
        ("E4", 1.0),
        ("F4", 2.0),
        ("G4", 2.0),
        ("A4", 2.0),
        ("E4", 4.0),
        ("A3", 4.0),
    ])
}

fn validate(params: &TrackParams) -> AudioResult<()> {
    if !(params.tempo_bpm > 0.0) {
        return Err(AudioError::invalid_param(
            "tempo_bpm",
            format!("must be positive, got {}", params.tempo_bpm),
        ));
    }
    if params.bars == 0 {
        return Err(AudioError::invalid_param("bars", "must be at least 1"));
    }
    if params.sample_rate == 0 {
        return Err(AudioError::invalid_param("sample_rate", "must be positive"));
    }
    Ok(())
}

/// Renders a track with the built-in melody.
pub fn render_track(params: &TrackParams, rng: &mut Pcg32) -> AudioResult<RenderedAudio> {
    render_track_with(params, &default_melody(), rng)
}

/// Renders a track from an explicit melody phrase.
pub fn render_track_with(
    params: &TrackParams,
    melody: &Phrase,
    rng: &mut Pcg32,
) -> AudioResult<RenderedAudio> {
    validate(params)?;

    let num_samples = sequence::timeline_len(params.tempo_bpm, params.bars, params.sample_rate);
    let required_beats = params.bars as f64 * BEATS_PER_BAR;

    let looped = melody.repeated_to(required_beats);
    let mut melody_timeline: Timeline = vec![None; num_samples];
    sequence::place_phrase(
        &looped,
        0.0,
        params.tempo_bpm,
        params.sample_rate,
        &mut melody_timeline,
    )?;

    let bass = sequence::bass_phrase(params.bars);
    let mut bass_timeline: Timeline = vec![None; num_samples];
    sequence::place_phrase(
        &bass,
        0.0,
        params.tempo_bpm,
        params.sample_rate,
        &mut bass_timeline,
    )?;

    let clock = VoiceClock::new(params.tempo_bpm, params.sample_rate);
    // Fresh delay buffer per render pass; never shared across tracks.
    let mut reverb = TrackReverb::new();

    let rendered = if params.stereo {
        let mut left = Vec::with_capacity(num_samples);
        let mut right = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let dry = dry_sample(&clock, i, bass_timeline[i], melody_timeline[i], rng);
            let (l, r) = reverb.process_stereo(dry);
            left.push(limit(l));
            right.push(limit(r));
        }
        RenderedAudio::Stereo { left, right }
    } else {
        let mut samples = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let dry = dry_sample(&clock, i, bass_timeline[i], melody_timeline[i], rng);
            samples.push(limit(reverb.process_mono(dry)));
        }
        RenderedAudio::Mono(samples)
    };

    debug!(
        tempo_bpm = params.tempo_bpm,
        bars = params.bars,
        frames = rendered.frames(),
        stereo = params.stereo,
        "rendered track"
    );

    Ok(rendered)
}

fn dry_sample(
    clock: &VoiceClock,
    index: usize,
    bass_freq: Option<f64>,
    melody_freq: Option<f64>,
    rng: &mut Pcg32,
) -> f64 {
    let mut dry = 0.0;
    if let Some(freq) = bass_freq {
        dry += clock.bass_sample(index, freq);
    }
    if let Some(freq) = melody_freq {
        dry += clock.lead_sample(index, freq, rng);
    }
    dry
}
