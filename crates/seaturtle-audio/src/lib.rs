//! Sea Turtle Echo synthesis core.
//!
//! Everything the game hears is synthesized here from oscillators - no
//! external audio assets. Background tracks come from a melody/bass
//! sequencer feeding a per-sample voice synth and a delay-line effects
//! chain; discrete cues come from a single-oscillator beep generator;
//! ambient beds come from seeded noise. Finished buffers are packed to
//! 16-bit PCM WAV bytes.
//!
//! # Determinism
//!
//! All noise flows through PCG32 seeded per asset name (BLAKE3 derived),
//! so rendering the same asset twice yields byte-identical files. The WAV
//! writer exposes a PCM hash for checking exactly that.
//!
//! # Crate structure
//!
//! - [`pitch`] - note-name to frequency mapping (A4 = 440 Hz)
//! - [`sequence`] - phrases and per-sample frequency timelines
//! - [`voice`] - bass and detuned-unison lead voices with envelopes
//! - [`effects`] - delay-line reverb, stereo echo taps, output limiter
//! - [`track`] - the full mono/stereo track rendering pipeline
//! - [`beep`] - single-oscillator sound-effect cues
//! - [`ambient`] - looping ambient beds (waves, gulls, hum)
//! - [`wav`] - deterministic 16-bit PCM WAV serialization
//! - [`rng`] - seeded RNG with per-asset derivation

pub mod ambient;
pub mod beep;
pub mod effects;
pub mod error;
pub mod pitch;
pub mod rng;
pub mod sequence;
pub mod track;
pub mod voice;
pub mod wav;

// Re-export main types at crate root
pub use ambient::{AmbientKind, AmbientParams};
pub use beep::{BeepParams, BeepShape};
pub use error::{AudioError, AudioResult};
pub use track::{render_track, RenderedAudio, TrackParams, SAMPLE_RATE};
pub use wav::WavWriter;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::rng::create_keyed_rng;

    #[test]
    fn test_full_track_pipeline() {
        let params = TrackParams {
            tempo_bpm: 120.0,
            bars: 1,
            sample_rate: 22050,
            stereo: true,
        };
        let mut rng = create_keyed_rng(0, "music.test");
        let rendered = render_track(&params, &mut rng).expect("render should succeed");
        let wav = rendered.to_wav(params.sample_rate);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // 2 channels x 2 bytes per frame
        let expected_data = rendered.frames() * 4;
        assert_eq!(wav.len(), 44 + expected_data);
    }

    #[test]
    fn test_packed_values_never_wrap() {
        let params = TrackParams {
            tempo_bpm: 100.0,
            bars: 1,
            sample_rate: 22050,
            stereo: false,
        };
        let mut rng = create_keyed_rng(0, "music.range");
        let rendered = render_track(&params, &mut rng).unwrap();
        let wav = rendered.to_wav(params.sample_rate);

        for frame in wav[44..].chunks_exact(2) {
            let value = i16::from_le_bytes([frame[0], frame[1]]);
            assert!((-32767..=32767).contains(&value));
        }
    }

    #[test]
    fn test_beep_pipeline_to_wav() {
        let params = BeepParams {
            frequency: 523.0,
            duration_ms: 100,
            shape: BeepShape::Sine,
            volume: 0.3,
        };
        let samples = beep::render(&params, SAMPLE_RATE);
        let wav = WavWriter::mono(SAMPLE_RATE).write_mono(&samples);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    }

    #[test]
    fn test_track_hash_stable_across_renders() {
        let params = TrackParams {
            tempo_bpm: 140.0,
            bars: 1,
            sample_rate: 22050,
            stereo: true,
        };
        let mut rng1 = create_keyed_rng(0, "music.hash");
        let mut rng2 = create_keyed_rng(0, "music.hash");
        let a = render_track(&params, &mut rng1).unwrap();
        let b = render_track(&params, &mut rng2).unwrap();
        assert_eq!(
            a.pcm_hash(params.sample_rate),
            b.pcm_hash(params.sample_rate)
        );
    }

    #[test]
    fn test_different_assets_render_differently() {
        let params = TrackParams {
            tempo_bpm: 100.0,
            bars: 1,
            sample_rate: 22050,
            stereo: true,
        };
        let mut rng1 = create_keyed_rng(0, "music.beach");
        let mut rng2 = create_keyed_rng(0, "music.rig");
        let a = render_track(&params, &mut rng1).unwrap();
        let b = render_track(&params, &mut rng2).unwrap();
        // The lead noise floor differs per asset stream.
        assert_ne!(
            a.pcm_hash(params.sample_rate),
            b.pcm_hash(params.sample_rate)
        );
    }
}
