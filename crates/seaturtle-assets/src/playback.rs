//! rodio-backed playback: a fixed pool of effect channels plus looped
//! sinks for music and ambience.
//!
//! Playback is strictly cosmetic. Every failure path here logs and drops;
//! nothing in this module returns an error to the game loop.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

/// Number of simultaneous effect channels.
const EFFECT_CHANNELS: usize = 8;
/// Most volume steps a fade thread will take.
const FADE_STEPS: u32 = 20;

/// Shared view over a cached effect buffer, so the decoder reads the
/// cached bytes in place instead of copying them per play.
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An open audio output with its effect channel pool.
pub(crate) struct Playback {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    effect_slots: Vec<Sink>,
}

impl Playback {
    /// Opens the default output device. Returns `None` (and logs) when no
    /// device is available; the library then runs silent.
    pub(crate) fn open() -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%err, "no audio output device; playback disabled");
                return None;
            }
        };

        let effect_slots = (0..EFFECT_CHANNELS)
            .filter_map(|_| Sink::try_new(&handle).ok())
            .collect();

        Some(Self {
            _stream: stream,
            handle,
            effect_slots,
        })
    }

    /// Plays an in-memory WAV buffer on the first idle effect channel.
    /// Dropped silently when every channel is busy.
    pub(crate) fn play_effect_buffer(&self, name: &str, bytes: &Arc<Vec<u8>>) {
        let Some(slot) = self.effect_slots.iter().find(|sink| sink.empty()) else {
            debug!(name, "all effect channels busy; cue dropped");
            return;
        };

        match Decoder::new(Cursor::new(SharedBytes(Arc::clone(bytes)))) {
            Ok(source) => slot.append(source),
            Err(err) => warn!(name, %err, "effect buffer failed to decode"),
        }
    }

    /// Starts streaming a file on a fresh sink, optionally looped, fading
    /// in over `fade_ms`. Returns the sink so the caller can fade it out
    /// later; `None` when the file cannot be opened or decoded.
    pub(crate) fn start_stream(
        &self,
        path: &std::path::Path,
        looped: bool,
        fade_ms: u64,
        volume: f32,
    ) -> Option<Sink> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) => {
                warn!(path = %path.display(), %err, "track file missing; playback skipped");
                return None;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(err) => {
                warn!(path = %path.display(), %err, "track failed to decode");
                return None;
            }
        };

        let sink = Sink::try_new(&self.handle).ok()?;
        sink.set_volume(volume);

        let fade = Duration::from_millis(fade_ms);
        if looped {
            sink.append(source.repeat_infinite().fade_in(fade));
        } else {
            sink.append(source.fade_in(fade));
        }

        Some(sink)
    }
}

/// Ramps a sink's volume to zero over `fade_ms`, then drops it (which
/// stops playback). Runs on a helper thread so the caller never blocks.
pub(crate) fn fade_out_and_drop(sink: Sink, fade_ms: u64) {
    if fade_ms == 0 {
        drop(sink);
        return;
    }

    std::thread::spawn(move || {
        let start = sink.volume();
        let (steps, step) = fade_schedule(fade_ms);
        for k in 1..=steps {
            sink.set_volume(start * (1.0 - k as f32 / steps as f32));
            std::thread::sleep(step);
        }
        drop(sink);
    });
}

/// Step count and per-step sleep for a fade. Short fades take fewer,
/// longer steps so the per-step duration never truncates to zero.
fn fade_schedule(fade_ms: u64) -> (u32, Duration) {
    let steps = fade_ms.min(FADE_STEPS as u64).max(1) as u32;
    (steps, Duration::from_millis(fade_ms / steps as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Read, Seek, SeekFrom};

    #[test]
    fn test_shared_bytes_reads_in_place() {
        let data = Arc::new(vec![1u8, 2, 3, 4]);
        let mut cursor = Cursor::new(SharedBytes(Arc::clone(&data)));

        let mut out = Vec::new();
        cursor.read_to_end(&mut out).unwrap();
        assert_eq!(out, *data);

        cursor.seek(SeekFrom::Start(2)).unwrap();
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![3, 4]);

        // The buffer stays shared; nothing was copied out of the Arc.
        assert_eq!(Arc::strong_count(&data), 2);
    }

    #[test]
    fn test_fade_schedule_steps_never_truncate_to_zero() {
        // Fades shorter than the step budget take one 1 ms step per
        // millisecond instead of twenty 0 ms steps.
        let (steps, step) = fade_schedule(5);
        assert_eq!(steps, 5);
        assert_eq!(step, Duration::from_millis(1));

        let (steps, step) = fade_schedule(200);
        assert_eq!(steps, FADE_STEPS);
        assert_eq!(step, Duration::from_millis(10));

        let (steps, _) = fade_schedule(1);
        assert_eq!(steps, 1);
    }
}
