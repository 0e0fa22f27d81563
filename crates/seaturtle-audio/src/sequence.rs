//! Note phrases and per-sample frequency timelines.
//!
//! A [`Phrase`] is an ordered list of notes with durations in beats. The
//! sequencer lays a phrase onto a [`Timeline`]: one optional frequency per
//! audio sample, `None` meaning the voice is silent at that instant. The
//! voice synth later turns each timeline entry into a signal value.

use crate::error::AudioResult;
use crate::pitch;

/// Beats per bar used throughout the track pipeline.
pub const BEATS_PER_BAR: f64 = 8.0;

/// Bass chord progression, one chord held per bar, cycling by bar index.
pub const BASS_PROGRESSION: [&str; 8] = ["A1", "F1", "G1", "A1", "F1", "C1", "D1", "E1"];

/// A single pitched note with a duration in beats.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Note symbol, e.g. "A3" or "C#4".
    pub name: String,
    /// Duration in beats.
    pub beats: f64,
}

impl Note {
    /// Creates a new note.
    pub fn new(name: impl Into<String>, beats: f64) -> Self {
        Self {
            name: name.into(),
            beats,
        }
    }
}

/// An ordered sequence of notes forming a melody or bass line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phrase {
    notes: Vec<Note>,
}

impl Phrase {
    /// Creates a phrase from a note list.
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Creates a phrase from `(symbol, beats)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            notes: pairs.iter().map(|&(n, b)| Note::new(n, b)).collect(),
        }
    }

    /// The notes in order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Total length of the phrase in beats.
    pub fn total_beats(&self) -> f64 {
        self.notes.iter().map(|n| n.beats).sum()
    }

    /// Self-concatenates the phrase until it covers `beats`, then truncates
    /// to exactly `beats`. A note straddling the cut is shortened so the
    /// result never under- or over-fills the requested length.
    pub fn repeated_to(&self, beats: f64) -> Phrase {
        let mut notes = Vec::new();
        if self.notes.is_empty() || self.total_beats() <= 0.0 || beats <= 0.0 {
            return Phrase { notes };
        }

        let mut filled = 0.0;
        'outer: loop {
            for note in &self.notes {
                let remaining = beats - filled;
                if note.beats >= remaining {
                    notes.push(Note::new(note.name.clone(), remaining));
                    break 'outer;
                }
                notes.push(note.clone());
                filled += note.beats;
            }
        }

        Phrase { notes }
    }
}

/// Per-sample optional frequency, one entry per audio sample index.
pub type Timeline = Vec<Option<f64>>;

/// Number of samples for a track of `bars` bars at `tempo_bpm`.
pub fn timeline_len(tempo_bpm: f64, bars: u32, sample_rate: u32) -> usize {
    let seconds_per_beat = 60.0 / tempo_bpm;
    (bars as f64 * BEATS_PER_BAR * seconds_per_beat * sample_rate as f64).round() as usize
}

/// Writes each note's frequency into every timeline index whose time falls
/// within the note's beat interval. Later notes overwrite earlier ones on
/// overlap. Fails fast on an unresolvable note symbol.
pub fn place_phrase(
    phrase: &Phrase,
    start_beat: f64,
    tempo_bpm: f64,
    sample_rate: u32,
    timeline: &mut Timeline,
) -> AudioResult<()> {
    let seconds_per_beat = 60.0 / tempo_bpm;
    let samples_per_beat = seconds_per_beat * sample_rate as f64;

    let mut beat = start_beat;
    for note in phrase.notes() {
        let freq = pitch::frequency(&note.name)?;
        let start = (beat * samples_per_beat).round() as usize;
        let end = ((beat + note.beats) * samples_per_beat).round() as usize;
        for slot in timeline.iter_mut().take(end).skip(start) {
            *slot = Some(freq);
        }
        beat += note.beats;
    }

    Ok(())
}

/// Builds the bass line for `bars` bars: one progression chord root held
/// for a full bar, cycling by bar index modulo the pattern length.
pub fn bass_phrase(bars: u32) -> Phrase {
    let notes = (0..bars as usize)
        .map(|bar| Note::new(BASS_PROGRESSION[bar % BASS_PROGRESSION.len()], BEATS_PER_BAR))
        .collect();
    Phrase::new(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn short_phrase() -> Phrase {
        Phrase::from_pairs(&[("A3", 2.0), ("C4", 2.0), ("E4", 4.0)])
    }

    #[test]
    fn test_total_beats() {
        assert_eq!(short_phrase().total_beats(), 8.0);
    }

    #[test]
    fn test_repeated_to_exact_length() {
        // 8-beat phrase repeated into 20 beats: two full cycles plus a cut.
        let repeated = short_phrase().repeated_to(20.0);
        assert_eq!(repeated.total_beats(), 20.0);
        // The straddling note is shortened, not dropped.
        let last = repeated.notes().last().unwrap();
        assert_eq!(last.name, "C4");
        assert_eq!(last.beats, 2.0);
    }

    #[test]
    fn test_repeated_to_boundary_is_exact() {
        let repeated = short_phrase().repeated_to(16.0);
        assert_eq!(repeated.total_beats(), 16.0);
        assert_eq!(repeated.notes().len(), 6);
    }

    #[test]
    fn test_repeated_to_empty_phrase() {
        let repeated = Phrase::default().repeated_to(8.0);
        assert!(repeated.notes().is_empty());
    }

    #[test]
    fn test_timeline_length_law() {
        // 16 bars of 8 beats at 100 BPM: 76.8 seconds.
        let len = timeline_len(100.0, 16, 44100);
        assert_eq!(len, (16.0_f64 * 8.0 * 60.0 / 100.0 * 44100.0).round() as usize);
    }

    #[test]
    fn test_place_phrase_fills_note_spans() {
        let phrase = Phrase::from_pairs(&[("A4", 1.0), ("A5", 1.0)]);
        let sample_rate = 1000;
        // 120 BPM -> 0.5 s/beat -> 500 samples per beat.
        let mut timeline: Timeline = vec![None; 1000];
        place_phrase(&phrase, 0.0, 120.0, sample_rate, &mut timeline).unwrap();

        assert_eq!(timeline[0], Some(440.0));
        assert_eq!(timeline[499], Some(440.0));
        assert_eq!(timeline[500], Some(880.0));
        assert_eq!(timeline[999], Some(880.0));
    }

    #[test]
    fn test_place_phrase_clamps_to_timeline_end() {
        let phrase = Phrase::from_pairs(&[("A4", 100.0)]);
        let mut timeline: Timeline = vec![None; 50];
        place_phrase(&phrase, 0.0, 120.0, 1000, &mut timeline).unwrap();
        assert!(timeline.iter().all(|s| *s == Some(440.0)));
    }

    #[test]
    fn test_place_phrase_unknown_note_fails() {
        let phrase = Phrase::from_pairs(&[("Z9", 1.0)]);
        let mut timeline: Timeline = vec![None; 10];
        assert!(place_phrase(&phrase, 0.0, 120.0, 1000, &mut timeline).is_err());
    }

    #[test]
    fn test_sequencer_determinism() {
        let phrase = short_phrase().repeated_to(128.0);
        let len = timeline_len(100.0, 16, 44100);

        let mut a: Timeline = vec![None; len];
        let mut b: Timeline = vec![None; len];
        place_phrase(&phrase, 0.0, 100.0, 44100, &mut a).unwrap();
        place_phrase(&phrase, 0.0, 100.0, 44100, &mut b).unwrap();
        assert!(a == b);
    }

    #[test]
    fn test_looped_phrase_leaves_no_tail_silence() {
        // A short phrase looped to the full requested length fills the
        // timeline end-to-end with no under-fill gap.
        let bars = 4;
        let phrase = short_phrase().repeated_to(bars as f64 * BEATS_PER_BAR);
        let len = timeline_len(100.0, bars, 44100);
        let mut timeline: Timeline = vec![None; len];
        place_phrase(&phrase, 0.0, 100.0, 44100, &mut timeline).unwrap();

        assert!(timeline[0].is_some());
        assert!(timeline[len - 1].is_some());
        assert!(timeline.iter().all(|s| s.is_some()));
    }

    #[test]
    fn test_bass_phrase_cycles_progression() {
        let bass = bass_phrase(10);
        assert_eq!(bass.notes().len(), 10);
        assert_eq!(bass.notes()[0].name, "A1");
        assert_eq!(bass.notes()[8].name, "A1"); // wraps after 8 bars
        assert_eq!(bass.notes()[9].name, "F1");
        assert!(bass.notes().iter().all(|n| n.beats == BEATS_PER_BAR));
    }
}
