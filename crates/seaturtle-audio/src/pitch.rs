//! Note-name to frequency mapping.
//!
//! Equal temperament with A4 = 440 Hz. A note symbol is a pitch letter
//! (A-G), an optional `#` or `b` accidental, and an octave digit, e.g.
//! "A3", "C#4", "Bb2". Unknown symbols are an error, never defaulted:
//! a bad symbol means the phrase itself is malformed.

use crate::error::{AudioError, AudioResult};

/// Reference pitch in Hz.
pub const A4_HZ: f64 = 440.0;

/// Semitone offset of a pitch letter relative to A (within the same octave
/// numbering, so C sits 9 semitones below A).
fn pitch_class_offset(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(-9),
        'D' => Some(-7),
        'E' => Some(-5),
        'F' => Some(-4),
        'G' => Some(-2),
        'A' => Some(0),
        'B' => Some(2),
        _ => None,
    }
}

/// Resolves a note symbol to its fundamental frequency in Hz.
///
/// `freq = 440 * 2^(semis / 12)` where `semis` combines the pitch-class
/// offset and `(octave - 4) * 12`.
pub fn frequency(name: &str) -> AudioResult<f64> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let letter = chars
        .next()
        .ok_or_else(|| AudioError::unknown_note(name))?
        .to_ascii_uppercase();
    let class_offset = pitch_class_offset(letter).ok_or_else(|| AudioError::unknown_note(name))?;

    let rest: String = chars.collect();
    let (accidental, octave_str) = if let Some(stripped) = rest.strip_prefix('#') {
        (1i32, stripped)
    } else if let Some(stripped) = rest.strip_prefix('b') {
        (-1i32, stripped)
    } else {
        (0i32, rest.as_str())
    };

    let octave: i32 = octave_str
        .parse()
        .map_err(|_| AudioError::unknown_note(name))?;

    let semis = class_offset + accidental + (octave - 4) * 12;
    Ok(A4_HZ * 2.0_f64.powf(semis as f64 / 12.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitch_exact() {
        assert_eq!(frequency("A4").unwrap(), 440.0);
    }

    #[test]
    fn test_octave_doubling_law() {
        assert_eq!(frequency("A5").unwrap(), 880.0);
        assert_eq!(frequency("A3").unwrap(), 220.0);

        for class in ["C", "D", "E", "F", "G", "A", "B", "C#", "Eb"] {
            let low = frequency(&format!("{class}3")).unwrap();
            let high = frequency(&format!("{class}4")).unwrap();
            assert!((high / low - 2.0).abs() < 1e-9, "octave law failed for {class}");
        }
    }

    #[test]
    fn test_enharmonic_equivalents() {
        assert_eq!(frequency("C#4").unwrap(), frequency("Db4").unwrap());
        assert_eq!(frequency("A#2").unwrap(), frequency("Bb2").unwrap());
    }

    #[test]
    fn test_middle_c() {
        let c4 = frequency("C4").unwrap();
        assert!((c4 - 261.6255653).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_symbols_fail() {
        assert!(frequency("H4").is_err());
        assert!(frequency("A").is_err());
        assert!(frequency("").is_err());
        assert!(frequency("4A").is_err());
        assert!(frequency("Axx").is_err());
    }

    #[test]
    fn test_lowercase_letter_accepted() {
        assert_eq!(frequency("a4").unwrap(), 440.0);
    }
}
