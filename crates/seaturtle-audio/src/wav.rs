//! Deterministic WAV file writer.
//!
//! Packs float samples in [-1, 1] into 16-bit signed little-endian PCM and
//! prepends a standard RIFF/WAVE header. No timestamps or variable metadata
//! are written, so the same samples always produce the same bytes; the
//! BLAKE3 hash of the PCM payload is exposed for determinism checks.

use std::io::{self, Write};

/// WAV format parameters.
#[derive(Debug, Clone, Copy)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 here).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates a stereo format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Converts f64 samples to 16-bit PCM bytes. Values outside [-1, 1] are
/// clipped before quantization.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let quantized = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&quantized.to_le_bytes());
    }
    pcm
}

/// Converts left/right channels to interleaved 16-bit PCM bytes.
pub fn stereo_to_pcm16(left: &[f64], right: &[f64]) -> Vec<u8> {
    let frames = left.len().min(right.len());
    let mut pcm = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let l = (left[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        let r = (right[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&l.to_le_bytes());
        pcm.extend_from_slice(&r.to_le_bytes());
    }
    pcm
}

/// Writes a complete WAV file (header + PCM payload) to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // total minus the 8-byte RIFF prelude

    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // chunk size for PCM
    writer.write_all(&1u16.to_le_bytes())?; // format tag: PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// WAV serializer for a fixed format.
#[derive(Debug, Clone, Copy)]
pub struct WavWriter {
    format: WavFormat,
}

impl WavWriter {
    /// Creates a mono writer.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            format: WavFormat::mono(sample_rate),
        }
    }

    /// Creates a stereo writer.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            format: WavFormat::stereo(sample_rate),
        }
    }

    /// Serializes mono samples to complete WAV bytes.
    pub fn write_mono(&self, samples: &[f64]) -> Vec<u8> {
        self.to_vec(&samples_to_pcm16(samples))
    }

    /// Serializes stereo samples to complete WAV bytes.
    pub fn write_stereo(&self, left: &[f64], right: &[f64]) -> Vec<u8> {
        self.to_vec(&stereo_to_pcm16(left, right))
    }

    /// BLAKE3 hash of the mono PCM payload (not the header).
    pub fn pcm_hash_mono(&self, samples: &[f64]) -> String {
        blake3::hash(&samples_to_pcm16(samples)).to_hex().to_string()
    }

    /// BLAKE3 hash of the stereo PCM payload.
    pub fn pcm_hash_stereo(&self, left: &[f64], right: &[f64]) -> String {
        blake3::hash(&stereo_to_pcm16(left, right))
            .to_hex()
            .to_string()
    }

    fn to_vec(&self, pcm: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(44 + pcm.len());
        write_wav(&mut buffer, &self.format, pcm).expect("writing to Vec should not fail");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm16_quantization() {
        let pcm = samples_to_pcm16(&[0.0, 1.0, -1.0, 0.5]);
        assert_eq!(pcm.len(), 8);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 0);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), -32767);
        assert_eq!(i16::from_le_bytes([pcm[6], pcm[7]]), 16384);
    }

    #[test]
    fn test_pcm16_clips_out_of_range() {
        let pcm = samples_to_pcm16(&[2.5, -3.0]);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -32767);
    }

    #[test]
    fn test_stereo_interleaving() {
        let pcm = stereo_to_pcm16(&[1.0, 0.0], &[-1.0, 0.5]);
        assert_eq!(pcm.len(), 8);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -32767);
        assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), 0);
        assert_eq!(i16::from_le_bytes([pcm[6], pcm[7]]), 16384);
    }

    #[test]
    fn test_wav_header_fields() {
        let writer = WavWriter::mono(44100);
        let bytes = writer.write_mono(&[0.0; 100]);

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        // channels
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
        // sample rate
        assert_eq!(
            u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            44100
        );
        // bits per sample
        assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
        // data chunk size
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(
            u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]),
            200
        );
        assert_eq!(bytes.len(), 44 + 200);
    }

    #[test]
    fn test_stereo_header_block_align() {
        let writer = WavWriter::stereo(44100);
        let bytes = writer.write_stereo(&[0.0; 10], &[0.0; 10]);

        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 2);
        // byte rate = 44100 * 2 channels * 2 bytes
        assert_eq!(
            u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
            44100 * 4
        );
        // block align
        assert_eq!(u16::from_le_bytes([bytes[32], bytes[33]]), 4);
    }

    #[test]
    fn test_pcm_hash_is_stable() {
        let writer = WavWriter::mono(44100);
        let samples: Vec<f64> = (0..64).map(|i| (i as f64 / 64.0).sin()).collect();
        assert_eq!(writer.pcm_hash_mono(&samples), writer.pcm_hash_mono(&samples));
        assert_eq!(writer.pcm_hash_mono(&samples).len(), 64);
    }
}
