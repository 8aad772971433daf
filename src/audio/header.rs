//! WAV header decoding
//!
//! Decodes the canonical 44-byte RIFF/WAVE prefix at fixed byte offsets.
//! No chunk past that prefix is consulted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Length of the canonical PCM WAV header in bytes.
pub const HEADER_LEN: usize = 44;

// Little-endian field offsets inside the header.
const FORMAT_TAG_OFFSET: usize = 20;
const NUM_CHANNELS_OFFSET: usize = 22;
const SAMPLE_RATE_OFFSET: usize = 24;
const BYTE_RATE_OFFSET: usize = 28;
const BITS_PER_SAMPLE_OFFSET: usize = 34;

/// Format tag value signalling uncompressed PCM.
const PCM_FORMAT_TAG: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Pcm,
    Compressed,
}

impl AudioFormat {
    /// Tag 1 is PCM; every other tag (0, 3 for IEEE float, 0xFFFE
    /// extensible, ...) falls into the single `Compressed` bucket.
    pub fn from_tag(tag: u16) -> Self {
        if tag == PCM_FORMAT_TAG {
            AudioFormat::Pcm
        } else {
            AudioFormat::Compressed
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::Pcm => "PCM",
            AudioFormat::Compressed => "Compressed",
        }
    }
}

/// Metadata decoded from the first 44 bytes of a WAV file.
///
/// Layout (little-endian):
/// - `[20..22]` format tag: u16 (1 = PCM)
/// - `[22..24]` channel count: u16
/// - `[24..28]` sample rate: u32
/// - `[28..32]` byte rate: u32
/// - `[34..36]` bits per sample: u16
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMetadata {
    pub format: AudioFormat,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: Option<u32>,
    pub bits_per_sample: u16,
}

impl AudioMetadata {
    /// Decodes a complete header at the fixed offsets above.
    pub fn from_header_bytes(header: &[u8; HEADER_LEN]) -> Self {
        Self {
            format: AudioFormat::from_tag(u16_le(header, FORMAT_TAG_OFFSET)),
            num_channels: u16_le(header, NUM_CHANNELS_OFFSET),
            sample_rate: u32_le(header, SAMPLE_RATE_OFFSET),
            byte_rate: Some(u32_le(header, BYTE_RATE_OFFSET)),
            bits_per_sample: u16_le(header, BITS_PER_SAMPLE_OFFSET),
        }
    }

    /// Reads exactly the 44-byte prefix from `reader`. A source shorter
    /// than the header is an `UnexpectedEof` error, never a partial record.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        reader.read_exact(&mut header)?;
        Ok(Self::from_header_bytes(&header))
    }

    /// Opens `path` and decodes its header. The handle is scoped to this
    /// call and released whether decode succeeds or fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IngestError::metadata(path, e))?;
        Self::from_reader(file).map_err(|e| IngestError::metadata(path, e))
    }

    /// Bits of audio data per second, always recomputed from the decoded
    /// fields, never read from the file. Widened to u64 so values like
    /// 192 kHz x 8 channels x 32 bits stay exact.
    pub fn bit_rate(&self) -> u64 {
        self.sample_rate as u64 * self.num_channels as u64 * self.bits_per_sample as u64
    }
}

fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_header(
        format_tag: u16,
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    ) -> [u8; HEADER_LEN] {
        let bytes_per_sample = bits_per_sample / 8;
        let byte_rate = sample_rate * channels as u32 * bytes_per_sample as u32;
        let block_align = channels * bytes_per_sample;

        let mut header = Vec::with_capacity(HEADER_LEN);
        header.extend_from_slice(b"RIFF");
        header.extend_from_slice(&36u32.to_le_bytes());
        header.extend_from_slice(b"WAVE");
        header.extend_from_slice(b"fmt ");
        header.extend_from_slice(&16u32.to_le_bytes());
        header.extend_from_slice(&format_tag.to_le_bytes());
        header.extend_from_slice(&channels.to_le_bytes());
        header.extend_from_slice(&sample_rate.to_le_bytes());
        header.extend_from_slice(&byte_rate.to_le_bytes());
        header.extend_from_slice(&block_align.to_le_bytes());
        header.extend_from_slice(&bits_per_sample.to_le_bytes());
        header.extend_from_slice(b"data");
        header.extend_from_slice(&0u32.to_le_bytes());
        header.try_into().unwrap()
    }

    #[test]
    fn test_pcm_tag_maps_to_pcm() {
        assert_eq!(AudioFormat::from_tag(1), AudioFormat::Pcm);
        assert_eq!(AudioFormat::Pcm.name(), "PCM");
    }

    #[test]
    fn test_non_pcm_tags_bucketed_as_compressed() {
        for tag in [0u16, 2, 3, 0x0006, 0xFFFE] {
            assert_eq!(AudioFormat::from_tag(tag), AudioFormat::Compressed);
        }
        assert_eq!(AudioFormat::Compressed.name(), "Compressed");
    }

    #[test]
    fn test_field_extraction() {
        let header = make_header(1, 2, 44100, 16);
        let meta = AudioMetadata::from_header_bytes(&header);

        assert_eq!(meta.format, AudioFormat::Pcm);
        assert_eq!(meta.num_channels, 2);
        assert_eq!(meta.sample_rate, 44100);
        assert_eq!(meta.byte_rate, Some(176_400));
        assert_eq!(meta.bits_per_sample, 16);
    }

    #[test]
    fn test_byte_rate_read_verbatim_even_when_zero() {
        let mut header = make_header(1, 2, 44100, 16);
        header[28..32].copy_from_slice(&0u32.to_le_bytes());
        let meta = AudioMetadata::from_header_bytes(&header);
        assert_eq!(meta.byte_rate, Some(0));
    }

    #[test]
    fn test_bit_rate_derivation() {
        let header = make_header(1, 2, 44100, 16);
        let meta = AudioMetadata::from_header_bytes(&header);
        assert_eq!(meta.bit_rate(), 1_411_200);
    }

    #[test]
    fn test_bit_rate_is_computed_not_read() {
        // A lying byte_rate field must not leak into the derived value.
        let mut header = make_header(1, 2, 44100, 16);
        header[28..32].copy_from_slice(&999u32.to_le_bytes());
        let meta = AudioMetadata::from_header_bytes(&header);
        assert_eq!(meta.byte_rate, Some(999));
        assert_eq!(meta.bit_rate(), 1_411_200);
    }

    #[test]
    fn test_bit_rate_large_values_do_not_overflow() {
        let header = make_header(1, 8, 192_000, 32);
        let meta = AudioMetadata::from_header_bytes(&header);
        assert_eq!(meta.bit_rate(), 49_152_000);

        let meta = AudioMetadata {
            format: AudioFormat::Pcm,
            num_channels: u16::MAX,
            sample_rate: u32::MAX,
            byte_rate: None,
            bits_per_sample: u16::MAX,
        };
        assert_eq!(
            meta.bit_rate(),
            u32::MAX as u64 * u16::MAX as u64 * u16::MAX as u64
        );
    }

    #[test]
    fn test_from_reader() {
        let header = make_header(1, 1, 48000, 24);
        let meta = AudioMetadata::from_reader(Cursor::new(header.to_vec())).unwrap();
        assert_eq!(meta.sample_rate, 48000);
        assert_eq!(meta.bits_per_sample, 24);
    }

    #[test]
    fn test_truncated_reader_is_error() {
        let header = make_header(1, 2, 44100, 16);
        let err = AudioMetadata::from_reader(Cursor::new(header[..43].to_vec())).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_from_file_truncated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"RIFF").unwrap();
        file.flush().unwrap();

        let err = AudioMetadata::from_file(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::MetadataExtraction { .. }));
        assert!(err.to_string().contains("metadata"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AudioMetadata::from_file("/non/existent/track.wav").unwrap_err();
        assert!(matches!(err, IngestError::MetadataExtraction { .. }));
        assert!(err.to_string().contains("/non/existent/track.wav"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&make_header(1, 2, 44100, 16)).unwrap();
        file.flush().unwrap();

        let meta = AudioMetadata::from_file(file.path()).unwrap();
        assert_eq!(meta.format, AudioFormat::Pcm);
        assert_eq!(meta.num_channels, 2);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let header = make_header(0xFFFE, 6, 96000, 24);
        let a = AudioMetadata::from_header_bytes(&header);
        let b = AudioMetadata::from_header_bytes(&header);
        assert_eq!(a, b);
    }
}
