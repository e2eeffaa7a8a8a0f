//! WAV serialization for rendered sample buffers.
//!
//! Packs a multi-channel float buffer into a canonical uncompressed PCM
//! WAV container: a 44-byte RIFF/WAVE header followed by interleaved
//! 16-bit signed little-endian samples. The container is produced
//! directly rather than through an encoder crate so the byte layout and
//! sample scaling stay under this module's control and can be verified
//! bit-for-bit.

use crate::error::{GeneratorError, Result};
use crate::synth::SampleBuffer;

/// Size of the RIFF/WAVE header in bytes.
pub const HEADER_LEN: usize = 44;

/// Bytes per encoded sample (16-bit PCM).
const BYTES_PER_SAMPLE: usize = 2;

/// Encodes a sample buffer into a complete WAV byte sequence.
///
/// The layout is fixed: PCM format tag 1, 16 bits per sample, all
/// multi-byte integers little-endian, data interleaved frame by frame
/// in channel order. Either the full byte sequence is returned or an
/// error; no partial output is ever produced.
///
/// # Errors
///
/// Returns `CHANNEL_MISMATCH` when the buffer has no channels or its
/// channels have differing lengths, and `BUFFER_TOO_LARGE` when the
/// encoded output would not fit the 32-bit RIFF chunk size fields.
pub fn encode(buffer: &SampleBuffer, sample_rate_hz: u32) -> Result<Vec<u8>> {
    let channels = buffer.channels();
    if channels.is_empty() {
        return Err(GeneratorError::channel_mismatch("buffer has no channels"));
    }

    let frame_len = channels[0].len();
    for (index, channel) in channels.iter().enumerate() {
        if channel.len() != frame_len {
            return Err(GeneratorError::channel_mismatch(format!(
                "channel {} has {} samples, expected {}",
                index,
                channel.len(),
                frame_len
            )));
        }
    }

    let num_channels = channels.len();
    let (riff_len, data_len) = chunk_sizes(frame_len, num_channels)?;

    let mut out = Vec::with_capacity(data_len as usize + HEADER_LEN);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&(num_channels as u16).to_le_bytes());
    out.extend_from_slice(&sample_rate_hz.to_le_bytes());
    let byte_rate = sample_rate_hz * num_channels as u32 * BYTES_PER_SAMPLE as u32;
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&((num_channels * BYTES_PER_SAMPLE) as u16).to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());

    for frame in 0..frame_len {
        for channel in channels {
            out.extend_from_slice(&pcm16(channel[frame]).to_le_bytes());
        }
    }

    Ok(out)
}

/// Computes the RIFF and data chunk sizes for a buffer shape.
///
/// Both values go into 32-bit header fields, so the encoded output is
/// rejected up front once it passes the 4 GiB container limit rather
/// than wrapping into a corrupt header.
fn chunk_sizes(frame_len: usize, num_channels: usize) -> Result<(u32, u32)> {
    let data_len = frame_len
        .checked_mul(num_channels)
        .and_then(|samples| samples.checked_mul(BYTES_PER_SAMPLE))
        .ok_or_else(|| GeneratorError::buffer_too_large(frame_len, num_channels))?;
    let riff_len = data_len
        .checked_add(HEADER_LEN - 8)
        .ok_or_else(|| GeneratorError::buffer_too_large(frame_len, num_channels))?;
    match (u32::try_from(riff_len), u32::try_from(data_len)) {
        (Ok(riff), Ok(data)) => Ok((riff, data)),
        _ => Err(GeneratorError::buffer_too_large(frame_len, num_channels)),
    }
}

/// Converts one float sample to a signed 16-bit PCM value.
///
/// The sample is clamped to [-1, 1] and scaled asymmetrically: negative
/// values by 32768 and non-negative values by 32767, so both extremes
/// of the signed 16-bit range are reachable. This matches the scaling
/// used by the frontends this daemon replaces and is kept exactly for
/// output compatibility.
fn pcm16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo(left: Vec<f32>, right: Vec<f32>) -> SampleBuffer {
        SampleBuffer::new(vec![left, right])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn header_layout_for_one_second_stereo() {
        let buffer = stereo(vec![0.0; 44100], vec![0.0; 44100]);
        let bytes = encode(&buffer, 44100).unwrap();

        assert_eq!(bytes.len(), 44100 * 2 * 2 + 44);
        assert_eq!(bytes.len(), 176444);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 176436);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 2);
        assert_eq!(u32_at(&bytes, 24), 44100);
        assert_eq!(u32_at(&bytes, 28), 44100 * 2 * 2);
        assert_eq!(u16_at(&bytes, 32), 4);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 176444 - 44);
    }

    #[test]
    fn interleaved_full_scale_frame() {
        let buffer = stereo(vec![1.0], vec![-1.0]);
        let bytes = encode(&buffer, 44100).unwrap();

        assert_eq!(bytes.len(), 48);
        // Little-endian 32767 then little-endian -32768
        assert_eq!(&bytes[44..], [0xFF, 0x7F, 0x00, 0x80]);
    }

    #[test]
    fn out_of_range_samples_clamp_to_full_scale() {
        let clipped = encode(&stereo(vec![1.5], vec![-1.5]), 44100).unwrap();
        let full = encode(&stereo(vec![1.0], vec![-1.0]), 44100).unwrap();
        assert_eq!(clipped, full);
    }

    #[test]
    fn asymmetric_scaling() {
        let bytes = encode(&stereo(vec![0.5], vec![-0.5]), 44100).unwrap();
        let left = i16::from_le_bytes(bytes[44..46].try_into().unwrap());
        let right = i16::from_le_bytes(bytes[46..48].try_into().unwrap());
        assert_eq!(left, (0.5f32 * 32767.0) as i16); // 16383
        assert_eq!(right, (-0.5f32 * 32768.0) as i16); // -16384
        assert_eq!(left, 16383);
        assert_eq!(right, -16384);
    }

    #[test]
    fn mismatched_channel_lengths_fail_fast() {
        let buffer = stereo(vec![0.0; 10], vec![0.0; 9]);
        let err = encode(&buffer, 44100).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ChannelMismatch);
    }

    #[test]
    fn empty_channel_list_fails_fast() {
        let buffer = SampleBuffer::new(Vec::new());
        let err = encode(&buffer, 44100).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ChannelMismatch);
    }

    #[test]
    fn zero_length_channels_encode_header_only() {
        let bytes = encode(&stereo(Vec::new(), Vec::new()), 44100).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn mono_buffer_is_supported() {
        let bytes = encode(&SampleBuffer::new(vec![vec![0.0; 100]]), 44100).unwrap();
        assert_eq!(bytes.len(), 100 * 2 + 44);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u32_at(&bytes, 28), 44100 * 2);
    }

    #[test]
    fn hound_decodes_encoded_output() {
        // Cross-check the hand-written container with an independent decoder
        let buffer = stereo(vec![0.0, 0.25, -0.25, 1.0], vec![0.0, -0.25, 0.25, -1.0]);
        let bytes = encode(&buffer, 44100).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        let expected = vec![
            0,
            0,
            (0.25f32 * 32767.0) as i16,
            (-0.25f32 * 32768.0) as i16,
            (-0.25f32 * 32768.0) as i16,
            (0.25f32 * 32767.0) as i16,
            32767,
            -32768,
        ];
        assert_eq!(samples, expected);
    }

    #[test]
    fn chunk_sizes_match_header_fields() {
        let (riff, data) = chunk_sizes(44100, 2).unwrap();
        assert_eq!(data, 44100 * 2 * 2);
        assert_eq!(riff, 44100 * 2 * 2 + 36);
    }

    #[test]
    fn oversized_buffer_is_rejected() {
        // Just over the 32-bit data chunk limit for stereo
        let frames_over = (u32::MAX as usize - 36) / 4 + 1;
        let err = chunk_sizes(frames_over, 2).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BufferTooLarge);

        let (riff, _) = chunk_sizes(frames_over - 1, 2).unwrap();
        assert!(riff <= u32::MAX - 3);

        // Byte-count multiplication overflow is caught too
        let err = chunk_sizes(usize::MAX, 2).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BufferTooLarge);
    }

    #[test]
    fn pcm16_extremes() {
        assert_eq!(pcm16(1.0), 32767);
        assert_eq!(pcm16(-1.0), -32768);
        assert_eq!(pcm16(0.0), 0);
        assert_eq!(pcm16(2.0), 32767);
        assert_eq!(pcm16(-2.0), -32768);
    }
}
