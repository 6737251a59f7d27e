//! MP3 segment assembly: decode each segment to PCM, concatenate in order,
//! re-encode once. A single segment passes through byte-identical so the
//! common short-text case never pays a decode/re-encode round trip.

use mp3lame_encoder::{Builder, FlushNoGap, MonoPcm};
use std::io::Cursor;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to decode audio segment: {0}")]
    Decode(String),
    #[error("failed to encode assembled audio: {0}")]
    Encode(String),
}

const ENCODE_BITRATE: mp3lame_encoder::Bitrate = mp3lame_encoder::Bitrate::Kbps192;

pub struct SegmentAssembler;

impl SegmentAssembler {
    pub fn new() -> Self {
        SegmentAssembler
    }

    /// Concatenate ordered MP3 segments into one MP3 stream.
    ///
    /// Sole-segment input is returned unchanged. Otherwise every segment is
    /// decoded to mono PCM, the samples are joined back to back with no gap
    /// or fade, and the result is encoded once. Any segment that fails to
    /// decode fails the whole assembly; no partial output is produced.
    pub fn assemble(&self, segments: Vec<Vec<u8>>) -> Result<Vec<u8>, AudioError> {
        if segments.is_empty() {
            return Err(AudioError::Decode("no audio segments to assemble".to_string()));
        }
        if segments.len() == 1 {
            return Ok(segments.into_iter().next().unwrap_or_default());
        }

        let mut pcm: Vec<i16> = Vec::new();
        let mut sample_rate: Option<u32> = None;

        for (index, segment) in segments.iter().enumerate() {
            let (samples, rate) = decode_mp3(segment)
                .map_err(|e| AudioError::Decode(format!("segment {}: {}", index, e)))?;

            match sample_rate {
                None => sample_rate = Some(rate),
                Some(expected) if expected != rate => {
                    return Err(AudioError::Decode(format!(
                        "segment {}: sample rate {} does not match {}",
                        index, rate, expected
                    )));
                }
                Some(_) => {}
            }

            pcm.extend_from_slice(&samples);
        }

        let rate = sample_rate
            .ok_or_else(|| AudioError::Decode("segments contained no audio data".to_string()))?;

        tracing::debug!(
            segment_count = segments.len(),
            sample_count = pcm.len(),
            sample_rate = rate,
            "re-encoding concatenated segments"
        );

        encode_mp3(&pcm, rate)
    }
}

impl Default for SegmentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an MP3 stream into mono i16 samples plus its sample rate.
/// Multi-channel input is reduced to its first channel.
fn decode_mp3(data: &[u8]) -> Result<(Vec<i16>, u32), String> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(data.to_vec())),
        MediaSourceStreamOptions::default(),
    );
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("unrecognized audio container: {}", e))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| "no audio track found".to_string())?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| format!("unsupported codec: {}", e))?;

    let mut samples: Vec<i16> = Vec::new();
    let mut sample_rate: Option<u32> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(_)) => break, // End of stream
            Err(e) => return Err(format!("packet read failed: {}", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_rate.is_none() {
                    sample_rate = Some(decoded.spec().rate);
                }
                match decoded {
                    AudioBufferRef::F32(buf) => {
                        for &sample in buf.chan(0) {
                            let scaled = sample * f32::from(i16::MAX);
                            let clamped = scaled.clamp(f32::from(i16::MIN), f32::from(i16::MAX));
                            samples.push(clamped as i16);
                        }
                    }
                    AudioBufferRef::S16(buf) => {
                        samples.extend_from_slice(buf.chan(0));
                    }
                    AudioBufferRef::S32(buf) => {
                        for &sample in buf.chan(0) {
                            samples.push((sample >> 16) as i16);
                        }
                    }
                    _ => return Err("unsupported sample format".to_string()),
                }
            }
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(format!("decode failed: {}", e)),
        }
    }

    if samples.is_empty() {
        return Err("stream contained no audio samples".to_string());
    }

    let rate = sample_rate.ok_or_else(|| "stream reported no sample rate".to_string())?;
    Ok((samples, rate))
}

/// Encode mono i16 PCM into an MP3 stream with LAME.
pub fn encode_mp3(pcm: &[i16], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    let mut builder = Builder::new()
        .ok_or_else(|| AudioError::Encode("encoder initialization failed".to_string()))?;

    builder
        .set_num_channels(1)
        .map_err(|e| AudioError::Encode(format!("set channels failed: {:?}", e)))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| AudioError::Encode(format!("set sample rate failed: {:?}", e)))?;
    builder
        .set_brate(ENCODE_BITRATE)
        .map_err(|e| AudioError::Encode(format!("set bitrate failed: {:?}", e)))?;
    builder
        .set_quality(mp3lame_encoder::Quality::Best)
        .map_err(|e| AudioError::Encode(format!("set quality failed: {:?}", e)))?;

    let mut encoder = builder
        .build()
        .map_err(|e| AudioError::Encode(format!("encoder build failed: {:?}", e)))?;

    let input = MonoPcm(pcm);
    let mut output = Vec::new();
    output.reserve(mp3lame_encoder::max_required_buffer_size(pcm.len()));

    let encoded = encoder
        .encode(input, output.spare_capacity_mut())
        .map_err(|e| AudioError::Encode(format!("encoding failed: {:?}", e)))?;
    // SAFETY: `encode` initialized exactly `encoded` bytes of spare capacity.
    unsafe {
        output.set_len(output.len().wrapping_add(encoded));
    }

    let flushed = encoder
        .flush::<FlushNoGap>(output.spare_capacity_mut())
        .map_err(|e| AudioError::Encode(format!("flush failed: {:?}", e)))?;
    // SAFETY: `flush` initialized exactly `flushed` bytes of spare capacity.
    unsafe {
        output.set_len(output.len().wrapping_add(flushed));
    }

    Ok(output)
}
