use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::info;

use super::clip::{AudioClip, SampleDepth};
use crate::error::{ClientError, Result};

/// Read little-endian PCM samples of one concrete width into a byte buffer.
macro_rules! read_pcm {
    ($reader:expr, $take:expr, $ty:ty) => {{
        let mut out: Vec<u8> = Vec::with_capacity($take * std::mem::size_of::<$ty>());
        for sample in $reader.samples::<$ty>().take($take) {
            out.extend_from_slice(&sample?.to_le_bytes());
        }
        out
    }};
}

/// Load a WAV file into a single-channel [`AudioClip`].
///
/// A negative `max_duration` loads the whole clip; otherwise at most
/// `max_duration` seconds are read from the start and the clip duration is
/// computed from the frames actually read. For multi-channel files only the
/// samples of `channel` are kept; a mono file is returned unchanged.
pub fn load_wav(path: impl AsRef<Path>, max_duration: f64, channel: u16) -> Result<AudioClip> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_rate < 8000 {
        return Err(ClientError::UnsupportedFormat(format!(
            "sampling rate {} is too low, use clips with sampling rate >= 8000",
            spec.sample_rate
        )));
    }

    let depth = match (spec.sample_format, spec.bits_per_sample % 8) {
        (SampleFormat::Int, 0) => SampleDepth::from_sample_width(spec.bits_per_sample / 8),
        _ => None,
    }
    .ok_or_else(|| {
        ClientError::UnsupportedFormat(format!(
            "{}-bit {:?} samples are not supported",
            spec.bits_per_sample, spec.sample_format
        ))
    })?;

    if channel >= spec.channels {
        return Err(ClientError::InvalidChannel {
            channel,
            channels: spec.channels,
        });
    }

    let total_frames = reader.duration() as u64;
    let frames_to_read = if max_duration < 0.0 {
        total_frames
    } else {
        ((spec.sample_rate as f64 * max_duration) as u64).min(total_frames)
    };
    let duration_seconds = frames_to_read as f64 / spec.sample_rate as f64;

    let samples_to_take = (frames_to_read * spec.channels as u64) as usize;
    let interleaved = match depth {
        SampleDepth::Int8 => read_pcm!(reader, samples_to_take, i8),
        SampleDepth::Int16 => read_pcm!(reader, samples_to_take, i16),
        SampleDepth::Int32 => read_pcm!(reader, samples_to_take, i32),
    };

    let bytes = select_channel(interleaved, depth.byte_width(), channel, spec.channels);

    info!(
        "Loaded {}: {:.2}s, {} Hz, {} ({} of {} channel(s))",
        path.display(),
        duration_seconds,
        spec.sample_rate,
        depth.dtype(),
        channel,
        spec.channels
    );

    Ok(AudioClip {
        bytes,
        sample_rate: spec.sample_rate,
        depth,
        duration_seconds,
    })
}

/// Load a whole WAV file, keeping channel 0 of multi-channel data.
pub fn load_wav_full(path: impl AsRef<Path>) -> Result<AudioClip> {
    load_wav(path, -1.0, 0)
}

/// Keep every `channels`-th sample starting at `channel`, at byte granularity.
///
/// Interleaved frames are laid out sample-by-sample, so the de-interleave is
/// a strided walk over width-sized chunks. Mono data passes through as-is.
fn select_channel(interleaved: Vec<u8>, width: usize, channel: u16, channels: u16) -> Vec<u8> {
    if channels == 1 {
        return interleaved;
    }

    interleaved
        .chunks_exact(width)
        .skip(channel as usize)
        .step_by(channels as usize)
        .flatten()
        .copied()
        .collect()
}
