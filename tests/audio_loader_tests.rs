// Integration tests for WAV loading.
//
// Fixtures are generated on the fly with hound so every format case
// (sample rates, widths, channel layouts) is covered without binary files
// in the repo.

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use od_client::error::ClientError;
use od_client::{load_wav, load_wav_full, SampleDepth};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn spec(sample_rate: u32, bits_per_sample: u16, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    }
}

fn write_wav_i16(path: &Path, spec: WavSpec, samples: &[i16]) -> Result<()> {
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn mono_file_loads_with_exact_metadata() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "mono.wav");
    let samples: Vec<i16> = (0..3200).map(|i| i as i16).collect();
    write_wav_i16(&path, spec(16000, 16, 1), &samples)?;

    let clip = load_wav_full(&path)?;

    assert_eq!(clip.bytes.len(), 6400);
    assert_eq!(clip.sample_rate, 16000);
    assert_eq!(clip.depth, SampleDepth::Int16);
    assert_eq!(clip.depth.dtype(), "int16");
    assert!((clip.duration_seconds - 0.2).abs() < 1e-9);
    Ok(())
}

#[test]
fn stereo_channel_extraction_takes_every_second_sample() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "stereo.wav");

    // Interleaved frames [L, R]: left = i, right = 1000 + i
    let mut samples = Vec::new();
    for i in 0..100i16 {
        samples.push(i);
        samples.push(1000 + i);
    }
    write_wav_i16(&path, spec(16000, 16, 2), &samples)?;

    let clip = load_wav(&path, -1.0, 1)?;

    let recovered: Vec<i16> = clip
        .bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    let expected: Vec<i16> = (0..100i16).map(|i| 1000 + i).collect();
    assert_eq!(recovered, expected);
    Ok(())
}

#[test]
fn stereo_channel_out_of_range_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "stereo.wav");
    write_wav_i16(&path, spec(16000, 16, 2), &[0i16; 64])?;

    let err = load_wav(&path, -1.0, 2).unwrap_err();
    assert!(matches!(
        err,
        ClientError::InvalidChannel {
            channel: 2,
            channels: 2
        }
    ));
    Ok(())
}

#[test]
fn mono_channel_out_of_range_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "mono.wav");
    write_wav_i16(&path, spec(16000, 16, 1), &[0i16; 64])?;

    assert!(load_wav(&path, -1.0, 0).is_ok());
    assert!(matches!(
        load_wav(&path, -1.0, 1),
        Err(ClientError::InvalidChannel { .. })
    ));
    Ok(())
}

#[test]
fn max_duration_truncates_from_the_start() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "second.wav");
    let samples: Vec<i16> = (0..16000).map(|i| (i % 1000) as i16).collect();
    write_wav_i16(&path, spec(16000, 16, 1), &samples)?;

    let clip = load_wav(&path, 0.1, 0)?;

    // 0.1s at 16 kHz = 1600 frames of 2 bytes each
    assert_eq!(clip.bytes.len(), 3200);
    assert!((clip.duration_seconds - 0.1).abs() < 1e-9);

    let first: Vec<i16> = clip
        .bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(first, samples[..1600]);
    Ok(())
}

#[test]
fn max_duration_longer_than_clip_reads_everything() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "short.wav");
    write_wav_i16(&path, spec(16000, 16, 1), &[1i16; 3200])?;

    let clip = load_wav(&path, 60.0, 0)?;

    assert_eq!(clip.bytes.len(), 6400);
    assert!((clip.duration_seconds - 0.2).abs() < 1e-9);
    Ok(())
}

#[test]
fn low_sample_rate_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "slow.wav");
    write_wav_i16(&path, spec(4000, 16, 1), &[0i16; 400])?;

    let err = load_wav_full(&path).unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedFormat(_)));
    Ok(())
}

#[test]
fn three_byte_samples_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "deep.wav");

    let mut writer = WavWriter::create(&path, spec(16000, 24, 1))?;
    for i in 0..128i32 {
        writer.write_sample(i)?;
    }
    writer.finalize()?;

    let err = load_wav_full(&path).unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedFormat(_)));
    Ok(())
}

#[test]
fn eight_and_thirty_two_bit_widths_map_to_their_depths() -> Result<()> {
    let dir = TempDir::new()?;

    let narrow = fixture(&dir, "narrow.wav");
    let mut writer = WavWriter::create(&narrow, spec(16000, 8, 1))?;
    for i in 0..64i8 {
        writer.write_sample(i)?;
    }
    writer.finalize()?;

    let clip = load_wav_full(&narrow)?;
    assert_eq!(clip.depth, SampleDepth::Int8);
    assert_eq!(clip.bytes.len(), 64);

    let wide = fixture(&dir, "wide.wav");
    let mut writer = WavWriter::create(&wide, spec(16000, 32, 1))?;
    for i in 0..64i32 {
        writer.write_sample(i * 1_000_000)?;
    }
    writer.finalize()?;

    let clip = load_wav_full(&wide)?;
    assert_eq!(clip.depth, SampleDepth::Int32);
    assert_eq!(clip.bytes.len(), 256);
    Ok(())
}

#[test]
fn nonexistent_file_is_an_error() {
    let result = load_wav_full("/nonexistent/path/to/audio.wav");
    assert!(matches!(result, Err(ClientError::Wav(_))));
}
