use std::sync::mpsc::{self, Receiver};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, Stream, StreamConfig};
use tracing::{error, info, warn};

use crate::error::{ClientError, Result};

/// Capture format for the microphone stream.
///
/// Samples are always 16-bit signed integer PCM.
#[derive(Debug, Clone)]
pub struct MicrophoneConfig {
    /// Number of input channels (1 = mono)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Default for MicrophoneConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 16000,
        }
    }
}

/// Factory for scoped microphone streams.
pub struct MicrophoneSource {
    chunk_size: u32,
    config: MicrophoneConfig,
}

impl MicrophoneSource {
    /// `chunk_seconds` sets the capture buffer to
    /// `chunk_seconds * sample_rate` samples per callback.
    pub fn new(chunk_seconds: f64, config: MicrophoneConfig) -> Self {
        let chunk_size = (chunk_seconds * config.sample_rate as f64) as u32;
        Self { chunk_size, config }
    }

    /// Open the default input device and start capturing.
    ///
    /// The returned stream releases the device when dropped, so the device
    /// is closed on every exit path.
    pub fn open(&self) -> Result<MicrophoneStream> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| ClientError::AudioDevice("no default input device".to_string()))?;

        let stream_config = StreamConfig {
            channels: self.config.channels,
            sample_rate: SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(self.chunk_size),
        };

        let (tx, rx) = mpsc::channel();
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(data.to_vec());
                },
                |err: cpal::StreamError| {
                    error!("microphone stream error: {}", err);
                },
                None,
            )
            .map_err(|e| ClientError::AudioDevice(e.to_string()))?;

        stream
            .play()
            .map_err(|e| ClientError::AudioDevice(e.to_string()))?;

        info!(
            "Microphone stream started ({} Hz, {} channel(s), {} samples/chunk)",
            self.config.sample_rate, self.config.channels, self.chunk_size
        );

        Ok(MicrophoneStream {
            stream,
            rx,
            sample_rate: self.config.sample_rate,
        })
    }
}

/// A live capture stream. 16-bit PCM chunks arrive via [`read_chunk`].
///
/// [`read_chunk`]: MicrophoneStream::read_chunk
pub struct MicrophoneStream {
    stream: Stream,
    rx: Receiver<Vec<i16>>,
    sample_rate: u32,
}

impl MicrophoneStream {
    /// Block until the next chunk of samples is available.
    pub fn read_chunk(&self) -> Result<Vec<i16>> {
        self.rx
            .recv()
            .map_err(|_| ClientError::AudioDevice("microphone stream closed".to_string()))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stop capturing and release the device.
    pub fn close(self) {
        // Drop does the actual work
    }
}

impl Drop for MicrophoneStream {
    fn drop(&mut self) {
        if let Err(e) = self.stream.pause() {
            warn!("Failed to pause microphone stream on drop: {}", e);
        }
        info!("Microphone stream finished");
    }
}
