pub mod audio;
pub mod client;
pub mod config;
pub mod error;

pub use audio::{
    load_wav, load_wav_full, AudioClip, MicrophoneConfig, MicrophoneSource, MicrophoneStream,
    SampleDepth,
};
pub use client::{
    AuthSession, Recognition, RecognitionSession, RecognizedSeconds, Segment, Token, TokenInfo,
};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
