pub mod clip;
pub mod loader;
pub mod microphone;

pub use clip::{AudioClip, SampleDepth};
pub use loader::{load_wav, load_wav_full};
pub use microphone::{MicrophoneConfig, MicrophoneSource, MicrophoneStream};
