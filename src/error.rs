use thiserror::Error;

/// Errors surfaced by the Oleg Detection client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("channel {channel} is out of range: the clip has {channels} channel(s)")]
    InvalidChannel { channel: u16, channels: u16 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("recognition service error: {0}")]
    RemoteService(String),

    #[error("failed to read WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("audio device error: {0}")]
    AudioDevice(String),
}

impl ClientError {
    /// Reclassify a server rejection as a credential/token rejection.
    ///
    /// Calls that carry credentials (sign-in, token issuance, check-token)
    /// treat any non-success status as an authentication failure rather
    /// than a generic service error.
    pub(crate) fn into_authentication(self) -> Self {
        match self {
            ClientError::RemoteService(detail) => ClientError::Authentication(detail),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
