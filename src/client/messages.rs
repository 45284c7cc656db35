use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Username/password pair re-sent on every account-scoped call.
///
/// The service has no session cookies; each request authenticates afresh.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CredentialsBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsageByUserBody<'a> {
    #[serde(flatten)]
    pub credentials: &'a CredentialsBody,
    #[serde(rename = "type")]
    pub period: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TokenBody {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecognizeBody<'a> {
    /// Recognition mode; the service expects this field name spelled "lenght"
    #[serde(rename = "lenght")]
    pub length: &'a str,
    pub token: &'a str,
    /// Base64-encoded PCM bytes
    pub audio: String,
    pub sr: u32,
    pub dtype: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenPayload {
    pub token: String,
    pub expires: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenListPayload {
    pub tokens: Vec<TokenPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecognizedSecondsPayload {
    pub short_mode: f64,
    pub long_mode: f64,
    pub all: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenInfoPayload {
    pub owner: String,
    pub expires: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SegmentRow {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub confidence: f64,
    pub results_id: u32,
}

/// An API token and the calendar date it expires on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub expires: NaiveDate,
}

/// Recognized seconds per mode, rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSeconds {
    pub short_mode: f64,
    pub long_mode: f64,
    pub all: f64,
}

impl From<RecognizedSecondsPayload> for RecognizedSeconds {
    fn from(payload: RecognizedSecondsPayload) -> Self {
        Self {
            short_mode: round2(payload.short_mode),
            long_mode: round2(payload.long_mode),
            all: round2(payload.all),
        }
    }
}

/// Owner and expiry date of a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub owner: String,
    pub expires: NaiveDate,
}

/// A single timed segment from a long-mode recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub confidence: f64,
    pub label: String,
}

/// A decoded recognition result. Absence of speech is represented by the
/// caller receiving `None` instead of a `Recognition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Recognition {
    /// Short mode: a single label over the whole clip
    Label(String),
    /// Long mode: ordered timed segments
    Segments(Vec<Segment>),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
