use base64::Engine;
use serde_json::Value;
use tracing::info;

use super::messages::{
    Recognition, RecognizeBody, RecognizedSeconds, RecognizedSecondsPayload, Segment, SegmentRow,
    TokenBody, TokenInfo, TokenInfoPayload,
};
use super::{decode_payload, parse_expiry, post_json};
use crate::audio::AudioClip;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Result codes as reported by the service. Code 0 is reserved for
/// "no speech detected" and never appears in this table.
const RESULT_LABELS: &[(u32, &str)] = &[(1, "oleg"), (2, "not_oleg")];

fn label_for(results_id: u32) -> Option<&'static str> {
    RESULT_LABELS
        .iter()
        .find(|(id, _)| *id == results_id)
        .map(|(_, label)| *label)
}

/// A token-scoped session with the recognition service.
///
/// Connecting validates the token with the server; the expiry date alone is
/// never trusted. All calls block until the server responds.
#[derive(Debug)]
pub struct RecognitionSession {
    base_url: String,
    http: reqwest::blocking::Client,
    token: TokenBody,
}

impl RecognitionSession {
    /// Validate `token` against the `/check-token` endpoint.
    pub fn connect(config: &ClientConfig, token: &str) -> Result<Self> {
        let session = Self {
            base_url: config.base_url(),
            http: reqwest::blocking::Client::new(),
            token: TokenBody {
                token: token.to_string(),
            },
        };

        post_json(&session.http, &session.url("check-token"), &session.token)
            .map_err(ClientError::into_authentication)?;

        info!("Token is valid");
        Ok(session)
    }

    /// Recognized seconds charged to this token, per mode.
    pub fn usage(&self) -> Result<RecognizedSeconds> {
        let value = post_json(
            &self.http,
            &self.url("recognized-seconds-by-token"),
            &self.token,
        )?;
        let payload: RecognizedSecondsPayload = decode_payload(value)?;

        info!("Received recognized seconds for the token");
        Ok(payload.into())
    }

    /// Owner and expiry date of this token.
    pub fn token_info(&self) -> Result<TokenInfo> {
        let value = post_json(&self.http, &self.url("token-information"), &self.token)?;
        let payload: TokenInfoPayload = decode_payload(value)?;

        Ok(TokenInfo {
            owner: payload.owner,
            expires: parse_expiry(&payload.expires)?,
        })
    }

    /// Submit a clip for recognition.
    ///
    /// `mode` must be `"short"` (one label for the whole clip) or `"long"`
    /// (timed segments); anything else fails before a request is made.
    /// `None` means the server detected no speech in the clip.
    pub fn recognize(&self, clip: &AudioClip, mode: &str) -> Result<Option<Recognition>> {
        if mode != "short" && mode != "long" {
            return Err(ClientError::InvalidArgument(
                "mode must be either 'short' or 'long'".to_string(),
            ));
        }

        let body = RecognizeBody {
            length: mode,
            token: &self.token.token,
            audio: base64::engine::general_purpose::STANDARD.encode(&clip.bytes),
            sr: clip.sample_rate,
            dtype: clip.depth.dtype(),
        };

        let value = post_json(&self.http, &self.url("recognize"), &body)?;
        let result = if mode == "short" {
            decode_short(&value)?
        } else {
            decode_long(value)?
        };

        if result.is_none() {
            info!("Audio data does not contain speech");
        }
        Ok(result)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

/// Short mode: `{"results_id": n}` where 0 means no speech.
fn decode_short(payload: &Value) -> Result<Option<Recognition>> {
    let results_id = payload
        .get("results_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            ClientError::RemoteService("malformed recognition response: no results_id".to_string())
        })?;

    if results_id == 0 {
        return Ok(None);
    }

    let label = label_for(results_id as u32).ok_or_else(|| {
        ClientError::RemoteService(format!("unknown result code {}", results_id))
    })?;
    Ok(Some(Recognition::Label(label.to_string())))
}

/// Long mode: a null payload means no speech; otherwise a table of rows,
/// possibly arriving as a JSON-encoded string (the service double-encodes
/// the table). Each row's numeric code is replaced by its label.
fn decode_long(payload: Value) -> Result<Option<Recognition>> {
    let table = match payload {
        Value::Null => return Ok(None),
        Value::String(inner) => serde_json::from_str::<Value>(&inner).map_err(|e| {
            ClientError::RemoteService(format!("malformed recognition table: {}", e))
        })?,
        other => other,
    };

    let rows: Vec<SegmentRow> = decode_payload(table)?;
    let segments = rows
        .into_iter()
        .map(|row| {
            let label = label_for(row.results_id).ok_or_else(|| {
                ClientError::RemoteService(format!("unknown result code {}", row.results_id))
            })?;
            Ok(Segment {
                start: row.start,
                end: row.end,
                duration: row.duration,
                confidence: row.confidence,
                label: label.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(Recognition::Segments(segments)))
}
