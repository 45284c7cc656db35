pub mod auth;
pub mod messages;
pub mod recognizer;

pub use auth::AuthSession;
pub use messages::{Recognition, RecognizedSeconds, Segment, Token, TokenInfo};
pub use recognizer::RecognitionSession;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// POST a JSON body and return the JSON payload of a 200 response.
///
/// Any other status is a [`ClientError::RemoteService`] carrying the
/// server's `detail` message.
pub(crate) fn post_json<B: Serialize>(
    http: &reqwest::blocking::Client,
    url: &str,
    body: &B,
) -> Result<Value> {
    let response = http.post(url).json(body).send()?;

    if response.status() == StatusCode::OK {
        Ok(response.json()?)
    } else {
        let status = response.status();
        let detail = response
            .json::<Value>()
            .ok()
            .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("server returned status {}", status));
        Err(ClientError::RemoteService(detail))
    }
}

/// Deserialize a JSON payload into a typed response.
pub(crate) fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::RemoteService(format!("malformed server response: {}", e)))
}

/// The server reports expiry as an ISO datetime; only the date part is kept.
pub(crate) fn parse_expiry(raw: &str) -> Result<NaiveDate> {
    let date = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ClientError::RemoteService(format!("malformed expiry date: {}", raw)))
}
