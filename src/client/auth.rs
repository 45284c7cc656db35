use tracing::info;

use super::messages::{
    CredentialsBody, RecognizedSeconds, RecognizedSecondsPayload, Token, TokenListPayload,
    TokenPayload, UsageByUserBody,
};
use super::{decode_payload, parse_expiry, post_json};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// An account-scoped session with the recognition service.
///
/// Signing in verifies the credentials once; every subsequent call re-sends
/// them, since the service keeps no session state. A server rejection on any
/// of these calls is an [`ClientError::Authentication`] carrying the
/// server's detail message.
#[derive(Debug)]
pub struct AuthSession {
    base_url: String,
    http: reqwest::blocking::Client,
    credentials: CredentialsBody,
}

impl AuthSession {
    /// Verify the credentials against the `/sign-in` endpoint.
    pub fn sign_in(config: &ClientConfig, username: &str, password: &str) -> Result<Self> {
        let session = Self {
            base_url: config.base_url(),
            http: reqwest::blocking::Client::new(),
            credentials: CredentialsBody {
                username: username.to_string(),
                password: password.to_string(),
            },
        };

        post_json(&session.http, &session.url("sign-in"), &session.credentials)
            .map_err(ClientError::into_authentication)?;

        info!("Successfully signed in with username {}", username);
        Ok(session)
    }

    /// Ask the server to issue a new API token.
    pub fn new_token(&self) -> Result<Token> {
        let value = post_json(&self.http, &self.url("new-token"), &self.credentials)
            .map_err(ClientError::into_authentication)?;
        let payload: TokenPayload = decode_payload(value)?;

        let token = Token {
            expires: parse_expiry(&payload.expires)?,
            token: payload.token,
        };
        info!("Received a new token that expires {}", token.expires);
        Ok(token)
    }

    /// List every token belonging to this account, in server order.
    pub fn all_tokens(&self) -> Result<Vec<Token>> {
        let value = post_json(&self.http, &self.url("my-tokens"), &self.credentials)
            .map_err(ClientError::into_authentication)?;
        let payload: TokenListPayload = decode_payload(value)?;

        let tokens = payload
            .tokens
            .into_iter()
            .map(|t| {
                Ok(Token {
                    expires: parse_expiry(&t.expires)?,
                    token: t.token,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Received {} token(s)", tokens.len());
        Ok(tokens)
    }

    /// Recognized seconds for this account, per mode.
    ///
    /// `period` selects the reporting window and must be `"month"` or
    /// `"all"`; anything else fails before a request is made.
    pub fn usage(&self, period: &str) -> Result<RecognizedSeconds> {
        if period != "month" && period != "all" {
            return Err(ClientError::InvalidArgument(
                "period must be either 'month' or 'all'".to_string(),
            ));
        }

        let body = UsageByUserBody {
            credentials: &self.credentials,
            period,
        };
        let value = post_json(&self.http, &self.url("recognized-seconds-by-user"), &body)
            .map_err(ClientError::into_authentication)?;
        let payload: RecognizedSecondsPayload = decode_payload(value)?;

        info!("Received recognized seconds for period '{}'", period);
        Ok(payload.into())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}
