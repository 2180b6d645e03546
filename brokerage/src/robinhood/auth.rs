use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{
    config::Config,
    error::{Error, Result},
    types::Session,
};

/// Public client id of the Robinhood web app.
const CLIENT_ID: &str = "c82SH0WZOsabOXGP2sxqcj34FxkvfnWRZBKlBjFS";
/// Token lifetime asked for, in seconds.
const EXPIRES_IN: u64 = 86400;

#[derive(Serialize)]
pub struct TokenRequest<'a> {
    client_id: &'static str,
    expires_in: u64,
    grant_type: &'static str,
    scope: &'static str,
    username: &'a str,
    password: &'a str,
    device_token: String,
    challenge_type: &'static str,
    try_passkeys: bool,
    token_request_path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mfa_code: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    pub fn new_password(config: &'a Config) -> Self {
        let device_token = config
            .device_token
            .clone()
            .unwrap_or_else(|| device_token_for(&config.username));
        Self {
            client_id: CLIENT_ID,
            expires_in: EXPIRES_IN,
            grant_type: "password",
            scope: "internal",
            username: &config.username,
            password: &config.password,
            device_token,
            challenge_type: "sms",
            try_passkeys: false,
            token_request_path: "/login",
            mfa_code: config.mfa_code.as_deref(),
        }
    }
}

/// Body of `POST /oauth2/token/`. Which fields are present depends on the outcome.
#[derive(Debug, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub mfa_required: Option<bool>,
    pub verification_workflow: Option<Value>,
    pub detail: Option<String>,
}

impl TokenResponse {
    pub fn into_session(self) -> Result<Session> {
        if let Some(access_token) = self.access_token {
            let token_type = self.token_type.unwrap_or_else(|| "Bearer".to_string());
            return Ok(Session {
                access_token,
                token_type,
            });
        }
        if self.mfa_required == Some(true) {
            return Err(Error::Auth(
                "multi-factor code required, set ROBINHOOD_MFA_CODE".to_string(),
            ));
        }
        if self.verification_workflow.is_some() {
            return Err(Error::Auth(
                "device verification required, approve the login in the Robinhood app and retry"
                    .to_string(),
            ));
        }
        match self.detail {
            Some(detail) => Err(Error::Auth(detail)),
            None => Err(Error::Auth("no access token in response".to_string())),
        }
    }
}

/// Stable per-user device token, so every run presents itself as the same device.
pub fn device_token_for(username: &str) -> String {
    let digest = Sha256::digest(username.as_bytes());
    let hex: String = digest[..16].iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
