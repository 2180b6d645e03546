use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "ROBINHOOD_";
const DEFAULT_API_BASE: &str = "https://api.robinhood.com";
const MISSING_CREDENTIALS: &str =
    "Please set ROBINHOOD_USERNAME and ROBINHOOD_PASSWORD in .env file";

/// Account credentials and endpoint settings, read once at startup.
#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// One-time code sent along with the login when the account has MFA enabled.
    pub mfa_code: Option<String>,
    pub device_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Config {
    /// Loads `.env` (if any) and then reads the `ROBINHOOD_*` variables of the process.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env loaded: {e}");
        }
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validated()
    }

    /// Same as [`Config::from_env`] but over an explicit list of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(Error::Config(MISSING_CREDENTIALS.to_string()));
        }
        self.mfa_code = self.mfa_code.filter(|code| !code.is_empty());
        self.device_token = self.device_token.filter(|token| !token.is_empty());
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"***")
            .field("mfa_code", &self.mfa_code.as_ref().map(|_| "***"))
            .field("device_token", &self.device_token)
            .field("api_base", &self.api_base)
            .finish()
    }
}
