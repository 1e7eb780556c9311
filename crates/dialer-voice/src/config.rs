use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder written into fresh `.env` templates for the SIP username.
pub const PLACEHOLDER_SIP_USERNAME: &str = "your_sip_username";
/// Placeholder written into fresh `.env` templates for the SIP password.
pub const PLACEHOLDER_SIP_PASSWORD: &str = "your_sip_password";

fn default_token_ttl_seconds() -> u64 {
    3600
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    pub url: String,
    pub api_key: String,
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for LiveKit join tokens. Default: 3600 (1 hour).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

/// SIP provider settings used when a trunk has to be created.
#[derive(Clone, Serialize, Deserialize)]
pub struct SipProviderConfig {
    /// Name given to newly created trunks.
    pub trunk_name: String,
    /// Provider signaling address, e.g. `sip.telnyx.com`.
    pub address: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Default for SipProviderConfig {
    fn default() -> Self {
        Self {
            trunk_name: "Real Estate Outbound Trunk".to_string(),
            address: "sip.telnyx.com".to_string(),
            username: PLACEHOLDER_SIP_USERNAME.to_string(),
            password: PLACEHOLDER_SIP_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for SipProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipProviderConfig")
            .field("trunk_name", &self.trunk_name)
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SipProviderConfig {
    /// Returns the names of credential keys that are unset or still hold the
    /// template placeholder.
    pub fn placeholder_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.trim().is_empty() || self.username == PLACEHOLDER_SIP_USERNAME {
            missing.push("SIP_USERNAME");
        }
        if self.password.trim().is_empty() || self.password == PLACEHOLDER_SIP_PASSWORD {
            missing.push("SIP_PASSWORD");
        }
        missing
    }
}
