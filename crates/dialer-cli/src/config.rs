//! Operator configuration loaded from the `.env` file and the environment.

use dialer_types::{TrunkSpec, TRUNK_ID_KEY};
use dialer_voice::diagnostics::DEFAULT_ROOM_FILTERS;
use dialer_voice::runner::DEFAULT_AGENT_COMMAND;
use dialer_voice::{EnvFile, LiveKitConfig, SipProviderConfig, VoiceError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Keys every command needs before it can talk to the platform.
pub const REQUIRED_KEYS: [&str; 3] = ["LIVEKIT_URL", "LIVEKIT_API_KEY", "LIVEKIT_API_SECRET"];

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// File that was read, and that provisioning writes back to.
    pub env_file: PathBuf,

    pub livekit: LiveKitConfig,

    pub sip: SipProviderConfig,

    /// Trunk ID persisted by an earlier provisioning run.
    pub trunk_id: Option<String>,

    pub call: CallConfig,

    /// Room name fragments the diagnostics look for.
    pub room_filters: Vec<String>,

    /// Command line of the agent host, without the mode argument.
    pub agent_command: String,

    pub logging: LoggingConfig,
}

/// Phone numbers for the deployment.
#[derive(Debug, Clone)]
pub struct CallConfig {
    /// Number calls are placed from; must belong to the trunk.
    pub from_number: String,
    pub to_number: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "dialer_voice=debug,info").
    pub level: String,

    /// Whether to output logs in JSON format.
    pub json: bool,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            from_number: "+13082514678".to_string(),
            to_number: "+923024491162".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Names of required keys that are unset or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = [
            &self.livekit.url,
            &self.livekit.api_key,
            &self.livekit.api_secret,
        ];
        REQUIRED_KEYS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    /// The trunk to create when the platform has none.
    pub fn trunk_spec(&self) -> TrunkSpec {
        TrunkSpec {
            name: self.sip.trunk_name.clone(),
            address: self.sip.address.clone(),
            numbers: vec![self.call.from_number.clone()],
            auth_username: self.sip.username.clone(),
            auth_password: self.sip.password.clone(),
        }
    }

    pub fn env_file(&self) -> EnvFile {
        EnvFile::new(&self.env_file)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the config file.
    #[error("failed to load config file: {0}")]
    File(#[from] VoiceError),
}

/// Loads configuration from `path`, with process environment taking
/// precedence over the file. A missing file is not an error.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let file_values = EnvFile::new(path).load()?;
    Ok(resolve(path, &file_values, |key| std::env::var(key).ok()))
}

/// Builds a `Config` from file values and an environment lookup.
pub fn resolve(
    path: &Path,
    file_values: &HashMap<String, String>,
    env: impl Fn(&str) -> Option<String>,
) -> Config {
    let get = |key: &str| env(key).or_else(|| file_values.get(key).cloned());
    let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    let mut livekit = LiveKitConfig::new(
        get("LIVEKIT_URL").unwrap_or_default(),
        get("LIVEKIT_API_KEY").unwrap_or_default(),
        get("LIVEKIT_API_SECRET").unwrap_or_default(),
    );
    if let Some(ttl) = get("LIVEKIT_TOKEN_TTL_SECONDS").and_then(|v| v.parse().ok()) {
        livekit.token_ttl_seconds = ttl;
    }

    let mut sip = SipProviderConfig::default();
    if let Some(name) = non_empty("SIP_TRUNK_NAME") {
        sip.trunk_name = name;
    }
    if let Some(address) = non_empty("SIP_PROVIDER_ADDRESS") {
        sip.address = address;
    }
    if let Some(username) = get("SIP_USERNAME") {
        sip.username = username;
    }
    if let Some(password) = get("SIP_PASSWORD") {
        sip.password = password;
    }

    let mut call = CallConfig::default();
    if let Some(from) = non_empty("CALL_FROM_NUMBER") {
        call.from_number = from;
    }
    if let Some(to) = non_empty("CALL_TO_NUMBER") {
        call.to_number = to;
    }

    let room_filters = match non_empty("ROOM_FILTERS") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
        None => DEFAULT_ROOM_FILTERS.iter().map(|f| f.to_string()).collect(),
    };

    let mut logging = LoggingConfig::default();
    if let Some(level) = non_empty("DIALER_LOG_LEVEL") {
        logging.level = level;
    }
    if let Some(json) = get("DIALER_LOG_JSON") {
        logging.json = json == "true" || json == "1";
    }

    Config {
        env_file: path.to_path_buf(),
        livekit,
        sip,
        trunk_id: non_empty(TRUNK_ID_KEY),
        call,
        room_filters,
        agent_command: non_empty("AGENT_COMMAND")
            .unwrap_or_else(|| DEFAULT_AGENT_COMMAND.to_string()),
        logging,
    }
}
