use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Room service error: {0}")]
    RoomService(String),

    #[error("SIP service error: {0}")]
    Sip(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    EnvFile(#[from] std::io::Error),

    #[error("No SIP outbound trunk configured; run setup-trunk first")]
    MissingTrunk,

    #[error("Agent error: {0}")]
    Agent(String),
}
