//! LiveKit plumbing for the outbound dialer.
//!
//! Wraps the LiveKit room and SIP services behind [`PlatformApi`] and builds
//! the operator workflows on top of it: trunk provisioning, call origination,
//! room diagnostics and the agent connection probe. Also holds the voice
//! agent bootstrap, which drives a runtime-provided assistant through the
//! [`agent::JobContext`] and [`agent::VoiceAssistant`] seams, and the runner
//! that launches the external agent host.
//!
//! SIP signaling, media transport and the speech pipeline belong to the
//! platform; nothing here reimplements them.

pub mod agent;
pub mod config;
pub mod diagnostics;
pub mod dial;
pub mod env_file;
pub mod error;
pub mod platform;
pub mod probe;
pub mod provision;
pub mod runner;
pub mod service;

pub use agent::{AgentSession, AssistantBuilder, AssistantSettings, JobContext, VoiceAssistant};
pub use config::{LiveKitConfig, SipProviderConfig};
pub use dial::CallOriginator;
pub use env_file::EnvFile;
pub use error::VoiceError;
pub use platform::PlatformApi;
pub use provision::{Provisioned, TrunkProvisioner};
pub use runner::AgentRunner;
pub use service::VoiceService;
