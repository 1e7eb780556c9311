//! Shared record types for the dialer workspace.
//!
//! These are thin descriptors sent to or returned by the LiveKit platform:
//! SIP trunks, outbound call requests, rooms and participants. None of them
//! carry behavior beyond construction and display helpers; their lifecycle is
//! owned by the platform.
//!
//! `dialer-voice` converts the platform's protobuf messages into these types
//! so that workflows and tests never touch the wire representation.

pub mod call;
pub mod room;
pub mod trunk;

pub use call::{
    session_room_name, CallMetadata, CallOptions, CallSpec, SipParticipantDescriptor,
};
pub use room::{ParticipantDescriptor, ParticipantKind, ParticipantState, RoomDescriptor};
pub use trunk::{TrunkDescriptor, TrunkSpec};

/// Room name used by the quick-dial call preset.
pub const QUICK_DIAL_ROOM: &str = "outbound-call-room";

/// Room name used by the agent connection probe.
pub const PROBE_ROOM: &str = "test-agent-room";

/// Prefix for per-session call rooms (`call-<unix-timestamp>`).
pub const SESSION_ROOM_PREFIX: &str = "call-";

/// Configuration key under which the provisioned trunk ID is persisted.
pub const TRUNK_ID_KEY: &str = "SIP_OUTBOUND_TRUNK_ID";

/// Identity prefix the voice agent joins rooms with.
pub const AGENT_IDENTITY_PREFIX: &str = "agent-";
