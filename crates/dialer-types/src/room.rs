//! Room and participant records, read-only views of platform state.

use serde::{Deserialize, Serialize};

/// A room as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub sid: String,
    pub name: String,
    pub num_participants: u32,
    /// Unix seconds.
    pub creation_time: i64,
    /// Seconds an empty room is kept alive.
    pub empty_timeout: u32,
}

impl RoomDescriptor {
    /// Returns true if the room name contains any of the given fragments.
    pub fn matches_any(&self, filters: &[String]) -> bool {
        filters
            .iter()
            .any(|f| !f.is_empty() && self.name.contains(f.as_str()))
    }
}

/// Participant connection state codes as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantState {
    Joining,
    Joined,
    Active,
    Disconnected,
    Unknown,
}

impl ParticipantState {
    /// Maps the wire enum value. Unrecognized values map to `Unknown`.
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => Self::Joining,
            1 => Self::Joined,
            2 => Self::Active,
            3 => Self::Disconnected,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Joining => "JOINING",
            Self::Joined => "JOINED",
            Self::Active => "ACTIVE",
            Self::Disconnected => "DISCONNECTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// What kind of client a participant is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    Standard,
    Ingress,
    Egress,
    Sip,
    Agent,
    Unknown,
}

impl ParticipantKind {
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => Self::Standard,
            1 => Self::Ingress,
            2 => Self::Egress,
            3 => Self::Sip,
            4 => Self::Agent,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Ingress => "INGRESS",
            Self::Egress => "EGRESS",
            Self::Sip => "SIP",
            Self::Agent => "AGENT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// A participant currently in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDescriptor {
    pub sid: String,
    pub identity: String,
    pub name: String,
    pub state: ParticipantState,
    pub kind: ParticipantKind,
    /// Unix seconds.
    pub joined_at: i64,
    pub track_count: usize,
}
