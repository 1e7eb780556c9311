//! Outbound call requests and the participant the platform creates for them.

use crate::{QUICK_DIAL_ROOM, SESSION_ROOM_PREFIX};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Free-form metadata attached to the SIP participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMetadata {
    pub call_type: String,
    pub purpose: String,
}

impl Default for CallMetadata {
    fn default() -> Self {
        Self {
            call_type: "outbound".to_string(),
            purpose: "real_estate".to_string(),
        }
    }
}

impl CallMetadata {
    /// Renders the metadata as the JSON string the platform stores verbatim.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Call-control options. Passed through to the platform without validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Play a ringback tone to the room while the callee's phone rings.
    pub play_ringtone: bool,
    /// Withhold the caller number from the callee.
    pub hide_phone_number: bool,
    /// How long to let the phone ring before giving up.
    pub ringing_timeout: Option<Duration>,
    /// Hard cap on the call length.
    pub max_call_duration: Option<Duration>,
    /// Enable Krisp noise suppression on the SIP leg.
    pub enable_krisp: bool,
}

/// Everything needed to place one outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSpec {
    pub room_name: String,
    /// Destination number (E.164).
    pub call_to: String,
    /// Caller number presented to the callee; must belong to the trunk.
    pub call_from: String,
    pub participant_identity: String,
    pub participant_name: String,
    pub metadata: CallMetadata,
    pub dtmf: String,
    pub options: CallOptions,
    /// Create the room before dialing.
    pub ensure_room: bool,
}

impl CallSpec {
    /// Per-session call: a fresh `call-<unix-timestamp>` room created up front.
    pub fn session(call_from: &str, call_to: &str, unix_timestamp: i64) -> Self {
        Self {
            room_name: session_room_name(unix_timestamp),
            call_to: call_to.to_string(),
            call_from: call_from.to_string(),
            participant_identity: "sip-caller".to_string(),
            participant_name: "SIP Caller".to_string(),
            metadata: CallMetadata::default(),
            dtmf: String::new(),
            options: CallOptions {
                play_ringtone: true,
                hide_phone_number: false,
                ..CallOptions::default()
            },
            ensure_room: true,
        }
    }

    /// Quick dial into the fixed outbound room, with ring and duration limits.
    pub fn quick_dial(call_from: &str, call_to: &str) -> Self {
        Self {
            room_name: QUICK_DIAL_ROOM.to_string(),
            call_to: call_to.to_string(),
            call_from: call_from.to_string(),
            participant_identity: "outbound-caller".to_string(),
            participant_name: "Real Estate Agent".to_string(),
            metadata: CallMetadata::default(),
            dtmf: String::new(),
            options: CallOptions {
                play_ringtone: true,
                hide_phone_number: false,
                ringing_timeout: Some(Duration::from_secs(30)),
                max_call_duration: Some(Duration::from_secs(300)),
                enable_krisp: true,
            },
            ensure_room: false,
        }
    }
}

/// Builds the `call-<unix-timestamp>` room name.
pub fn session_room_name(unix_timestamp: i64) -> String {
    format!("{}{}", SESSION_ROOM_PREFIX, unix_timestamp)
}

/// The SIP call leg the platform bridged into the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipParticipantDescriptor {
    pub participant_id: String,
    pub participant_identity: String,
    pub room_name: String,
    pub sip_call_id: String,
}
