//! Agent connection probe: open a throwaway room and see whether a worker
//! joins it.

use crate::error::VoiceError;
use crate::platform::PlatformApi;
use dialer_types::ParticipantDescriptor;
use std::time::Duration;
use tracing::{info, warn};

/// How long the probe waits for the agent by default.
pub const DEFAULT_PROBE_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub room_name: String,
    pub participants: Vec<ParticipantDescriptor>,
    /// False if deleting the probe room failed.
    pub cleaned_up: bool,
}

impl ProbeReport {
    pub fn agent_joined(&self) -> bool {
        !self.participants.is_empty()
    }
}

/// Creates `room_name`, waits `wait`, lists participants, deletes the room.
///
/// Deletion is attempted whenever the room was created, even if the
/// participant listing failed.
pub async fn probe_agent_connection(
    platform: &dyn PlatformApi,
    room_name: &str,
    wait: Duration,
) -> Result<ProbeReport, VoiceError> {
    let room = platform.create_room(room_name).await?;
    info!(
        room = %room.name,
        wait_secs = wait.as_secs(),
        "probe room created, waiting for agent"
    );

    tokio::time::sleep(wait).await;

    let listed = platform.list_participants(room_name).await;

    let cleaned_up = match platform.delete_room(room_name).await {
        Ok(()) => {
            info!(room = room_name, "probe room deleted");
            true
        }
        Err(e) => {
            warn!(room = room_name, error = %e, "failed to delete probe room");
            false
        }
    };

    Ok(ProbeReport {
        room_name: room.name,
        participants: listed?,
        cleaned_up,
    })
}
