//! Read-only views over rooms and participants.
//!
//! Nothing here creates, updates or deletes remote state.

use crate::error::VoiceError;
use crate::platform::PlatformApi;
use dialer_types::{ParticipantDescriptor, RoomDescriptor};
use tracing::info;

/// Room name fragments the deployment's call rooms use.
pub const DEFAULT_ROOM_FILTERS: [&str; 2] = ["real-estate", "outbound-call"];

/// One matching room and the participants in it.
#[derive(Debug, Clone)]
pub struct RoomReport {
    pub room: RoomDescriptor,
    pub participants: Vec<ParticipantDescriptor>,
}

/// Lists rooms whose name contains any of `filters`.
pub async fn monitor(
    platform: &dyn PlatformApi,
    filters: &[String],
) -> Result<Vec<RoomDescriptor>, VoiceError> {
    let rooms = platform.list_rooms().await?;
    let total = rooms.len();
    let matching: Vec<_> = rooms.into_iter().filter(|r| r.matches_any(filters)).collect();
    info!(total, matching = matching.len(), "listed rooms");
    Ok(matching)
}

/// Like [`monitor`], then lists the participants of every matching room.
pub async fn diagnose(
    platform: &dyn PlatformApi,
    filters: &[String],
) -> Result<Vec<RoomReport>, VoiceError> {
    let rooms = monitor(platform, filters).await?;

    let mut reports = Vec::with_capacity(rooms.len());
    for room in rooms {
        let participants = platform.list_participants(&room.name).await?;
        reports.push(RoomReport { room, participants });
    }
    Ok(reports)
}
