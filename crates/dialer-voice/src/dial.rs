//! Outbound call origination.

use crate::error::VoiceError;
use crate::platform::PlatformApi;
use dialer_types::{CallSpec, SipParticipantDescriptor};
use tracing::{error, info, warn};

pub struct CallOriginator<'a> {
    platform: &'a dyn PlatformApi,
}

impl<'a> CallOriginator<'a> {
    pub fn new(platform: &'a dyn PlatformApi) -> Self {
        Self { platform }
    }

    /// Places the call described by `call` through `trunk_id`.
    ///
    /// A missing or blank trunk ID fails before any remote call is made.
    /// When `call.ensure_room` is set the room is created first; a failure
    /// there is only a warning since the room may already exist.
    pub async fn dial(
        &self,
        trunk_id: Option<&str>,
        call: &CallSpec,
    ) -> Result<SipParticipantDescriptor, VoiceError> {
        let trunk_id = match trunk_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(VoiceError::MissingTrunk),
        };

        if call.ensure_room {
            match self.platform.create_room(&call.room_name).await {
                Ok(room) => info!(room = %room.name, "room created"),
                Err(e) => warn!(
                    room = %call.room_name,
                    error = %e,
                    "room creation failed, it may already exist"
                ),
            }
        }

        info!(
            from = %call.call_from,
            to = %call.call_to,
            room = %call.room_name,
            "initiating outbound call"
        );

        let participant = self
            .platform
            .create_sip_participant(trunk_id, call)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to create SIP participant");
                e
            })?;

        info!(
            participant_id = %participant.participant_id,
            sip_call_id = %participant.sip_call_id,
            room = %participant.room_name,
            "call initiated"
        );
        Ok(participant)
    }
}
