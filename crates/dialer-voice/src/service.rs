use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use crate::platform::PlatformApi;
use async_trait::async_trait;
use dialer_types::{
    CallSpec, ParticipantDescriptor, ParticipantKind, ParticipantState, RoomDescriptor,
    SipParticipantDescriptor, TrunkDescriptor, TrunkSpec,
};
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_api::services::room::{CreateRoomOptions, RoomClient};
use livekit_api::services::sip::{
    CreateSIPOutboundTrunkOptions, CreateSIPParticipantOptions, ListSIPOutboundTrunkFilter,
    SIPClient,
};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub struct VoiceService {
    config: LiveKitConfig,
    room_client: RoomClient,
    sip_client: SIPClient,
}

impl fmt::Debug for VoiceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        let room_client =
            RoomClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        let sip_client = SIPClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        Self {
            config,
            room_client,
            sip_client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.url.is_empty()
    }

    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    /// Mints a room-join token for an agent worker or a test client.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
    ) -> Result<String, VoiceError> {
        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(VoiceError::LiveKit)
    }
}

#[async_trait]
impl PlatformApi for VoiceService {
    async fn list_outbound_trunks(&self) -> Result<Vec<TrunkDescriptor>, VoiceError> {
        let trunks = self
            .sip_client
            .list_sip_outbound_trunk(ListSIPOutboundTrunkFilter::All)
            .await
            .map_err(|e| VoiceError::Sip(e.to_string()))?;

        Ok(trunks
            .into_iter()
            .map(|t| TrunkDescriptor {
                sip_trunk_id: t.sip_trunk_id,
                name: t.name,
                address: t.address,
                numbers: t.numbers,
                auth_username: t.auth_username,
            })
            .collect())
    }

    async fn create_outbound_trunk(
        &self,
        spec: &TrunkSpec,
    ) -> Result<TrunkDescriptor, VoiceError> {
        let options = CreateSIPOutboundTrunkOptions {
            auth_username: spec.auth_username.clone(),
            auth_password: spec.auth_password.clone(),
            ..Default::default()
        };

        let trunk = self
            .sip_client
            .create_sip_outbound_trunk(
                spec.name.clone(),
                spec.address.clone(),
                spec.numbers.clone(),
                options,
            )
            .await
            .map_err(|e| VoiceError::Sip(e.to_string()))?;

        Ok(TrunkDescriptor {
            sip_trunk_id: trunk.sip_trunk_id,
            name: trunk.name,
            address: trunk.address,
            numbers: trunk.numbers,
            auth_username: trunk.auth_username,
        })
    }

    async fn create_room(&self, name: &str) -> Result<RoomDescriptor, VoiceError> {
        let options = CreateRoomOptions::default();

        let room = self
            .room_client
            .create_room(name, options)
            .await
            .map_err(|e| VoiceError::RoomService(e.to_string()))?;

        Ok(room_descriptor(room))
    }

    async fn list_rooms(&self) -> Result<Vec<RoomDescriptor>, VoiceError> {
        let rooms = self
            .room_client
            .list_rooms(Vec::new())
            .await
            .map_err(|e| VoiceError::RoomService(e.to_string()))?;

        Ok(rooms.into_iter().map(room_descriptor).collect())
    }

    async fn delete_room(&self, name: &str) -> Result<(), VoiceError> {
        self.room_client
            .delete_room(name)
            .await
            .map_err(|e| VoiceError::RoomService(e.to_string()))
    }

    async fn list_participants(
        &self,
        room: &str,
    ) -> Result<Vec<ParticipantDescriptor>, VoiceError> {
        let participants = self
            .room_client
            .list_participants(room)
            .await
            .map_err(|e| VoiceError::RoomService(e.to_string()))?;

        Ok(participants
            .into_iter()
            .map(|p| ParticipantDescriptor {
                sid: p.sid,
                identity: p.identity,
                name: p.name,
                state: ParticipantState::from_i32(p.state),
                kind: ParticipantKind::from_i32(p.kind),
                joined_at: p.joined_at,
                track_count: p.tracks.len(),
            })
            .collect())
    }

    async fn create_sip_participant(
        &self,
        trunk_id: &str,
        call: &CallSpec,
    ) -> Result<SipParticipantDescriptor, VoiceError> {
        let options = CreateSIPParticipantOptions {
            participant_identity: call.participant_identity.clone(),
            participant_name: Some(call.participant_name.clone()),
            participant_metadata: Some(call.metadata.to_json()),
            sip_number: Some(call.call_from.clone()),
            dtmf: Some(call.dtmf.clone()),
            play_dialtone: Some(call.options.play_ringtone),
            hide_phone_number: Some(call.options.hide_phone_number),
            ringing_timeout: call.options.ringing_timeout,
            max_call_duration: call.options.max_call_duration,
            enable_krisp: Some(call.options.enable_krisp),
            ..Default::default()
        };

        debug!(
            trunk_id,
            room = %call.room_name,
            identity = %call.participant_identity,
            "requesting SIP participant"
        );

        let participant = self
            .sip_client
            .create_sip_participant(
                trunk_id.to_string(),
                call.call_to.clone(),
                call.room_name.clone(),
                options,
                None,
            )
            .await
            .map_err(|e| VoiceError::Sip(e.to_string()))?;

        Ok(SipParticipantDescriptor {
            participant_id: participant.participant_id,
            participant_identity: participant.participant_identity,
            room_name: participant.room_name,
            sip_call_id: participant.sip_call_id,
        })
    }
}

fn room_descriptor(room: livekit_protocol::Room) -> RoomDescriptor {
    RoomDescriptor {
        sid: room.sid,
        name: room.name,
        num_participants: room.num_participants,
        creation_time: room.creation_time,
        empty_timeout: room.empty_timeout,
    }
}
