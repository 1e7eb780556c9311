use crate::error::VoiceError;
use async_trait::async_trait;
use dialer_types::{
    CallSpec, ParticipantDescriptor, RoomDescriptor, SipParticipantDescriptor, TrunkDescriptor,
    TrunkSpec,
};

/// The remote operations the dialer workflows consume.
///
/// `VoiceService` implements this against a LiveKit server. Workflows take
/// `&dyn PlatformApi` so they can be driven by an in-memory fake in tests.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn list_outbound_trunks(&self) -> Result<Vec<TrunkDescriptor>, VoiceError>;

    async fn create_outbound_trunk(&self, spec: &TrunkSpec)
        -> Result<TrunkDescriptor, VoiceError>;

    async fn create_room(&self, name: &str) -> Result<RoomDescriptor, VoiceError>;

    async fn list_rooms(&self) -> Result<Vec<RoomDescriptor>, VoiceError>;

    async fn delete_room(&self, name: &str) -> Result<(), VoiceError>;

    async fn list_participants(&self, room: &str)
        -> Result<Vec<ParticipantDescriptor>, VoiceError>;

    /// Dials `call.call_to` through the trunk and bridges the leg into the room.
    async fn create_sip_participant(
        &self,
        trunk_id: &str,
        call: &CallSpec,
    ) -> Result<SipParticipantDescriptor, VoiceError>;
}
