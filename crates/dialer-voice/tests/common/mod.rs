#![allow(dead_code)]

use async_trait::async_trait;
use dialer_types::{
    CallSpec, ParticipantDescriptor, ParticipantKind, ParticipantState, RoomDescriptor,
    SipParticipantDescriptor, TrunkDescriptor, TrunkSpec,
};
use dialer_voice::{PlatformApi, VoiceError};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the LiveKit server that records every call.
#[derive(Default)]
pub struct FakePlatform {
    pub trunks: Mutex<Vec<TrunkDescriptor>>,
    pub rooms: Mutex<Vec<RoomDescriptor>>,
    pub participants: Mutex<HashMap<String, Vec<ParticipantDescriptor>>>,
    pub calls: Mutex<Vec<String>>,
    pub next_trunk_id: Mutex<Option<String>>,
    pub fail_list_trunks: bool,
    pub fail_create_trunk: bool,
    pub fail_create_room: bool,
    pub fail_list_participants: bool,
    pub fail_sip: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trunk(self, id: &str) -> Self {
        self.trunks.lock().unwrap().push(trunk(id));
        self
    }

    pub fn with_room(self, name: &str, participants: Vec<ParticipantDescriptor>) -> Self {
        self.rooms.lock().unwrap().push(room(name, participants.len() as u32));
        self.participants
            .lock()
            .unwrap()
            .insert(name.to_string(), participants);
        self
    }

    pub fn creating_trunk(self, id: &str) -> Self {
        *self.next_trunk_id.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == op).count()
    }

    fn record(&self, op: &str) {
        self.calls.lock().unwrap().push(op.to_string());
    }
}

pub fn trunk(id: &str) -> TrunkDescriptor {
    TrunkDescriptor {
        sip_trunk_id: id.to_string(),
        name: "Real Estate Outbound Trunk".to_string(),
        address: "sip.telnyx.com".to_string(),
        numbers: vec!["+13082514678".to_string()],
        auth_username: "acct".to_string(),
    }
}

pub fn room(name: &str, num_participants: u32) -> RoomDescriptor {
    RoomDescriptor {
        sid: format!("RM_{}", name),
        name: name.to_string(),
        num_participants,
        creation_time: 1_700_000_000,
        empty_timeout: 300,
    }
}

pub fn participant(identity: &str, kind: ParticipantKind) -> ParticipantDescriptor {
    ParticipantDescriptor {
        sid: format!("PA_{}", identity),
        identity: identity.to_string(),
        name: identity.to_string(),
        state: ParticipantState::Active,
        kind,
        joined_at: 1_700_000_010,
        track_count: 1,
    }
}

pub fn trunk_spec() -> TrunkSpec {
    TrunkSpec {
        name: "Real Estate Outbound Trunk".to_string(),
        address: "sip.telnyx.com".to_string(),
        numbers: vec!["+13082514678".to_string()],
        auth_username: "acct".to_string(),
        auth_password: "secret".to_string(),
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn list_outbound_trunks(&self) -> Result<Vec<TrunkDescriptor>, VoiceError> {
        self.record("list_outbound_trunks");
        if self.fail_list_trunks {
            return Err(VoiceError::Sip("twirp error unavailable".into()));
        }
        Ok(self.trunks.lock().unwrap().clone())
    }

    async fn create_outbound_trunk(
        &self,
        spec: &TrunkSpec,
    ) -> Result<TrunkDescriptor, VoiceError> {
        self.record("create_outbound_trunk");
        if self.fail_create_trunk {
            return Err(VoiceError::Sip("twirp error permission_denied".into()));
        }
        let id = self
            .next_trunk_id
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "ST_generated".to_string());
        let created = TrunkDescriptor {
            sip_trunk_id: id,
            name: spec.name.clone(),
            address: spec.address.clone(),
            numbers: spec.numbers.clone(),
            auth_username: spec.auth_username.clone(),
        };
        self.trunks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn create_room(&self, name: &str) -> Result<RoomDescriptor, VoiceError> {
        self.record("create_room");
        if self.fail_create_room {
            return Err(VoiceError::RoomService("room already exists".into()));
        }
        let created = room(name, 0);
        self.rooms.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_rooms(&self) -> Result<Vec<RoomDescriptor>, VoiceError> {
        self.record("list_rooms");
        Ok(self.rooms.lock().unwrap().clone())
    }

    async fn delete_room(&self, name: &str) -> Result<(), VoiceError> {
        self.record("delete_room");
        self.rooms.lock().unwrap().retain(|r| r.name != name);
        Ok(())
    }

    async fn list_participants(
        &self,
        room: &str,
    ) -> Result<Vec<ParticipantDescriptor>, VoiceError> {
        self.record("list_participants");
        if self.fail_list_participants {
            return Err(VoiceError::RoomService("requested room does not exist".into()));
        }
        Ok(self
            .participants
            .lock()
            .unwrap()
            .get(room)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_sip_participant(
        &self,
        trunk_id: &str,
        call: &CallSpec,
    ) -> Result<SipParticipantDescriptor, VoiceError> {
        self.record("create_sip_participant");
        if self.fail_sip {
            return Err(VoiceError::Sip("twirp error resource_exhausted".into()));
        }
        Ok(SipParticipantDescriptor {
            participant_id: format!("PA_{}", trunk_id),
            participant_identity: call.participant_identity.clone(),
            room_name: call.room_name.clone(),
            sip_call_id: "SCL_1".to_string(),
        })
    }
}

/// Operations that change remote state.
pub const MUTATING_CALLS: [&str; 4] = [
    "create_outbound_trunk",
    "create_room",
    "delete_room",
    "create_sip_participant",
];
