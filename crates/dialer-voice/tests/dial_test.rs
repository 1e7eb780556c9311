mod common;

use common::FakePlatform;
use dialer_types::CallSpec;
use dialer_voice::{CallOriginator, VoiceError};

const FROM: &str = "+13082514678";
const TO: &str = "+923024491162";

#[tokio::test]
async fn test_missing_trunk_short_circuits() {
    let platform = FakePlatform::new();
    let call = CallSpec::session(FROM, TO, 1_700_000_000);

    let result = CallOriginator::new(&platform).dial(None, &call).await;

    assert!(matches!(result, Err(VoiceError::MissingTrunk)));
    assert!(platform.calls().is_empty(), "no remote call may be issued");
}

#[tokio::test]
async fn test_blank_trunk_short_circuits() {
    let platform = FakePlatform::new();
    let call = CallSpec::quick_dial(FROM, TO);

    let result = CallOriginator::new(&platform).dial(Some("  "), &call).await;

    assert!(matches!(result, Err(VoiceError::MissingTrunk)));
    assert_eq!(platform.called("create_sip_participant"), 0);
}

#[tokio::test]
async fn test_session_call_creates_room_before_dialing() {
    let platform = FakePlatform::new();
    let call = CallSpec::session(FROM, TO, 1_700_000_000);

    let participant = CallOriginator::new(&platform)
        .dial(Some("ST_123"), &call)
        .await
        .unwrap();

    assert_eq!(platform.calls(), vec!["create_room", "create_sip_participant"]);
    assert_eq!(participant.room_name, "call-1700000000");
    assert_eq!(participant.participant_identity, "sip-caller");
}

#[tokio::test]
async fn test_room_creation_failure_does_not_stop_call() {
    let platform = FakePlatform {
        fail_create_room: true,
        ..FakePlatform::default()
    };
    let call = CallSpec::session(FROM, TO, 1_700_000_000);

    let result = CallOriginator::new(&platform).dial(Some("ST_123"), &call).await;

    assert!(result.is_ok());
    assert_eq!(platform.called("create_sip_participant"), 1);
}

#[tokio::test]
async fn test_quick_dial_skips_room_creation() {
    let platform = FakePlatform::new();
    let call = CallSpec::quick_dial(FROM, TO);

    let participant = CallOriginator::new(&platform)
        .dial(Some("ST_123"), &call)
        .await
        .unwrap();

    assert_eq!(platform.calls(), vec!["create_sip_participant"]);
    assert_eq!(participant.room_name, "outbound-call-room");
}

#[tokio::test]
async fn test_participant_failure_is_returned() {
    let platform = FakePlatform {
        fail_sip: true,
        ..FakePlatform::default()
    };
    let call = CallSpec::quick_dial(FROM, TO);

    let result = CallOriginator::new(&platform).dial(Some("ST_123"), &call).await;

    assert!(matches!(result, Err(VoiceError::Sip(_))));
}
