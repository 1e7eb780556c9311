mod common;

use common::{trunk_spec, FakePlatform};
use dialer_voice::{EnvFile, TrunkProvisioner, VoiceError};
use std::fs;

#[tokio::test]
async fn test_creates_trunk_and_persists_id_when_none_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "LIVEKIT_URL=wss://example.livekit.cloud\n").unwrap();
    let env_file = EnvFile::new(&path);

    let platform = FakePlatform::new().creating_trunk("ST_123");
    let provisioned = TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await
        .expect("provisioning should succeed");

    assert!(provisioned.created);
    assert!(provisioned.persisted);
    assert_eq!(provisioned.trunk_id(), "ST_123");
    assert_eq!(platform.called("create_outbound_trunk"), 1);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("SIP_OUTBOUND_TRUNK_ID=ST_123"));
    assert!(contents.starts_with("LIVEKIT_URL=wss://example.livekit.cloud\n"));
}

#[tokio::test]
async fn test_reuses_first_existing_trunk() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = EnvFile::new(dir.path().join(".env"));

    let platform = FakePlatform::new().with_trunk("ST_a").with_trunk("ST_b");
    let provisioned = TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await
        .unwrap();

    assert!(!provisioned.created);
    assert_eq!(provisioned.trunk_id(), "ST_a");
    assert_eq!(platform.called("create_outbound_trunk"), 0);
    assert!(!env_file.path().exists(), "reuse must not write the config file");
}

#[tokio::test]
async fn test_second_run_finds_created_trunk_by_listing() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = EnvFile::new(dir.path().join(".env"));
    let platform = FakePlatform::new().creating_trunk("ST_123");
    let provisioner = TrunkProvisioner::new(&platform, &env_file);

    let first = provisioner.ensure_trunk(&trunk_spec()).await.unwrap();
    let second = provisioner.ensure_trunk(&trunk_spec()).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(second.trunk_id(), "ST_123");
    assert_eq!(platform.called("create_outbound_trunk"), 1);
    assert_eq!(platform.called("list_outbound_trunks"), 2);
    assert_eq!(
        env_file.get("SIP_OUTBOUND_TRUNK_ID").unwrap().as_deref(),
        Some("ST_123")
    );
}

#[tokio::test]
async fn test_listing_failure_falls_through_to_creation() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = EnvFile::new(dir.path().join(".env"));
    let platform = FakePlatform {
        fail_list_trunks: true,
        ..FakePlatform::default()
    }
    .creating_trunk("ST_9");

    let provisioned = TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await
        .unwrap();

    assert!(provisioned.created);
    assert_eq!(provisioned.trunk_id(), "ST_9");
}

#[tokio::test]
async fn test_creation_failure_returns_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = EnvFile::new(dir.path().join(".env"));
    let platform = FakePlatform {
        fail_create_trunk: true,
        ..FakePlatform::default()
    };

    let result = TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await;

    assert!(matches!(result, Err(VoiceError::Sip(_))));
    assert!(!env_file.path().exists());
}

#[tokio::test]
async fn test_unwritable_config_is_reported_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be rewritten as a file.
    let env_file = EnvFile::new(dir.path());
    let platform = FakePlatform::new().creating_trunk("ST_5");

    let provisioned = TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await
        .unwrap();

    assert!(provisioned.created);
    assert!(!provisioned.persisted);
    assert_eq!(provisioned.trunk_id(), "ST_5");
}

#[tokio::test]
async fn test_existing_key_is_rewritten_not_duplicated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "SIP_OUTBOUND_TRUNK_ID=ST_stale\nSIP_USERNAME=acct\n").unwrap();
    let env_file = EnvFile::new(&path);

    let platform = FakePlatform::new().creating_trunk("ST_fresh");
    TrunkProvisioner::new(&platform, &env_file)
        .ensure_trunk(&trunk_spec())
        .await
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "SIP_OUTBOUND_TRUNK_ID=ST_fresh\nSIP_USERNAME=acct\n"
    );
}
