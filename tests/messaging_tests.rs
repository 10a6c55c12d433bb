/// Topic publishing against an in-process messaging service
mod common;

use common::FakePlatform;
use sentinel_relay::{
    error::RelayError,
    identity::PlayerId,
    messaging::{
        Announcement, CommandEnvelope, Envelope, MessagePublisher, OpenCloudMessagingClient,
        Topic,
    },
};
use serde_json::json;

fn publisher(platform: &FakePlatform) -> OpenCloudMessagingClient {
    let config = platform.config();
    OpenCloudMessagingClient::new(config.open_cloud, config.messaging, &config.http).unwrap()
}

#[tokio::test]
async fn test_command_lands_on_commands_topic() {
    let platform = FakePlatform::start().await;
    let envelope: Envelope = CommandEnvelope::Kick {
        user_id: PlayerId::new(42).unwrap(),
        reason: "Kicked by moderator".to_string(),
        moderator: "mod#0001".to_string(),
    }
    .into();

    publisher(&platform)
        .publish(envelope.topic(), &envelope)
        .await
        .unwrap();

    let state = platform.state.lock().unwrap();
    assert_eq!(state.missing_api_key, 0);
    assert_eq!(
        state.published,
        vec![(
            "SentinelAC_Commands".to_string(),
            json!({
                "command": "kick",
                "userId": 42,
                "reason": "Kicked by moderator",
                "moderator": "mod#0001",
            })
        )]
    );
}

#[tokio::test]
async fn test_announcement_lands_on_announce_topic() {
    let platform = FakePlatform::start().await;
    let envelope: Envelope = Announcement {
        message: "Servers restart in 5 minutes".to_string(),
        moderator: "mod#0001".to_string(),
    }
    .into();

    publisher(&platform)
        .publish(Topic::Announce, &envelope)
        .await
        .unwrap();

    let state = platform.state.lock().unwrap();
    assert_eq!(state.published[0].0, "SentinelAC_Announce");
    assert_eq!(
        state.published[0].1,
        json!({ "message": "Servers restart in 5 minutes", "moderator": "mod#0001" })
    );
}

#[tokio::test]
async fn test_permanent_ban_envelope_carries_minus_one() {
    let platform = FakePlatform::start().await;
    let envelope: Envelope = CommandEnvelope::Ban {
        user_id: PlayerId::new(9).unwrap(),
        reason: "No reason provided".to_string(),
        duration: -1,
        moderator: "mod#0001".to_string(),
    }
    .into();

    publisher(&platform)
        .publish(Topic::Commands, &envelope)
        .await
        .unwrap();

    let state = platform.state.lock().unwrap();
    assert_eq!(state.published[0].1["command"], json!("ban"));
    assert_eq!(state.published[0].1["duration"], json!(-1));
}

#[tokio::test]
async fn test_publish_failure_is_reported() {
    let platform = FakePlatform::start().await;
    platform.state.lock().unwrap().fail_publish = true;

    let envelope: Envelope = CommandEnvelope::Shutdown {
        reason: "Server shutdown by moderator".to_string(),
        moderator: "mod#0001".to_string(),
    }
    .into();

    let err = publisher(&platform)
        .publish(Topic::Commands, &envelope)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::RemoteRejected { status: 503, .. }));

    let state = platform.state.lock().unwrap();
    assert_eq!(state.publish_attempts, 1);
    assert!(state.published.is_empty());
}
