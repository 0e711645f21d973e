//! Story room broadcasting tests
//!
//! These run entirely in memory: room isolation, multi-subscriber
//! delivery, and presence roster broadcasts.

use uuid::Uuid;

use storyloom::backend::realtime::broadcast::StoryRooms;
use storyloom::backend::realtime::presence::{ActiveUser, PresenceRegistry};
use storyloom::shared::event::{EventType, RealtimeEvent};

#[tokio::test]
async fn test_all_room_subscribers_receive_events() {
    let rooms = StoryRooms::new();
    let story_id = Uuid::new_v4();

    let mut rx1 = rooms.sender(story_id).subscribe();
    let mut rx2 = rooms.sender(story_id).subscribe();
    let mut rx3 = rooms.sender(story_id).subscribe();

    let count = rooms.broadcast(
        story_id,
        RealtimeEvent::contribution_added(serde_json::json!({"position": 4})),
    );
    assert_eq!(count, 3);

    for rx in [&mut rx1, &mut rx2, &mut rx3] {
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::ContributionAdded);
        assert_eq!(event.payload["position"], 4);
    }
}

#[tokio::test]
async fn test_events_carry_sse_names() {
    let rooms = StoryRooms::new();
    let story_id = Uuid::new_v4();
    let mut rx = rooms.sender(story_id).subscribe();

    rooms.broadcast(story_id, RealtimeEvent::vote_added(serde_json::json!({})));

    let event = rx.recv().await.unwrap();
    assert_eq!(event.sse_event_name(), "vote-added");
}

#[tokio::test]
async fn test_presence_roster_roundtrip_through_room() {
    let rooms = StoryRooms::new();
    let presence = PresenceRegistry::new();
    let story_id = Uuid::new_v4();

    let mut rx = rooms.sender(story_id).subscribe();

    let alice = ActiveUser {
        user_id: Uuid::new_v4(),
        username: "alice".to_string(),
    };
    let roster = presence.join(story_id, alice.clone());
    rooms.broadcast(story_id, RealtimeEvent::active_users(serde_json::json!(roster)));

    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, EventType::ActiveUsers);
    let roster: Vec<ActiveUser> = serde_json::from_value(event.payload).unwrap();
    assert_eq!(roster, vec![alice]);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_block_broadcast() {
    let rooms = StoryRooms::new();
    let story_id = Uuid::new_v4();

    // Subscriber that never reads
    let _idle = rooms.sender(story_id).subscribe();

    for i in 0..10 {
        let count = rooms.broadcast(
            story_id,
            RealtimeEvent::comment_added(serde_json::json!({"n": i})),
        );
        assert_eq!(count, 1);
    }
}
