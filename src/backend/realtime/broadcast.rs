/**
 * Story Room Broadcasting
 *
 * This module manages per-story broadcast channels for real-time event
 * delivery. Each story gets its own channel to prevent cross-talk;
 * channels are created lazily on first use and cleaned up once no
 * subscriber remains.
 *
 * Broadcasting is fire-and-forget: a send with no subscribers is normal
 * and never an error for the caller.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::event::RealtimeEvent;

/// Capacity of each story room channel
const ROOM_CHANNEL_CAPACITY: usize = 100;

/// Per-story broadcast channel registry
///
/// Cloneable and shared through `AppState`; all handlers broadcast into
/// the same registry.
#[derive(Clone, Default)]
pub struct StoryRooms {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<RealtimeEvent>>>>,
}

impl StoryRooms {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get or create the broadcast sender for a story room
    pub fn sender(&self, story_id: Uuid) -> broadcast::Sender<RealtimeEvent> {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(story_id)
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .clone()
    }

    /// Broadcast an event to all subscribers of a story room.
    ///
    /// Returns the number of subscribers that received the event (0 when
    /// the room is empty or was never opened).
    pub fn broadcast(&self, story_id: Uuid, event: RealtimeEvent) -> usize {
        let sender = {
            let channels = self.channels.lock().unwrap();
            channels.get(&story_id).cloned()
        };
        match sender {
            Some(sender) => match sender.send(event) {
                Ok(count) => {
                    tracing::debug!("[Realtime] Event broadcast to {} subscribers of story {}", count, story_id);
                    count
                }
                Err(_) => {
                    // No subscribers, that's okay
                    tracing::debug!("[Realtime] No subscribers in story room {}", story_id);
                    0
                }
            },
            None => 0,
        }
    }

    /// Drop channels whose subscriber count has reached zero
    pub fn cleanup_inactive(&self) {
        self.channels
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    /// Subscriber count for a story room
    pub fn subscriber_count(&self, story_id: Uuid) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(&story_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}
