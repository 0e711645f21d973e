/**
 * Presence Tracking
 *
 * This module tracks which users are actively viewing each story. Joining
 * is idempotent: a reconnecting user replaces their previous entry rather
 * than appearing twice. Every join and leave broadcasts the updated
 * roster to the story room.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user currently viewing a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveUser {
    pub user_id: Uuid,
    pub username: String,
}

/// In-memory registry of active users per story
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    rooms: Arc<Mutex<HashMap<Uuid, Vec<ActiveUser>>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a user to a story's roster and return the updated roster.
    ///
    /// Idempotent: a user already present is replaced, not duplicated.
    pub fn join(&self, story_id: Uuid, user: ActiveUser) -> Vec<ActiveUser> {
        let mut rooms = self.rooms.lock().unwrap();
        let roster = rooms.entry(story_id).or_default();
        match roster.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => *existing = user,
            None => roster.push(user),
        }
        roster.clone()
    }

    /// Remove a user from a story's roster and return the updated roster.
    ///
    /// Empty rosters are dropped from the registry.
    pub fn leave(&self, story_id: Uuid, user_id: Uuid) -> Vec<ActiveUser> {
        let mut rooms = self.rooms.lock().unwrap();
        let Some(roster) = rooms.get_mut(&story_id) else {
            return Vec::new();
        };
        roster.retain(|u| u.user_id != user_id);
        if roster.is_empty() {
            rooms.remove(&story_id);
            Vec::new()
        } else {
            roster.clone()
        }
    }

    /// Current roster for a story
    pub fn roster(&self, story_id: Uuid) -> Vec<ActiveUser> {
        self.rooms
            .lock()
            .unwrap()
            .get(&story_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> ActiveUser {
        ActiveUser {
            user_id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    #[test]
    fn test_join_and_roster() {
        let presence = PresenceRegistry::new();
        let story = Uuid::new_v4();

        let roster = presence.join(story, user("alice"));
        assert_eq!(roster.len(), 1);

        presence.join(story, user("bob"));
        assert_eq!(presence.roster(story).len(), 2);
    }

    #[test]
    fn test_join_is_idempotent_per_user() {
        let presence = PresenceRegistry::new();
        let story = Uuid::new_v4();
        let alice = user("alice");

        presence.join(story, alice.clone());
        let roster = presence.join(story, alice.clone());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0], alice);
    }

    #[test]
    fn test_leave_removes_exactly_that_user() {
        let presence = PresenceRegistry::new();
        let story = Uuid::new_v4();
        let alice = user("alice");
        let bob = user("bob");

        presence.join(story, alice.clone());
        presence.join(story, bob.clone());

        let roster = presence.leave(story, alice.user_id);
        assert_eq!(roster, vec![bob]);
    }

    #[test]
    fn test_leave_unknown_story_is_empty() {
        let presence = PresenceRegistry::new();
        assert!(presence.leave(Uuid::new_v4(), Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_stories_are_isolated() {
        let presence = PresenceRegistry::new();
        let story_a = Uuid::new_v4();
        let story_b = Uuid::new_v4();

        presence.join(story_a, user("alice"));
        assert!(presence.roster(story_b).is_empty());
    }
}
