//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::game_event::GameEvent;

/// Topics for event routing
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Topic {
    /// Dice, movement and turn hand-over
    Turn,
    /// Task selection, delegation and resource changes
    Economy,
    /// Lifecycle: game over, saves, rejected commands
    Session,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning the bus shares its channels.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<GameEvent>,
    economy: broadcast::Sender<GameEvent>,
    session: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turn: broadcast::channel(capacity).0,
            economy: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<GameEvent> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Economy => &self.economy,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(%topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use valley_core::PlayerId;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&Topic::iter().collect::<Vec<_>>());

        bus.publish(GameEvent::SessionSaved { nonce: 3 });
        bus.publish(GameEvent::CategoryClaimed {
            player: PlayerId(0),
            category: valley_core::TaskCategory::Business,
        });

        let session = receivers.get_mut(&Topic::Session).unwrap();
        assert_eq!(session.try_recv().unwrap(), GameEvent::SessionSaved { nonce: 3 });
        assert!(session.try_recv().is_err());

        let economy = receivers.get_mut(&Topic::Economy).unwrap();
        assert!(matches!(
            economy.try_recv().unwrap(),
            GameEvent::CategoryClaimed { .. }
        ));
        assert!(receivers.get_mut(&Topic::Turn).unwrap().try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::with_capacity(0);
        assert_eq!(bus.subscriber_count(Topic::Turn), 0);
        bus.publish(GameEvent::SessionLoaded { nonce: 0 });

        let clone = bus.clone();
        let _rx = clone.subscribe(Topic::Turn);
        assert_eq!(bus.subscriber_count(Topic::Turn), 1);
    }
}
