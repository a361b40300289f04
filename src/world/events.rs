//! Outbound messages
//!
//! Command execution never prints. It collects messages into an outbox
//! and the caller (the REPL, or a test) decides what a given actor sees.

use crate::core::types::{ActorId, RoomId};

/// Who a message is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Actor(ActorId),
    /// Everyone currently in the room, minus the excluded actors
    Room {
        room: RoomId,
        exclude: Vec<ActorId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub to: Recipient,
    pub text: String,
}

/// Messages produced by one command invocation, in emission order
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_actor(&mut self, actor: ActorId, text: impl Into<String>) {
        self.messages.push(Message {
            to: Recipient::Actor(actor),
            text: text.into(),
        });
    }

    pub fn to_room(&mut self, room: RoomId, exclude: &[ActorId], text: impl Into<String>) {
        self.messages.push(Message {
            to: Recipient::Room {
                room,
                exclude: exclude.to_vec(),
            },
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The message texts an actor standing in `room` would see
    pub fn texts_for(&self, actor: ActorId, room: RoomId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| match &m.to {
                Recipient::Actor(a) => *a == actor,
                Recipient::Room { room: r, exclude } => *r == room && !exclude.contains(&actor),
            })
            .map(|m| m.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_broadcast_respects_exclusion() {
        let room = RoomId::new();
        let speaker = ActorId::new();
        let bystander = ActorId::new();

        let mut outbox = Outbox::new();
        outbox.to_actor(speaker, "You shout.");
        outbox.to_room(room, &[speaker], "Someone shouts.");

        assert_eq!(outbox.texts_for(speaker, room), vec!["You shout."]);
        assert_eq!(outbox.texts_for(bystander, room), vec!["Someone shouts."]);
    }

    #[test]
    fn test_other_rooms_hear_nothing() {
        let room = RoomId::new();
        let elsewhere = RoomId::new();
        let listener = ActorId::new();

        let mut outbox = Outbox::new();
        outbox.to_room(room, &[], "A gong sounds.");

        assert!(outbox.texts_for(listener, elsewhere).is_empty());
    }
}
