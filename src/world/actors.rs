//! Actors: players and NPCs

use crate::core::types::{ActorId, ExitId, ItemId, RoomId};

/// What an NPC has been told to guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardTarget {
    Item(ItemId),
    Exit(ExitId),
}

/// NPC-only behavior. Its presence IS the defeat capability: a defeated
/// NPC taunts and stamps a victory record instead of dropping its weapon.
#[derive(Debug, Clone)]
pub struct NpcBehavior {
    /// The only actor whose orders this NPC accepts
    pub controller: ActorId,
    /// Line announced when defeated
    pub defeat_cry: Option<String>,
    /// Set once the NPC has rewritten something's access rule
    pub guarding: Option<GuardTarget>,
}

impl NpcBehavior {
    pub fn new(controller: ActorId) -> Self {
        Self {
            controller,
            defeat_cry: None,
            guarding: None,
        }
    }
}

/// A player or NPC present in the world
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub room: RoomId,
    /// Carried items in acquisition order
    pub inventory: Vec<ItemId>,
    pub npc: Option<NpcBehavior>,
}

impl Actor {
    pub fn is_npc(&self) -> bool {
        self.npc.is_some()
    }
}
