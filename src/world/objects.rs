//! Items and exits

use crate::core::types::{ActorId, ExitId, ItemId, RoomId};
use crate::world::access::AccessRule;

/// Where an item currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Room(RoomId),
    Held(ActorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Holding one confers the combat commands
    Weapon,
    Prop,
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub location: ItemLocation,
    pub get: AccessRule,
    /// Custom refusal shown when `get` is `Never`
    pub get_err_msg: Option<String>,
    /// Who may order this guarded (the "control" permission)
    pub owner: Option<ActorId>,
}

impl Item {
    pub fn is_weapon(&self) -> bool {
        self.kind == ItemKind::Weapon
    }
}

/// A one-way passage between rooms
#[derive(Debug, Clone)]
pub struct Exit {
    pub id: ExitId,
    pub name: String,
    pub from: RoomId,
    pub to: RoomId,
    pub traverse: AccessRule,
    pub owner: Option<ActorId>,
}
