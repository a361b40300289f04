//! World state - rooms, exits, items, actors, and combat bookkeeping
//!
//! All state is in-memory and lives for one process. Defense states and
//! defeat records are deliberately not persisted anywhere.

pub mod access;
pub mod actors;
pub mod events;
pub mod loader;
pub mod objects;
pub mod rooms;

pub use access::AccessRule;
pub use actors::{Actor, GuardTarget, NpcBehavior};
pub use events::{Message, Outbox, Recipient};
pub use objects::{Exit, Item, ItemKind, ItemLocation};
pub use rooms::Room;

use crate::combat::DefenseState;
use crate::core::types::{ActorId, ExitId, ItemId, RoomId};
use ahash::{AHashMap, AHashSet};

/// A named thing found by a location search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thing {
    Actor(ActorId),
    Item(ItemId),
    Exit(ExitId),
}

/// Side effects of relocating an item
#[derive(Debug, Default)]
pub struct MoveEffect {
    /// Holder whose defense state was cleared because this was their
    /// recorded weapon
    pub cleared_defense_of: Option<ActorId>,
}

/// The game world containing all objects and per-actor combat state
pub struct World {
    rooms: AHashMap<RoomId, Room>,
    exits: AHashMap<ExitId, Exit>,
    items: AHashMap<ItemId, Item>,
    actors: AHashMap<ActorId, Actor>,
    /// Transient per-actor defense. Absence means "not defending".
    defense: AHashMap<ActorId, DefenseState>,
    /// victor -> NPCs that victor has defeated
    defeats: AHashMap<ActorId, AHashSet<ActorId>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            rooms: AHashMap::new(),
            exits: AHashMap::new(),
            items: AHashMap::new(),
            actors: AHashMap::new(),
            defense: AHashMap::new(),
            defeats: AHashMap::new(),
        }
    }

    // --- spawning -------------------------------------------------------

    pub fn add_room(&mut self, name: String, description: String) -> RoomId {
        let id = RoomId::new();
        self.rooms.insert(
            id,
            Room {
                id,
                name,
                description,
                exits: Vec::new(),
            },
        );
        id
    }

    pub fn add_exit(&mut self, name: String, from: RoomId, to: RoomId) -> ExitId {
        let id = ExitId::new();
        self.exits.insert(
            id,
            Exit {
                id,
                name,
                from,
                to,
                traverse: AccessRule::Open,
                owner: None,
            },
        );
        if let Some(room) = self.rooms.get_mut(&from) {
            room.exits.push(id);
        }
        id
    }

    pub fn add_item(&mut self, name: String, kind: ItemKind, location: ItemLocation) -> ItemId {
        let id = ItemId::new();
        self.items.insert(
            id,
            Item {
                id,
                name,
                kind,
                location,
                get: AccessRule::Open,
                get_err_msg: None,
                owner: None,
            },
        );
        if let ItemLocation::Held(holder) = location {
            if let Some(actor) = self.actors.get_mut(&holder) {
                actor.inventory.push(id);
            }
        }
        id
    }

    pub fn add_actor(&mut self, name: String, room: RoomId, npc: Option<NpcBehavior>) -> ActorId {
        let id = ActorId::new();
        self.actors.insert(
            id,
            Actor {
                id,
                name,
                room,
                inventory: Vec::new(),
                npc,
            },
        );
        id
    }

    // --- lookups --------------------------------------------------------

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn exit(&self, id: ExitId) -> Option<&Exit> {
        self.exits.get(&id)
    }

    pub fn exit_mut(&mut self, id: ExitId) -> Option<&mut Exit> {
        self.exits.get_mut(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Display name of any searchable thing
    pub fn thing_name(&self, thing: Thing) -> Option<&str> {
        match thing {
            Thing::Actor(id) => self.actors.get(&id).map(|a| a.name.as_str()),
            Thing::Item(id) => self.items.get(&id).map(|i| i.name.as_str()),
            Thing::Exit(id) => self.exits.get(&id).map(|e| e.name.as_str()),
        }
    }

    pub fn actors_in(&self, room: RoomId) -> impl Iterator<Item = &Actor> {
        self.actors.values().filter(move |a| a.room == room)
    }

    pub fn items_in(&self, room: RoomId) -> impl Iterator<Item = &Item> {
        self.items
            .values()
            .filter(move |i| i.location == ItemLocation::Room(room))
    }

    /// Find a player actor by name, case-insensitively
    pub fn find_player(&self, name: &str) -> Option<ActorId> {
        self.actors
            .values()
            .find(|a| a.npc.is_none() && a.name.eq_ignore_ascii_case(name))
            .map(|a| a.id)
    }

    /// Name lookup over an actor's surroundings: co-located actors (the
    /// searcher included), items on the floor, carried items, and exits.
    /// Exact match wins over prefix match; names are case-insensitive.
    pub fn search(&self, from: ActorId, name: &str) -> Option<Thing> {
        let actor = self.actors.get(&from)?;
        let room = actor.room;

        let mut candidates: Vec<(&str, Thing)> = Vec::new();
        for other in self.actors_in(room) {
            candidates.push((other.name.as_str(), Thing::Actor(other.id)));
        }
        for item in self.items_in(room) {
            candidates.push((item.name.as_str(), Thing::Item(item.id)));
        }
        for item_id in &actor.inventory {
            if let Some(item) = self.items.get(item_id) {
                candidates.push((item.name.as_str(), Thing::Item(item.id)));
            }
        }
        if let Some(room) = self.rooms.get(&room) {
            for exit_id in &room.exits {
                if let Some(exit) = self.exits.get(exit_id) {
                    candidates.push((exit.name.as_str(), Thing::Exit(exit.id)));
                }
            }
        }

        let wanted = name.to_ascii_lowercase();
        candidates
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(n, _)| n.to_ascii_lowercase().starts_with(&wanted))
            })
            .map(|(_, thing)| *thing)
    }

    // --- movement -------------------------------------------------------

    /// Relocate an item. This is the single choke point for every item
    /// move: pickup, drop, forced drop, transfer. If the item leaves a
    /// holder whose recorded weapon it is, that holder stops defending.
    pub fn move_item(&mut self, item_id: ItemId, dest: ItemLocation) -> MoveEffect {
        let mut effect = MoveEffect::default();
        let old = match self.items.get(&item_id) {
            Some(item) => item.location,
            None => return effect,
        };

        if let ItemLocation::Held(holder) = old {
            if let Some(actor) = self.actors.get_mut(&holder) {
                actor.inventory.retain(|i| *i != item_id);
            }
            let recorded = self
                .defense
                .get(&holder)
                .map(|d| d.weapon == item_id)
                .unwrap_or(false);
            if recorded {
                self.defense.remove(&holder);
                effect.cleared_defense_of = Some(holder);
                tracing::debug!(?holder, ?item_id, "weapon left holder, defense cleared");
            }
        }

        if let Some(item) = self.items.get_mut(&item_id) {
            item.location = dest;
        }
        if let ItemLocation::Held(holder) = dest {
            if let Some(actor) = self.actors.get_mut(&holder) {
                actor.inventory.push(item_id);
            }
        }
        effect
    }

    pub fn move_actor(&mut self, actor_id: ActorId, to: RoomId) {
        if let Some(actor) = self.actors.get_mut(&actor_id) {
            actor.room = to;
        }
    }

    // --- combat bookkeeping ---------------------------------------------

    pub fn defense(&self, actor: ActorId) -> Option<&DefenseState> {
        self.defense.get(&actor)
    }

    pub fn defense_mut(&mut self, actor: ActorId) -> Option<&mut DefenseState> {
        self.defense.get_mut(&actor)
    }

    pub fn set_defense(&mut self, actor: ActorId, state: DefenseState) {
        self.defense.insert(actor, state);
    }

    pub fn clear_defense(&mut self, actor: ActorId) {
        self.defense.remove(&actor);
    }

    pub fn record_defeat(&mut self, victor: ActorId, npc: ActorId) {
        self.defeats.entry(victor).or_default().insert(npc);
    }

    pub fn has_defeated(&self, victor: ActorId, npc: ActorId) -> bool {
        self.defeats
            .get(&victor)
            .map(|set| set.contains(&npc))
            .unwrap_or(false)
    }

    /// Evaluate a typed access rule for an acting actor
    pub fn access_allows(&self, actor: ActorId, rule: &AccessRule) -> bool {
        match rule {
            AccessRule::Open => true,
            AccessRule::Never => false,
            AccessRule::RequiresDefeatOf(npc) => self.has_defeated(actor, *npc),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
