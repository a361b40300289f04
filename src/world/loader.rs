//! Load a world scenario from TOML
//!
//! Scenario files name things by string; loading resolves every name to
//! an id and rejects dangling references up front, so the running game
//! never has to handle them.

use crate::combat::{DefenseState, Stance};
use crate::core::error::{ArenaError, Result};
use crate::core::types::{ActorId, ItemId, RoomId};
use crate::world::{AccessRule, ItemKind, ItemLocation, NpcBehavior, World};
use ahash::AHashMap;
use serde::Deserialize;

/// The built-in demo scenario
pub const DEFAULT_WORLD: &str = include_str!("../../data/arena.toml");

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    rooms: Vec<RoomDef>,
    #[serde(default)]
    exits: Vec<ExitDef>,
    #[serde(default)]
    items: Vec<ItemDef>,
    #[serde(default)]
    actors: Vec<ActorDef>,
}

#[derive(Debug, Deserialize)]
struct RoomDef {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ExitDef {
    name: String,
    from: String,
    to: String,
    owner: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ItemKindDef {
    Weapon,
    Prop,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum GetRuleDef {
    #[default]
    Open,
    Never,
}

#[derive(Debug, Deserialize)]
struct ItemDef {
    name: String,
    kind: ItemKindDef,
    /// Exactly one of `room` / `holder` locates the item
    room: Option<String>,
    holder: Option<String>,
    #[serde(default)]
    get: GetRuleDef,
    get_err_msg: Option<String>,
    owner: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ActorKindDef {
    Player,
    Npc,
}

#[derive(Debug, Deserialize)]
struct ActorDef {
    name: String,
    kind: ActorKindDef,
    room: String,
    controller: Option<String>,
    #[serde(default)]
    defend: Vec<String>,
    /// Name of the held item the defense is bound to
    weapon: Option<String>,
    defeat_cry: Option<String>,
}

/// Parse a scenario and build the world it describes
pub fn load_world(text: &str) -> Result<World> {
    let scenario: ScenarioFile = toml::from_str(text)?;
    let mut world = World::new();

    let mut room_ids: AHashMap<String, RoomId> = AHashMap::new();
    for def in &scenario.rooms {
        let id = world.add_room(def.name.clone(), def.description.clone());
        room_ids.insert(def.id.clone(), id);
    }
    let room_id = |name: &str| -> Result<RoomId> {
        room_ids
            .get(name)
            .copied()
            .ok_or_else(|| ArenaError::UnknownRoom(name.to_string()))
    };

    let mut actor_ids: AHashMap<String, ActorId> = AHashMap::new();
    for def in &scenario.actors {
        let room = room_id(&def.room)?;
        let id = world.add_actor(def.name.clone(), room, None);
        actor_ids.insert(def.name.clone(), id);
    }
    let actor_id = |name: &str| -> Result<ActorId> {
        actor_ids
            .get(name)
            .copied()
            .ok_or_else(|| ArenaError::UnknownActor(name.to_string()))
    };

    for def in &scenario.exits {
        let from = room_id(&def.from)?;
        let to = room_id(&def.to)?;
        let id = world.add_exit(def.name.clone(), from, to);
        if let Some(owner) = &def.owner {
            let owner = actor_id(owner)?;
            if let Some(exit) = world.exit_mut(id) {
                exit.owner = Some(owner);
            }
        }
    }

    for def in &scenario.items {
        let location = match (&def.room, &def.holder) {
            (Some(room), None) => ItemLocation::Room(room_id(room)?),
            (None, Some(holder)) => ItemLocation::Held(actor_id(holder)?),
            _ => return Err(ArenaError::AmbiguousItemLocation(def.name.clone())),
        };
        let kind = match def.kind {
            ItemKindDef::Weapon => ItemKind::Weapon,
            ItemKindDef::Prop => ItemKind::Prop,
        };
        let id = world.add_item(def.name.clone(), kind, location);
        let owner = match &def.owner {
            Some(owner) => Some(actor_id(owner)?),
            None => None,
        };
        if let Some(item) = world.item_mut(id) {
            item.get = match def.get {
                GetRuleDef::Open => AccessRule::Open,
                GetRuleDef::Never => AccessRule::Never,
            };
            item.get_err_msg = def.get_err_msg.clone();
            item.owner = owner;
        }
    }

    // Second pass over actors: NPC wiring needs every actor and item
    // to exist already.
    for def in &scenario.actors {
        if def.kind != ActorKindDef::Npc {
            continue;
        }
        let id = actor_id(&def.name)?;
        let controller = def
            .controller
            .as_deref()
            .ok_or_else(|| ArenaError::NpcWithoutController(def.name.clone()))?;
        let controller = actor_id(controller)?;

        let mut behavior = NpcBehavior::new(controller);
        behavior.defeat_cry = def.defeat_cry.clone();
        if let Some(actor) = world.actor_mut(id) {
            actor.npc = Some(behavior);
        }

        if !def.defend.is_empty() {
            let stances = def
                .defend
                .iter()
                .map(|s| {
                    s.parse::<Stance>()
                        .map_err(|e| ArenaError::UnknownStance(e.0))
                })
                .collect::<Result<Vec<_>>>()?;
            let weapon_name = def
                .weapon
                .as_deref()
                .ok_or_else(|| ArenaError::DefenseWithoutWeapon(def.name.clone()))?;
            let weapon = held_weapon_by_name(&world, id, weapon_name)
                .ok_or_else(|| ArenaError::UnknownItem(weapon_name.to_string()))?;
            world.set_defense(id, DefenseState::new(stances, weapon));
        } else if def.weapon.is_some() {
            return Err(ArenaError::EmptyDefense(def.name.clone()));
        }
    }

    Ok(world)
}

fn held_weapon_by_name(world: &World, holder: ActorId, name: &str) -> Option<ItemId> {
    let actor = world.actor(holder)?;
    actor
        .inventory
        .iter()
        .copied()
        .find(|id| match world.item(*id) {
            Some(item) => item.is_weapon() && item.name.eq_ignore_ascii_case(name),
            None => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world_loads() {
        let world = load_world(DEFAULT_WORLD).unwrap();
        let player = world.find_player("wanderer").unwrap();
        assert!(world.actor(player).is_some());
    }

    #[test]
    fn test_npc_gets_standing_defense() {
        let world = load_world(DEFAULT_WORLD).unwrap();
        let player = world.find_player("wanderer").unwrap();
        let npc = world
            .search(player, "Instructor")
            .expect("instructor in start room");
        let npc = match npc {
            crate::world::Thing::Actor(id) => id,
            other => panic!("expected actor, got {:?}", other),
        };
        let defense = world.defense(npc).expect("instructor defends from load");
        assert_eq!(defense.current(), Stance::Spock);
    }

    #[test]
    fn test_dangling_room_reference_is_rejected() {
        let text = r#"
[[rooms]]
id = "hall"
name = "Hall"

[[actors]]
name = "you"
kind = "player"
room = "nowhere"
"#;
        match load_world(text) {
            Err(ArenaError::UnknownRoom(name)) => assert_eq!(name, "nowhere"),
            other => panic!("expected UnknownRoom, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_npc_without_controller_is_rejected() {
        let text = r#"
[[rooms]]
id = "hall"
name = "Hall"

[[actors]]
name = "guard"
kind = "npc"
room = "hall"
"#;
        assert!(matches!(
            load_world(text),
            Err(ArenaError::NpcWithoutController(_))
        ));
    }

    #[test]
    fn test_bad_stance_in_defense_is_rejected() {
        let text = r#"
[[rooms]]
id = "hall"
name = "Hall"

[[actors]]
name = "you"
kind = "player"
room = "hall"

[[items]]
name = "sword"
kind = "weapon"
holder = "guard"

[[actors]]
name = "guard"
kind = "npc"
room = "hall"
controller = "you"
defend = ["spock"]
weapon = "sword"
"#;
        assert!(matches!(
            load_world(text),
            Err(ArenaError::UnknownStance(_))
        ));
    }
}
